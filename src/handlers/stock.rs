//! 股票接口处理器
//!
//! ## API 列表
//! - GET /api/stock/{q} - 单只股票（代码或公司名称）
//! - GET /api/stocks?tickers=a,b,c - 批量查询，最多 25 项，按输入顺序返回

use actix_web::{web, HttpResponse, Result};
use crate::models::{BatchQuery, BatchResponse, ErrorResponse, StockOutcome};
use crate::services::stock::{split_query_list, Lookup, StockService, MAX_BATCH_SIZE};

/// 获取单只股票指标
///
/// GET /api/stock/{q}
pub async fn get_stock(
    service: web::Data<StockService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let query = path.into_inner();

    match service.lookup(&query).await {
        Ok(Lookup::Found(record)) => {
            Ok(HttpResponse::Ok().json(StockOutcome::success(query, record)))
        }
        Ok(Lookup::Unresolved) => {
            let response = ErrorResponse::new(format!("Could not resolve symbol for \"{}\"", query.trim()));
            Ok(HttpResponse::NotFound().json(response))
        }
        Err(e) => {
            log::error!("查询 {:?} 失败: {:#}", query, e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch stock data")))
        }
    }
}

/// 批量获取股票指标
///
/// GET /api/stocks?tickers=2222,Saudi Aramco,1180.SR
pub async fn get_stocks(
    service: web::Data<StockService>,
    query: web::Query<BatchQuery>,
) -> Result<HttpResponse> {
    let queries: Vec<String> = query
        .tickers
        .as_deref()
        .map(split_query_list)
        .unwrap_or_default()
        .into_iter()
        .take(MAX_BATCH_SIZE)
        .collect();

    if queries.is_empty() {
        let response = ErrorResponse::new("Provide ?tickers=comma,separated,list of tickers or company names");
        return Ok(HttpResponse::BadRequest().json(response));
    }

    let results = service.lookup_batch(&queries).await;
    Ok(HttpResponse::Ok().json(BatchResponse::new(results)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/stock/{q}", web::get().to(get_stock))
        .route("/stocks", web::get().to(get_stocks));
}
