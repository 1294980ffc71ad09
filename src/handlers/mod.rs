pub mod health;
pub mod stock;

use actix_web::{error::InternalError, web, HttpResponse};
use crate::models::ErrorResponse;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(query_config())
            .configure(health::config)
            .configure(stock::config)
    );
}

/// 查询参数解析失败时同样返回 JSON 错误
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("{} 查询参数无效: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// 未匹配的路由
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}
