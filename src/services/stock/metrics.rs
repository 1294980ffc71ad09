//! 财务指标提取
//!
//! 一次 quoteSummary 请求，按字段的回退链提取价格、EPS、市盈率、ROE。
//! 每条链是有序的提取函数列表，取第一个有限值

use anyhow::Result;

use super::provider::MarketDataProvider;
use super::resolver::normalize_symbol;
use crate::models::{raw_value, MetricRecord, QuoteSummary};

/// quoteSummary 请求的模块
pub const SUMMARY_MODULES: [&str; 6] = [
    "price",
    "summaryDetail",
    "financialData",
    "defaultKeyStatistics",
    "incomeStatementHistory",
    "balanceSheetHistory",
];

/// 提取上下文，后面的链可以使用前面已经算出的价格和 EPS
pub struct FieldContext<'a> {
    pub summary: &'a QuoteSummary,
    pub price: Option<f64>,
    pub eps: Option<f64>,
}

pub type Extractor = fn(&FieldContext<'_>) -> Option<f64>;

pub const PRICE_CHAIN: &[Extractor] = &[market_price, financial_current_price];
pub const EPS_CHAIN: &[Extractor] = &[trailing_eps, financial_ttm_eps];
pub const PE_CHAIN: &[Extractor] = &[trailing_pe, price_over_eps];
pub const ROE_CHAIN: &[Extractor] = &[reported_roe, computed_roe];

/// 依次尝试提取函数，返回第一个有限值
pub fn first_available(ctx: &FieldContext<'_>, chain: &[Extractor]) -> Option<f64> {
    chain
        .iter()
        .find_map(|extract| extract(ctx).filter(|v| v.is_finite()))
}

// ==================== 价格 ====================

fn market_price(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .price
        .as_ref()
        .and_then(|p| raw_value(&p.regular_market_price))
}

fn financial_current_price(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .financial_data
        .as_ref()
        .and_then(|f| raw_value(&f.current_price))
}

// ==================== EPS ====================

fn trailing_eps(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .default_key_statistics
        .as_ref()
        .and_then(|k| raw_value(&k.trailing_eps))
}

fn financial_ttm_eps(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .financial_data
        .as_ref()
        .and_then(|f| raw_value(&f.eps_trailing_twelve_months))
}

// ==================== 市盈率 ====================

fn trailing_pe(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .summary_detail
        .as_ref()
        .and_then(|s| raw_value(&s.trailing_pe))
}

/// EPS 为 0 时结果为无穷大，由 first_available 过滤
fn price_over_eps(ctx: &FieldContext<'_>) -> Option<f64> {
    Some(ctx.price? / ctx.eps?)
}

// ==================== ROE ====================

fn reported_roe(ctx: &FieldContext<'_>) -> Option<f64> {
    ctx.summary
        .financial_data
        .as_ref()
        .and_then(|f| raw_value(&f.return_on_equity))
        .map(|fraction| fraction * 100.0)
}

/// 最近一期净利润 / 最近一期股东权益
fn computed_roe(ctx: &FieldContext<'_>) -> Option<f64> {
    let net_income = ctx
        .summary
        .income_statement_history
        .as_ref()?
        .income_statement_history
        .first()
        .and_then(|s| raw_value(&s.net_income))?;
    let equity = ctx
        .summary
        .balance_sheet_history
        .as_ref()?
        .balance_sheet_statements
        .first()
        .and_then(|s| raw_value(&s.total_stockholder_equity))?;

    if equity == 0.0 {
        return None;
    }
    Some(net_income / equity * 100.0)
}

// ==================== 名称 ====================

fn company_name(summary: &QuoteSummary, symbol: &str) -> String {
    summary
        .price
        .as_ref()
        .and_then(|p| {
            [&p.long_name, &p.short_name]
                .into_iter()
                .flatten()
                .map(|n| n.trim())
                .find(|n| !n.is_empty())
        })
        .unwrap_or(symbol)
        .to_string()
}

/// 从摘要数据构造指标记录
pub fn extract_metrics(symbol: &str, summary: &QuoteSummary) -> MetricRecord {
    let mut ctx = FieldContext {
        summary,
        price: None,
        eps: None,
    };
    ctx.price = first_available(&ctx, PRICE_CHAIN);
    ctx.eps = first_available(&ctx, EPS_CHAIN);

    MetricRecord {
        symbol: symbol.to_string(),
        name: company_name(summary, symbol),
        price: ctx.price,
        eps: ctx.eps,
        pe_ratio: first_available(&ctx, PE_CHAIN),
        roe: first_available(&ctx, ROE_CHAIN),
    }
}

/// 获取单只股票的财务指标
///
/// 每次调用都重新请求上游，不做缓存
pub async fn fetch_metrics(provider: &dyn MarketDataProvider, symbol: &str) -> Result<MetricRecord> {
    let symbol = normalize_symbol(symbol);
    let summary = provider.quote_summary(&symbol, &SUMMARY_MODULES).await?;
    Ok(extract_metrics(&symbol, &summary))
}
