//! 代码解析
//!
//! 把用户输入（代码或公司名称）解析为沙特交易所代码

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use super::provider::MarketDataProvider;
use crate::models::SearchQuote;

/// 沙特交易所（Tadawul）代码后缀
pub const HOME_SUFFIX: &str = ".SR";

/// 交易所字段中的沙特标识，匹配 SAU / Saudi
pub const HOME_EXCHANGE_MARKER: &str = "SAU";

/// 形如代码的输入：字母、数字、点、横线，2-10 位
static TICKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.-]{2,10}$").unwrap());

/// 输入是否已经是代码
pub fn looks_like_ticker(query: &str) -> bool {
    TICKER_PATTERN.is_match(query)
}

/// 转大写，没有点号时追加 .SR
pub fn normalize_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    if symbol.contains('.') {
        symbol
    } else {
        format!("{}{}", symbol, HOME_SUFFIX)
    }
}

fn has_home_suffix(symbol: &str) -> bool {
    symbol.to_uppercase().ends_with(HOME_SUFFIX)
}

fn on_home_exchange(quote: &SearchQuote) -> bool {
    [&quote.exchange, &quote.exch_disp]
        .into_iter()
        .flatten()
        .any(|field| field.to_uppercase().contains(HOME_EXCHANGE_MARKER))
}

/// 从搜索候选中挑选代码
///
/// 优先级：已带 .SR 后缀 > 沙特交易所 > 第一个有代码的候选；
/// 后两者只给不含 `.` 的代码补 .SR，已有其他后缀的原样保留
pub fn pick_candidate(quotes: &[SearchQuote]) -> Option<String> {
    if let Some(symbol) = quotes
        .iter()
        .filter_map(SearchQuote::symbol)
        .find(|s| has_home_suffix(s))
    {
        return Some(symbol.to_uppercase());
    }

    quotes
        .iter()
        .filter(|q| on_home_exchange(q))
        .find_map(SearchQuote::symbol)
        .or_else(|| quotes.iter().find_map(SearchQuote::symbol))
        .map(normalize_symbol)
}

/// 解析用户输入
///
/// 形如代码的输入直接规范化，否则调用一次搜索接口；
/// 无法解析时返回 `Ok(None)`，只有搜索请求本身失败才返回错误
pub async fn resolve(provider: &dyn MarketDataProvider, query: &str) -> Result<Option<String>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    if looks_like_ticker(query) {
        return Ok(Some(normalize_symbol(query)));
    }

    let quotes = provider.search(query).await?;
    let symbol = pick_candidate(&quotes);
    log::debug!("搜索 {:?} 得到 {} 个候选，选中 {:?}", query, quotes.len(), symbol);
    Ok(symbol)
}
