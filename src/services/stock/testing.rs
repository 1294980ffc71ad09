//! 测试用的内存数据源

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::provider::MarketDataProvider;
use crate::models::{
    FinancialDataModule, KeyStatisticsModule, PriceModule, QuoteSummary, SearchQuote,
    SummaryDetailModule,
};

/// 按预置数据应答的数据源，记录每次调用
#[derive(Default)]
pub struct FakeProvider {
    searches: HashMap<String, Vec<SearchQuote>>,
    summaries: HashMap<String, QuoteSummary>,
    failing_searches: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, quotes: Vec<SearchQuote>) -> Self {
        self.searches.insert(query.to_string(), quotes);
        self
    }

    pub fn with_failing_search(mut self, query: &str) -> Self {
        self.failing_searches.push(query.to_string());
        self
    }

    pub fn with_summary(mut self, symbol: &str, summary: QuoteSummary) -> Self {
        self.summaries.insert(symbol.to_string(), summary);
        self
    }

    /// 调用记录，格式为 `search:<q>` 或 `summary:<symbol>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchQuote>> {
        self.calls.lock().unwrap().push(format!("search:{}", query));
        if self.failing_searches.iter().any(|q| q == query) {
            return Err(anyhow!("search unavailable"));
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn quote_summary(&self, symbol: &str, _modules: &[&str]) -> Result<QuoteSummary> {
        self.calls.lock().unwrap().push(format!("summary:{}", symbol));
        self.summaries
            .get(symbol)
            .cloned()
            .ok_or_else(|| anyhow!("Quote not found for symbol: {}", symbol))
    }
}

/// 构造搜索候选
pub fn quote(symbol: &str, exchange: &str, exch_disp: &str) -> SearchQuote {
    SearchQuote {
        symbol: Some(symbol.to_string()),
        exchange: Some(exchange.to_string()),
        exch_disp: Some(exch_disp.to_string()),
    }
}

/// 构造带价格、EPS、市盈率、ROE 的摘要
pub fn summary(name: &str, price: f64, eps: f64, pe: f64, roe_fraction: f64) -> QuoteSummary {
    QuoteSummary {
        price: Some(PriceModule {
            regular_market_price: Some(price.into()),
            long_name: Some(name.to_string()),
            short_name: None,
        }),
        summary_detail: Some(SummaryDetailModule {
            trailing_pe: Some(pe.into()),
        }),
        financial_data: Some(FinancialDataModule {
            return_on_equity: Some(roe_fraction.into()),
            ..FinancialDataModule::default()
        }),
        default_key_statistics: Some(KeyStatisticsModule {
            trailing_eps: Some(eps.into()),
        }),
        ..QuoteSummary::default()
    }
}
