//! 行情数据源抽象

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{QuoteSummary, SearchQuote};

/// 行情数据源
///
/// 提供文本搜索和 quoteSummary 两类调用，
/// 生产环境由 [`YahooClient`](super::yahoo::YahooClient) 实现
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 按代码或公司名称搜索候选报价（不返回新闻）
    async fn search(&self, query: &str) -> Result<Vec<SearchQuote>>;

    /// 一次请求获取指定模块的摘要数据
    async fn quote_summary(&self, symbol: &str, modules: &[&str]) -> Result<QuoteSummary>;
}
