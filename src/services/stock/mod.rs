//! 股票数据服务模块
//!
//! 代码解析 + 指标提取，上游为 Yahoo Finance

pub mod metrics;
pub mod provider;
pub mod resolver;
pub mod yahoo;

#[cfg(test)]
pub mod testing;

use anyhow::Result;
use std::sync::Arc;

use crate::models::{FailureReason, MetricRecord, StockOutcome};

pub use metrics::{extract_metrics, fetch_metrics, SUMMARY_MODULES};
pub use provider::MarketDataProvider;
pub use resolver::{normalize_symbol, resolve, HOME_SUFFIX};
pub use yahoo::YahooClient;

/// 批量查询的最大条数，超出部分直接丢弃
pub const MAX_BATCH_SIZE: usize = 25;

/// 按逗号拆分输入，去掉空白和空项
pub fn split_query_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 单只股票查询的结果
#[derive(Debug)]
pub enum Lookup {
    Found(MetricRecord),
    Unresolved,
}

/// 股票数据服务
///
/// 持有数据源，请求之间不共享其他状态
pub struct StockService {
    provider: Arc<dyn MarketDataProvider>,
}

impl StockService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// 解析并获取单只股票，上游任何失败都作为错误返回
    pub async fn lookup(&self, query: &str) -> Result<Lookup> {
        let Some(symbol) = resolve(self.provider.as_ref(), query).await? else {
            return Ok(Lookup::Unresolved);
        };
        log::debug!("{:?} 解析为 {}", query, symbol);

        let record = fetch_metrics(self.provider.as_ref(), &symbol).await?;
        Ok(Lookup::Found(record))
    }

    /// 批量查询
    ///
    /// 按输入顺序逐个处理，前一项完成后才开始下一项；
    /// 单项失败不影响其他项
    pub async fn lookup_batch(&self, queries: &[String]) -> Vec<StockOutcome> {
        let mut results = Vec::with_capacity(queries.len());

        for query in queries {
            let symbol = match resolve(self.provider.as_ref(), query).await {
                Ok(Some(symbol)) => symbol,
                Ok(None) => {
                    results.push(StockOutcome::failure(query.as_str(), FailureReason::Unresolved));
                    continue;
                }
                // 搜索请求本身失败属于上游错误
                Err(e) => {
                    log::warn!("解析 {:?} 失败: {:#}", query, e);
                    results.push(StockOutcome::failure(query.as_str(), FailureReason::FetchFailed));
                    continue;
                }
            };

            match fetch_metrics(self.provider.as_ref(), &symbol).await {
                Ok(record) => results.push(StockOutcome::success(query.as_str(), record)),
                Err(e) => {
                    log::warn!("获取 {} 指标失败: {:#}", symbol, e);
                    results.push(StockOutcome::failure(query.as_str(), FailureReason::FetchFailed));
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stock::testing::{quote, summary, FakeProvider};

    #[test]
    fn test_split_query_list() {
        assert_eq!(
            split_query_list(" Saudi Aramco, 2010.SR ,, ,The Saudi National Bank "),
            vec!["Saudi Aramco", "2010.SR", "The Saudi National Bank"]
        );
        assert!(split_query_list(" , ,").is_empty());
        assert!(split_query_list("").is_empty());
    }

    /// 测试批量查询顺序与单项失败隔离
    #[tokio::test]
    async fn test_batch_preserves_order() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_summary("2222.SR", summary("Saudi Aramco", 27.35, 1.63, 16.8, 0.2451))
                .with_summary("1180.SR", summary("The Saudi National Bank", 35.1, 3.2, 11.0, 0.12)),
        );
        let service = StockService::new(provider.clone());

        let queries = split_query_list("2222,NOPE_UNRESOLVABLE,1180.SR");
        let results = service.lookup_batch(&queries).await;

        assert_eq!(results.len(), 3);
        match &results[0] {
            StockOutcome::Success(s) => assert_eq!(s.metrics.symbol, "2222.SR"),
            other => panic!("第一项应成功: {:?}", other),
        }
        match &results[1] {
            StockOutcome::Failure(f) => {
                assert_eq!(f.query, "NOPE_UNRESOLVABLE");
                assert_eq!(f.error, FailureReason::Unresolved);
            }
            other => panic!("第二项应失败: {:?}", other),
        }
        match &results[2] {
            StockOutcome::Success(s) => assert_eq!(s.metrics.symbol, "1180.SR"),
            other => panic!("第三项应成功: {:?}", other),
        }

        // 逐项顺序调用
        assert_eq!(
            provider.calls(),
            vec!["summary:2222.SR", "search:NOPE_UNRESOLVABLE", "summary:1180.SR"]
        );
    }

    /// 测试获取失败与搜索失败都归为 fetch_failed
    #[tokio::test]
    async fn test_batch_failure_reasons() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_search("Orphan Co", vec![quote("7777", "SAU", "Saudi")])
                .with_failing_search("Broken Co"),
        );
        let service = StockService::new(provider);

        let results = service
            .lookup_batch(&["Orphan Co".to_string(), "Broken Co".to_string()])
            .await;

        let reasons: Vec<_> = results
            .iter()
            .map(|r| match r {
                StockOutcome::Failure(f) => f.error,
                StockOutcome::Success(_) => panic!("不应成功"),
            })
            .collect();
        assert_eq!(reasons, vec![FailureReason::FetchFailed, FailureReason::FetchFailed]);
    }

    /// 测试单只查询
    #[tokio::test]
    async fn test_lookup() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_search("Saudi Aramco", vec![quote("2222.SR", "SAU", "Saudi")])
                .with_summary("2222.SR", summary("Saudi Aramco", 27.35, 1.63, 16.8, 0.2451)),
        );
        let service = StockService::new(provider);

        match service.lookup("Saudi Aramco").await.unwrap() {
            Lookup::Found(record) => assert_eq!(record.name, "Saudi Aramco"),
            Lookup::Unresolved => panic!("应解析成功"),
        }
        assert!(matches!(
            service.lookup("Nobody Knows Inc").await.unwrap(),
            Lookup::Unresolved
        ));
        assert!(service.lookup("9999").await.is_err());
    }
}
