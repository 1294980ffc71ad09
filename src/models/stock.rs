//! 股票数据模型
//!
//! 定义指标记录、批量查询结果等接口数据结构

use serde::{Deserialize, Serialize};

/// 股票财务指标
///
/// 每个数值字段独立可缺失，缺失时不输出该字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// 解析后的代码，如 2222.SR
    pub symbol: String,
    /// 公司名称
    pub name: String,
    /// 最新价
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// 每股收益（TTM）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    /// 市盈率
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    /// 净资产收益率（百分比，12.0 表示 12%）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roe: Option<f64>,
}

/// 批量查询中单项失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// 无法解析出代码
    Unresolved,
    /// 上游获取失败
    FetchFailed,
}

/// 查询成功的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSuccess {
    pub ok: bool,
    /// 用户输入的原始查询
    pub query: String,
    #[serde(flatten)]
    pub metrics: MetricRecord,
}

/// 查询失败的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockFailure {
    pub ok: bool,
    pub query: String,
    pub symbol: Option<String>,
    pub error: FailureReason,
}

/// 单项查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StockOutcome {
    Success(StockSuccess),
    Failure(StockFailure),
}

impl StockOutcome {
    pub fn success(query: impl Into<String>, metrics: MetricRecord) -> Self {
        StockOutcome::Success(StockSuccess {
            ok: true,
            query: query.into(),
            metrics,
        })
    }

    pub fn failure(query: impl Into<String>, error: FailureReason) -> Self {
        StockOutcome::Failure(StockFailure {
            ok: false,
            query: query.into(),
            symbol: None,
            error,
        })
    }
}

/// 批量查询参数
#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    /// 逗号分隔的代码或公司名称
    pub tickers: Option<String>,
}

/// 批量查询响应
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub results: Vec<StockOutcome>,
}

impl BatchResponse {
    pub fn new(results: Vec<StockOutcome>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}
