//! 上游行情数据模型
//!
//! 对应 Yahoo Finance 搜索接口与 quoteSummary 接口的响应结构

use serde::Deserialize;

/// 上游数值字段
///
/// quoteSummary 的数值一般是 `{"raw": 1.23, "fmt": "1.23"}`，
/// 部分接口直接返回裸数字，两种都接受
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Plain(f64),
    Wrapped {
        #[serde(default)]
        raw: Option<f64>,
    },
}

impl RawNumber {
    /// 取出数值，空对象返回 None
    pub fn value(&self) -> Option<f64> {
        match *self {
            RawNumber::Plain(v) => Some(v),
            RawNumber::Wrapped { raw } => raw,
        }
    }
}

impl From<f64> for RawNumber {
    fn from(v: f64) -> Self {
        RawNumber::Plain(v)
    }
}

/// 读取可选数值字段
pub fn raw_value(field: &Option<RawNumber>) -> Option<f64> {
    field.as_ref().and_then(RawNumber::value)
}

// ==================== 搜索接口 ====================

/// 搜索结果中的候选报价
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchQuote {
    /// 代码，如 2222.SR
    #[serde(default)]
    pub symbol: Option<String>,
    /// 交易所代码，如 SAU
    #[serde(default)]
    pub exchange: Option<String>,
    /// 交易所展示名，如 Saudi
    #[serde(default, rename = "exchDisp")]
    pub exch_disp: Option<String>,
}

impl SearchQuote {
    /// 非空的代码
    pub fn symbol(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// 搜索接口响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub quotes: Vec<SearchQuote>,
}

// ==================== quoteSummary 接口 ====================

/// quoteSummary 响应外层
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummary>>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

/// 上游返回的错误描述
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("Error"),
            self.description.as_deref().unwrap_or("unknown")
        )
    }
}

/// 单只股票的 quoteSummary 结果
///
/// 只声明指标提取用到的模块和字段，其余字段忽略
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub price: Option<PriceModule>,
    pub summary_detail: Option<SummaryDetailModule>,
    pub financial_data: Option<FinancialDataModule>,
    pub default_key_statistics: Option<KeyStatisticsModule>,
    pub income_statement_history: Option<IncomeStatementHistory>,
    pub balance_sheet_history: Option<BalanceSheetHistory>,
}

/// price 模块
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    pub regular_market_price: Option<RawNumber>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

/// summaryDetail 模块
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryDetailModule {
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawNumber>,
}

/// financialData 模块
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataModule {
    pub current_price: Option<RawNumber>,
    /// 小数形式，0.12 表示 12%
    pub return_on_equity: Option<RawNumber>,
    pub eps_trailing_twelve_months: Option<RawNumber>,
}

/// defaultKeyStatistics 模块
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatisticsModule {
    pub trailing_eps: Option<RawNumber>,
}

/// incomeStatementHistory 模块，最近一期在前
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementHistory {
    #[serde(default)]
    pub income_statement_history: Vec<IncomeStatement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub net_income: Option<RawNumber>,
}

/// balanceSheetHistory 模块，最近一期在前
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetHistory {
    #[serde(default)]
    pub balance_sheet_statements: Vec<BalanceSheet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub total_stockholder_equity: Option<RawNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试数值字段的两种格式
    #[test]
    fn test_raw_number_formats() {
        let wrapped: RawNumber = serde_json::from_str(r#"{"raw": 31.5, "fmt": "31.50"}"#).unwrap();
        let plain: RawNumber = serde_json::from_str("31.5").unwrap();
        let empty: RawNumber = serde_json::from_str("{}").unwrap();

        assert_eq!(wrapped.value(), Some(31.5));
        assert_eq!(plain.value(), Some(31.5));
        assert_eq!(empty.value(), None);
    }

    /// 测试解析 quoteSummary 响应
    #[test]
    fn test_parse_quote_summary() {
        let body = serde_json::json!({
            "quoteSummary": {
                "result": [{
                    "price": {
                        "regularMarketPrice": {"raw": 27.35, "fmt": "27.35"},
                        "longName": "Saudi Arabian Oil Company",
                        "shortName": "SAUDI ARABIAN OIL"
                    },
                    "summaryDetail": {"trailingPE": {"raw": 16.8}},
                    "financialData": {"returnOnEquity": {"raw": 0.2451}},
                    "defaultKeyStatistics": {"trailingEps": {"raw": 1.63}},
                    "incomeStatementHistory": {
                        "incomeStatementHistory": [{"netIncome": {"raw": 398_000_000_000.0}}]
                    },
                    "balanceSheetHistory": {
                        "balanceSheetStatements": [{"totalStockholderEquity": {}}]
                    }
                }],
                "error": null
            }
        });

        let parsed: QuoteSummaryResponse = serde_json::from_value(body).unwrap();
        let result = parsed.quote_summary.result.unwrap();
        let summary = &result[0];

        let price = summary.price.as_ref().unwrap();
        assert_eq!(raw_value(&price.regular_market_price), Some(27.35));
        assert_eq!(price.long_name.as_deref(), Some("Saudi Arabian Oil Company"));
        assert_eq!(
            raw_value(&summary.summary_detail.as_ref().unwrap().trailing_pe),
            Some(16.8)
        );
        let equity = &summary.balance_sheet_history.as_ref().unwrap().balance_sheet_statements[0];
        assert_eq!(raw_value(&equity.total_stockholder_equity), None);
    }

    /// 测试上游错误结构
    #[test]
    fn test_parse_upstream_error() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: NOPE.SR"}}}"#;
        let parsed: QuoteSummaryResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.quote_summary.result.is_none());
        let error = parsed.quote_summary.error.unwrap();
        assert_eq!(error.to_string(), "Not Found: Quote not found for symbol: NOPE.SR");
    }

    /// 测试搜索候选的空代码过滤
    #[test]
    fn test_search_quote_symbol() {
        let body = r#"{"quotes":[{"symbol":"2222.SR","exchange":"SAU","exchDisp":"Saudi"},{"symbol":"  "}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.quotes[0].symbol(), Some("2222.SR"));
        assert_eq!(parsed.quotes[0].exch_disp.as_deref(), Some("Saudi"));
        assert_eq!(parsed.quotes[1].symbol(), None);
    }
}
