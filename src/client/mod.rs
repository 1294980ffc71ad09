//! 表格客户端
//!
//! 一次提交发一个批量请求，结果按输入顺序渲染成表格

mod table;

pub use table::{format_number, format_percent, render_table, PLACEHOLDER};

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::models::ErrorResponse;
use crate::services::stock::split_query_list;

/// 后端默认地址
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// 默认输入
pub const DEFAULT_INPUT: &str = "Saudi Aramco, 2010.SR, The Saudi National Bank";

/// 输入为空时的提示
pub const EMPTY_INPUT_MESSAGE: &str =
    "Enter one or more tickers or company names, separated by commas.";

/// 批量接口返回的单项
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchBody {
    #[serde(default)]
    results: Vec<BatchItem>,
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// 用户输入
    pub query: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub eps: Option<f64>,
    pub pe: Option<f64>,
    pub roe: Option<f64>,
    pub ok: bool,
    pub error: Option<String>,
}

impl From<BatchItem> for ResultRow {
    fn from(item: BatchItem) -> Self {
        Self {
            query: item.query,
            name: item.name,
            symbol: item.symbol,
            price: item.price,
            eps: item.eps,
            pe: item.pe_ratio,
            roe: item.roe,
            ok: item.ok,
            error: item.error,
        }
    }
}

/// 后端接口客户端
pub struct BackendClient {
    client: Client,
    base: String,
}

impl BackendClient {
    pub fn new(base: &str) -> Result<Self> {
        Url::parse(base).with_context(|| format!("后端地址无效: {}", base))?;
        Ok(Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// 批量查询的完整地址
    pub fn batch_url(&self, queries: &[String]) -> Result<Url> {
        let endpoint = format!("{}/stocks", self.base);
        let url = Url::parse_with_params(&endpoint, &[("tickers", queries.join(","))])?;
        Ok(url)
    }

    /// 发送一次批量请求，结果顺序与服务端一致
    pub async fn fetch_batch(&self, queries: &[String]) -> Result<Vec<BatchItem>> {
        let url = self.batch_url(queries)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // 优先使用后端返回的错误信息
            match response.json::<ErrorResponse>().await {
                Ok(body) => bail!(body.error),
                Err(_) => bail!("Request failed with status code {}", status.as_u16()),
            }
        }

        let body: BatchBody = response.json().await.context("解析批量查询结果失败")?;
        Ok(body.results)
    }
}

/// 客户端状态
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub input: String,
    pub rows: Vec<ResultRow>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DisplayState {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// 提交当前输入
    ///
    /// 输入为空时只设置提示，不发请求；每次提交整体替换结果行
    pub async fn submit(&mut self, api: &BackendClient) {
        self.loading = true;
        self.error = None;
        self.rows.clear();

        let queries = split_query_list(&self.input);
        if queries.is_empty() {
            self.loading = false;
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return;
        }

        match api.fetch_batch(&queries).await {
            Ok(items) => self.rows = items.into_iter().map(ResultRow::from).collect(),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }
}
