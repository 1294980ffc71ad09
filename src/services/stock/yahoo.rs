//! Yahoo Finance 行情接口实现
//!
//! 对接 /v1/finance/search 和 /v10/finance/quoteSummary

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

use super::provider::MarketDataProvider;
use crate::config::UpstreamConfig;
use crate::models::{QuoteSummary, QuoteSummaryResponse, SearchQuote, SearchResponse};

/// 搜索返回的候选数量
const SEARCH_QUOTES_COUNT: &str = "10";

/// Yahoo Finance 客户端
///
/// quoteSummary 需要 Cookie + crumb 认证：首次调用前访问 Cookie 地址，
/// 再从 /v1/test/getcrumb 取 crumb，之后复用；返回 401/403 时丢弃缓存的 crumb
pub struct YahooClient {
    /// HTTP 客户端（开启 Cookie 存储）
    client: Client,
    query_base: Url,
    cookie_url: String,
    crumb: Mutex<Option<String>>,
}

impl YahooClient {
    /// 根据配置创建客户端
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("创建 HTTP 客户端失败")?;

        let query_base = Url::parse(&config.query_base)
            .with_context(|| format!("上游地址无效: {}", config.query_base))?;

        Ok(Self {
            client,
            query_base,
            cookie_url: config.cookie_url.clone(),
            crumb: Mutex::new(None),
        })
    }

    /// 在查询地址后拼接路径
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.query_base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("上游地址不能作为基础路径: {}", self.query_base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 获取 crumb，失败时返回 None，请求仍继续
    async fn crumb(&self) -> Option<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(ref crumb) = *cached {
            return Some(crumb.clone());
        }

        // 只为拿到会话 Cookie，状态码无所谓
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            log::debug!("获取 Cookie 失败: {}", e);
        }

        let crumb = match self.fetch_crumb().await {
            Ok(crumb) => crumb,
            Err(e) => {
                log::warn!("获取 crumb 失败: {}", e);
                return None;
            }
        };

        *cached = Some(crumb.clone());
        Some(crumb)
    }

    async fn fetch_crumb(&self) -> Result<String> {
        let url = self.endpoint(&["v1", "test", "getcrumb"])?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            bail!("crumb 接口返回错误: {}", response.status());
        }

        let body = response.text().await?;
        let crumb = body.trim();
        if crumb.is_empty() || crumb.len() >= 100 || crumb.contains(' ') || crumb.contains('<') {
            bail!("crumb 内容无效");
        }
        Ok(crumb.to_string())
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchQuote>> {
        let url = self.endpoint(&["v1", "finance", "search"])?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("quotesCount", SEARCH_QUOTES_COUNT),
                ("newsCount", "0"),
            ])
            .send()
            .await
            .with_context(|| format!("搜索请求失败: {}", query))?;

        if !response.status().is_success() {
            bail!("搜索接口返回错误: {}", response.status());
        }

        let body: SearchResponse = response.json().await.context("解析搜索结果失败")?;
        Ok(body.quotes)
    }

    async fn quote_summary(&self, symbol: &str, modules: &[&str]) -> Result<QuoteSummary> {
        let url = self.endpoint(&["v10", "finance", "quoteSummary", symbol])?;
        let modules = modules.join(",");

        let mut request = self.client.get(url).query(&[("modules", modules.as_str())]);
        if let Some(crumb) = self.crumb().await {
            request = request.query(&[("crumb", crumb.as_str())]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("获取 {} 行情摘要失败", symbol))?;
        let status = response.status();
        let text = response.text().await?;

        // crumb 失效，下次调用重新获取
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("{} 行情摘要认证失败 ({})，清除 crumb", symbol, status);
            *self.crumb.lock().await = None;
        }

        // 错误响应也带 JSON，优先取其中的描述
        let parsed = serde_json::from_str::<QuoteSummaryResponse>(&text);
        if let Ok(ref body) = parsed {
            if let Some(ref error) = body.quote_summary.error {
                bail!("{} 行情摘要返回错误 {}", symbol, error);
            }
        }
        if !status.is_success() {
            bail!("{} 行情摘要接口返回错误: {}", symbol, status);
        }

        let parsed = parsed.with_context(|| format!("解析 {} 行情摘要失败", symbol))?;
        parsed
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| anyhow!("{} 行情摘要为空", symbol))
    }
}
