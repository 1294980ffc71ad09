//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，再用环境变量覆盖
//! 启动时加载一次，之后只读

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游行情接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 查询接口地址（搜索、quoteSummary、crumb）
    #[serde(default = "default_query_base")]
    pub query_base: String,
    /// 获取会话 Cookie 的地址
    #[serde(default = "default_cookie_url")]
    pub cookie_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 允许的来源，`*` 表示全部放行
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 上游接口配置
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 跨域配置
    #[serde(default)]
    pub cors: CorsConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_query_base() -> String { "https://query2.finance.yahoo.com".to_string() }
fn default_cookie_url() -> String { "https://fc.yahoo.com".to_string() }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            query_base: default_query_base(),
            cookie_url: default_cookie_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// 解析逗号分隔的来源列表
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：优先从文件，失败则使用默认值，最后应用环境变量
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];
        let mut config = None;

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(loaded) => {
                        log::info!("从 {} 加载配置成功", path);
                        config = Some(loaded);
                        break;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        let mut config = config.unwrap_or_else(|| {
            log::info!("使用默认配置");
            Self::default()
        });
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// 用环境变量覆盖配置
    ///
    /// 支持 PORT、HOST、ALLOWED_ORIGINS、YAHOO_QUERY_BASE、YAHOO_COOKIE_URL
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("PORT 环境变量无效: {}，使用 {}", port, self.server.port),
            }
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = parse_origin_list(&origins);
        }
        if let Some(base) = lookup("YAHOO_QUERY_BASE").filter(|b| !b.trim().is_empty()) {
            self.upstream.query_base = base.trim().to_string();
        }
        if let Some(url) = lookup("YAHOO_COOKIE_URL").filter(|u| !u.trim().is_empty()) {
            self.upstream.cookie_url = url.trim().to_string();
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_partial_json() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server":{"port":8081},"cors":{"allowed_origins":["https://app.example.com"]}}"#)
                .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cors.allowed_origins, vec!["https://app.example.com"]);
        assert_eq!(config.upstream.query_base, "https://query2.finance.yahoo.com");
    }

    #[test]
    fn test_env_overrides() {
        let env = env_of(&[
            ("PORT", "7000"),
            ("ALLOWED_ORIGINS", " https://a.example.com, ,https://b.example.com "),
            ("YAHOO_QUERY_BASE", "http://127.0.0.1:9999"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.server.port, 7000);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(config.upstream.query_base, "http://127.0.0.1:9999");
        assert_eq!(config.upstream.cookie_url, "https://fc.yahoo.com");
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let env = env_of(&[("PORT", "not-a-port")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.server.port, 5000);
    }
}
