//! 通用 API 响应模型
//!
//! 健康检查与错误响应的 JSON 结构

use serde::{Deserialize, Serialize};

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub msg: String,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self {
            ok: true,
            msg: "Backend is running".to_string(),
        }
    }
}

/// 错误响应
///
/// 所有失败都以 `{"error": "..."}` 返回
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
