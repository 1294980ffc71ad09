//! 跨域白名单
//!
//! 没有 Origin 头的请求（服务端调用）直接放行；
//! 白名单内的来源放行并附带凭证；其他来源在进入路由前拒绝

use actix_cors::Cors;
use actix_web::http::header::HeaderValue;

/// 预检结果缓存时间（秒）
const PREFLIGHT_MAX_AGE: usize = 3600;

/// 允许的来源列表
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList {
    origins: Vec<String>,
    allow_any: bool,
}

impl OriginAllowList {
    /// `*` 表示放行所有来源
    pub fn new(origins: Vec<String>) -> Self {
        let allow_any = origins.iter().any(|o| o == "*");
        Self { origins, allow_any }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allow_any || self.origins.iter().any(|o| o == origin)
    }

    fn allows_header(&self, origin: &HeaderValue) -> bool {
        let allowed = origin.to_str().map(|o| self.allows(o)).unwrap_or(false);
        if !allowed {
            log::warn!("拒绝跨域请求，来源: {:?}", origin);
        }
        allowed
    }
}

/// 按白名单构建跨域中间件
///
/// 每个 worker 各自调用一次
pub fn cors_layer(allow_list: OriginAllowList) -> Cors {
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| allow_list.allows_header(origin))
        .allowed_methods(vec!["GET"])
        .allow_any_header()
        .supports_credentials()
        .block_on_origin_mismatch(true)
        .max_age(PREFLIGHT_MAX_AGE)
}
