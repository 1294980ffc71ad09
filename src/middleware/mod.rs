//! 中间件

mod cors;

pub use cors::{cors_layer, OriginAllowList};
