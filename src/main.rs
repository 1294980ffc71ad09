//! 沙特股票指标后端服务
//!
//! 提供代码解析和财务指标的 RESTful API 服务
//! 数据来源：Yahoo Finance

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::io;
use std::sync::Arc;

use saudi_stocks::config::AppConfig;
use saudi_stocks::handlers;
use saudi_stocks::middleware::{cors_layer, OriginAllowList};
use saudi_stocks::services::stock::{StockService, YahooClient};

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 0.0.0.0:5000
#[actix_web::main]
async fn main() -> io::Result<()> {
    // 先加载 .env，RUST_LOG 等变量可以写在里面
    dotenvy::dotenv().ok();

    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();

    let provider = YahooClient::new(&config.upstream).map_err(io::Error::other)?;
    let service = web::Data::new(StockService::new(Arc::new(provider)));
    let allow_list = OriginAllowList::new(config.cors.allowed_origins.clone());

    log::info!("允许的跨域来源: {:?}", config.cors.allowed_origins);
    log::info!("启动沙特股票指标服务，监听 {}", config.bind_addr());

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors_layer(allow_list.clone()))  // 跨域白名单
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config)  // 配置路由
            .default_service(web::to(handlers::not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
