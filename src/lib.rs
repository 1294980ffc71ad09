//! 沙特股票指标服务
//!
//! 把代码或公司名称解析为沙特交易所代码（.SR），
//! 从 Yahoo Finance 获取价格、EPS、市盈率、ROE

pub mod client;     // 表格客户端
pub mod config;     // 配置加载
pub mod handlers;   // HTTP 请求处理器
pub mod middleware; // 中间件
pub mod models;     // 数据模型定义
pub mod services;   // 业务逻辑服务
