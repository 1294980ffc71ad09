use actix_web::{web, HttpResponse, Result};
use crate::models::HealthResponse;

/// 不访问上游，始终返回 200
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse::running()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
