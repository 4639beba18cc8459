//! Health check endpoint

use crate::core::cache_manager::CacheStats;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub pool_size: usize,
    pub idle_workers: usize,
    pub active_deletions: usize,
    pub cache: CacheStats,
}

/// Liveness plus a view of the worker pool and result cache
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        pool_size: state.pool.size(),
        idle_workers: state.pool.idle_workers(),
        active_deletions: state.deletion.registry().active_count(),
        cache: state.words.cache().stats(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}
