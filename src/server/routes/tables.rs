//! Table maintenance endpoints

use crate::server::state::AppState;
use crate::services::parse_cutoff;
use crate::utils::error::EngineError;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;

/// Configure table routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tables/{table_name}", web::delete().to(delete_old_data));
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionQuery {
    pub older_than: Option<String>,
}

/// Purge rows of `table_name` older than `olderThan`
async fn delete_old_data(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeletionQuery>,
) -> Result<HttpResponse, EngineError> {
    let table_name = path.into_inner();
    debug!(table = %table_name, "Deletion requested");

    let raw = query
        .older_than
        .as_deref()
        .ok_or_else(|| EngineError::validation("Missing required parameter: olderThan"))?;
    let cutoff = parse_cutoff(raw)?;

    let report = state.deletion.start_deletion(&table_name, cutoff).await?;
    Ok(HttpResponse::Ok().json(report))
}
