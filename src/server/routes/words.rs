//! Word frequency endpoints

use crate::server::state::AppState;
use crate::utils::error::EngineError;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

/// Configure word routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/words/frequency", web::get().to(top_words));
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFrequencyQuery {
    pub folder_path: Option<String>,
    pub min_length: Option<i64>,
    pub top_count: Option<i64>,
}

async fn top_words(
    state: web::Data<AppState>,
    query: web::Query<WordFrequencyQuery>,
) -> Result<HttpResponse, EngineError> {
    let query = query.into_inner();
    let folder = query
        .folder_path
        .ok_or_else(|| EngineError::validation("Missing required parameter: folderPath"))?;
    let min_length = query
        .min_length
        .ok_or_else(|| EngineError::validation("Missing required parameter: minLength"))?;
    let top_count = query
        .top_count
        .unwrap_or_else(|| state.words.default_top_count());

    let words = state.words.get_top_words(&folder, min_length, top_count).await?;
    Ok(HttpResponse::Ok().json(words))
}
