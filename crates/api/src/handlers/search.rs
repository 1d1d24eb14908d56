//! Topic search handler over the aggregate search documents.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use qboard_db::repositories::SearchRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum hits returned by one search request.
const SEARCH_LIMIT: i64 = 25;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /api/v1/search?q=...`.
pub async fn search_topics(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest("Search query is required".into()));
    }

    let hits = SearchRepo::search_topics(&state.pool, q, SEARCH_LIMIT).await?;

    Ok(Json(DataResponse { data: hits }))
}
