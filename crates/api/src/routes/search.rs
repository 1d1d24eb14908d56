use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Search routes, registered at the API root.
///
/// ```text
/// GET /search   search_topics
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search::search_topics))
}
