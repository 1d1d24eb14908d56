pub mod answer;
pub mod auth;
pub mod health;
pub mod notification;
pub mod search;
pub mod topic_page;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
///
/// /answers                              feed listing, create
/// /answers/{id}                         get, update, soft-delete
/// /answers/{id}/vote                    vote toggle
///
/// /topicpages/{slug}                    get (lazy create), update
/// /topicpages/{slug}/publish            publish (POST)
/// /topicpages/{slug}/unpublish          unpublish (POST)
/// /topicpages/{slug}/content            read-only content
/// /topicpages/{slug}/related-links      link listing
/// /topicpages/{slug}/images             image listing
/// /topicpages/{slug}/images/sign        presigned upload (POST)
/// /topicpages/{slug}/images/{image_id}  soft-delete image
///
/// /search                               topic full-text search
/// /notifications                        caller's notifications
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/answers", answer::router())
        .nest("/topicpages", topic_page::router())
        .merge(search::router())
        .merge(notification::router())
}
