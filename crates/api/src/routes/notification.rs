use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Notification routes, registered at the API root.
///
/// ```text
/// GET /notifications   list_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/notifications", get(notification::list_notifications))
}
