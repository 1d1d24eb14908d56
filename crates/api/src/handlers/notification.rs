//! In-app notification listing for the authenticated user.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use qboard_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum notifications returned per request.
const NOTIFICATION_LIMIT: i64 = 50;

/// `GET /api/v1/notifications` -- the caller's notifications, newest first.
pub async fn list_notifications(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let notifications =
        NotificationRepo::list_for_user(&state.pool, user.user_id, NOTIFICATION_LIMIT).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}
