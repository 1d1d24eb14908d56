//! Account registration and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use qboard_core::error::CoreError;
use qboard_db::models::user::{LoginRequest, RegisterUser};
use qboard_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `POST /api/v1/auth/register`.
///
/// Duplicate usernames surface as 409 via the unique constraint.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".into()));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|err| AppError::InternalError(format!("Password hashing failed: {err}")))?;

    let user = UserRepo::create(
        &state.pool,
        username,
        input.name.as_deref(),
        input.email.as_deref(),
        &password_hash,
    )
    .await?;

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|err| AppError::InternalError(format!("Token generation failed: {err}")))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": user })),
    ))
}

/// `POST /api/v1/auth/login`.
///
/// Unknown usernames and wrong passwords produce the same 401 so the
/// response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid username or password".into()))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|err| AppError::InternalError(format!("Password verification failed: {err}")))?;

    if !valid {
        return Err(CoreError::Unauthorized("Invalid username or password".into()).into());
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|err| AppError::InternalError(format!("Token generation failed: {err}")))?;

    Ok(Json(json!({ "token": token, "user": user })))
}
