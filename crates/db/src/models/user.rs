//! User entity model and auth DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// DTO for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
