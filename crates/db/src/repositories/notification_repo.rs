//! Repository for the `notifications` table.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, channel, title, body, data, is_read, created_at";

/// Provides insert and listing for in-app notification records.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification record for one recipient.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        channel: &str,
        title: &str,
        body: &str,
        data: &serde_json::Value,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, channel, title, body, data)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(channel)
            .bind(title)
            .bind(body)
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
