//! Repository for the append-only `topic_page_revisions` table.
//!
//! Revisions are immutable once written; this module exposes only
//! `append` and ordered reads.

use sqlx::PgPool;

use qboard_core::revision::RevisionKind;
use qboard_core::types::DbId;

use crate::models::topic_page::RevisionEvent;

/// Column list for `topic_page_revisions` queries.
const COLUMNS: &str = "id, topic_page_id, user_id, event, created_at";

/// Provides append and read operations for topic page revision history.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision event and return the new entry.
    pub async fn append(
        pool: &PgPool,
        page_id: DbId,
        user_id: DbId,
        kind: RevisionKind,
    ) -> Result<RevisionEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO topic_page_revisions (topic_page_id, user_id, event)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RevisionEvent>(&query)
            .bind(page_id)
            .bind(user_id)
            .bind(kind.as_str())
            .fetch_one(pool)
            .await
    }

    /// List a page's revision history in insertion order (oldest first).
    pub async fn list_for_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<RevisionEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topic_page_revisions
             WHERE topic_page_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, RevisionEvent>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }
}
