//! Repository for the `related_links` table.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::related_link::RelatedLink;

/// Column list for `related_links` queries.
const COLUMNS: &str = "id, topic_page_id, user_id, url, title, deleted, created_at";

/// Provides listing of links attached to a topic page.
pub struct RelatedLinkRepo;

impl RelatedLinkRepo {
    /// List a page's links visible to the given viewer.
    ///
    /// Deleted links stay visible to their submitter so they can undo,
    /// matching link-level visibility filtering.
    pub async fn list_for_page(
        pool: &PgPool,
        page_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Vec<RelatedLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM related_links
             WHERE topic_page_id = $1
               AND (deleted = FALSE OR user_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, RelatedLink>(&query)
            .bind(page_id)
            .bind(viewer)
            .fetch_all(pool)
            .await
    }

    /// Insert a link (used by seeds and tests).
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        user_id: Option<DbId>,
        url: &str,
        title: &str,
    ) -> Result<RelatedLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO related_links (topic_page_id, user_id, url, title)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RelatedLink>(&query)
            .bind(page_id)
            .bind(user_id)
            .bind(url)
            .bind(title)
            .fetch_one(pool)
            .await
    }
}
