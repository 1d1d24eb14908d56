//! Repository for the `topic_pages` table.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::topic_page::TopicPage;

/// Column list for `topic_pages` queries.
const COLUMNS: &str = "id, topic_id, content, logo, published, created_at, updated_at";

/// Provides read and update operations for topic pages.
pub struct TopicPageRepo;

impl TopicPageRepo {
    /// Insert a page for a topic. Fails on the unique `topic_id` constraint
    /// if the topic already has one.
    pub async fn create(
        pool: &PgPool,
        topic_id: DbId,
        content: &str,
    ) -> Result<TopicPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO topic_pages (topic_id, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TopicPage>(&query)
            .bind(topic_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find the page belonging to a topic.
    pub async fn find_by_topic(
        pool: &PgPool,
        topic_id: DbId,
    ) -> Result<Option<TopicPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topic_pages WHERE topic_id = $1");
        sqlx::query_as::<_, TopicPage>(&query)
            .bind(topic_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a page update: content and logo only when provided, published
    /// always set to the caller-resolved flag.
    pub async fn apply_update(
        pool: &PgPool,
        id: DbId,
        content: Option<&str>,
        logo: Option<&str>,
        published: bool,
    ) -> Result<TopicPage, sqlx::Error> {
        let query = format!(
            "UPDATE topic_pages SET
                content = COALESCE($1, content),
                logo = COALESCE($2, logo),
                published = $3,
                updated_at = now()
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TopicPage>(&query)
            .bind(content)
            .bind(logo)
            .bind(published)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
