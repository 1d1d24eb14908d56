//! Repository for the `topics` table.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::topic::Topic;

/// Column list for `topics` queries.
const COLUMNS: &str = "id, slug, name, maintainer_id, topic_page_id, created_at";

/// Provides read and page-link operations for topics.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a new topic (used by seeds and tests).
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        name: &str,
        maintainer_id: Option<DbId>,
    ) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics (slug, name, maintainer_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(slug)
            .bind(name)
            .bind(maintainer_id)
            .fetch_one(pool)
            .await
    }

    /// Find a topic by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a topic by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE slug = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Link a lazily created page to its topic.
    pub async fn set_topic_page(
        pool: &PgPool,
        topic_id: DbId,
        page_id: DbId,
    ) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "UPDATE topics SET topic_page_id = $1 WHERE id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(page_id)
            .bind(topic_id)
            .fetch_one(pool)
            .await
    }
}
