//! Repository for the `topic_page_images` table.
//!
//! The upload coordinator inserts the image row in a single targeted
//! write; listings read newest-first, which makes each insert a positional
//! prepend without touching the rest of the page document.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::topic_page::TopicPageImage;

/// Column list for `topic_page_images` queries.
const COLUMNS: &str = "id, topic_page_id, user_id, url, deleted, created_at";

/// Provides insert, listing, and soft-delete operations for page images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image record; it becomes the head of the page's
    /// newest-first image list.
    pub async fn prepend(
        pool: &PgPool,
        page_id: DbId,
        user_id: DbId,
        url: &str,
    ) -> Result<TopicPageImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO topic_page_images (topic_page_id, user_id, url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TopicPageImage>(&query)
            .bind(page_id)
            .bind(user_id)
            .bind(url)
            .fetch_one(pool)
            .await
    }

    /// List a page's images newest-first, excluding soft-deleted entries.
    pub async fn list_public(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<TopicPageImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topic_page_images
             WHERE topic_page_id = $1 AND deleted = FALSE
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, TopicPageImage>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// List all of a page's images newest-first, including soft-deleted
    /// entries (internal/audit reads).
    pub async fn list_all(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<TopicPageImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topic_page_images
             WHERE topic_page_id = $1
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, TopicPageImage>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of a page's images by id.
    pub async fn find_for_page(
        pool: &PgPool,
        page_id: DbId,
        image_id: DbId,
    ) -> Result<Option<TopicPageImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topic_page_images
             WHERE topic_page_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, TopicPageImage>(&query)
            .bind(page_id)
            .bind(image_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an image. The row keeps its position in the internal
    /// ordering; it is only filtered from public listings.
    pub async fn soft_delete(
        pool: &PgPool,
        page_id: DbId,
        image_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE topic_page_images SET deleted = TRUE
             WHERE topic_page_id = $1 AND id = $2",
        )
        .bind(page_id)
        .bind(image_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
