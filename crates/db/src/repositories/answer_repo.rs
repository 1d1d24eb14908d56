//! Repository for the `answers` table.
//!
//! The vote toggle is computed by the caller (read-modify-write, no
//! locking); `set_votes` persists whatever membership the caller derived.

use sqlx::PgPool;

use qboard_core::types::{DbId, Timestamp};

use crate::models::answer::{Answer, AnswerFeedRow};

/// Column list for `answers` queries.
const COLUMNS: &str = "id, question_id, author_id, content, votes, deleted, created_at, updated_at";

/// Provides CRUD and vote operations for answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert a new answer.
    pub async fn create(
        pool: &PgPool,
        question_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (question_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find an answer by id. Soft-deleted answers are still returned — the
    /// tombstone hides them from listings, not from direct lookup.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace an answer's content and stamp its update time.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET content = $1, updated_at = now()
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(content)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Soft-delete an answer. Content and votes are preserved.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET deleted = TRUE, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Persist a caller-computed voter set.
    pub async fn set_votes(
        pool: &PgPool,
        id: DbId,
        votes: &[DbId],
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET votes = $1
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(votes)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List non-deleted answers for the feed, joined with the parent
    /// question's entity reference.
    ///
    /// `created_after` is an exclusive lower bound, `created_before` an
    /// inclusive upper bound. The handler passes at most one of the two.
    pub async fn list_feed(
        pool: &PgPool,
        created_after: Option<Timestamp>,
        created_before: Option<Timestamp>,
    ) -> Result<Vec<AnswerFeedRow>, sqlx::Error> {
        let sql = "\
            SELECT a.id, a.question_id, a.author_id, a.content, a.votes, \
                   a.deleted, a.created_at, a.updated_at, \
                   q.entity_id, q.entity_type \
            FROM answers a \
            JOIN questions q ON q.id = a.question_id \
            WHERE a.deleted = FALSE \
              AND ($1::TIMESTAMPTZ IS NULL OR a.created_at > $1) \
              AND ($2::TIMESTAMPTZ IS NULL OR a.created_at <= $2) \
            ORDER BY a.created_at DESC";
        sqlx::query_as::<_, AnswerFeedRow>(sql)
            .bind(created_after)
            .bind(created_before)
            .fetch_all(pool)
            .await
    }
}
