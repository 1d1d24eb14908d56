//! Repository for the `questions` table.

use sqlx::PgPool;

use qboard_core::types::DbId;

use crate::models::question::{CreateQuestion, Question};

/// Column list for `questions` queries.
const COLUMNS: &str =
    "id, author_id, entity_id, entity_type, content, answer_ids, created_at, updated_at";

/// Provides read and link operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (author_id, entity_id, entity_type, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.author_id)
            .bind(input.entity_id)
            .bind(&input.entity_type)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a question by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append an answer id to the question's ordered answer list.
    ///
    /// This is the second of the two sequential writes in answer creation;
    /// there is deliberately no transaction spanning both (a crash between
    /// them leaves an unlinked answer, tolerated by the listing logic).
    pub async fn append_answer(
        pool: &PgPool,
        question_id: DbId,
        answer_id: DbId,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "UPDATE questions
             SET answer_ids = array_append(answer_ids, $1), updated_at = now()
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(answer_id)
            .bind(question_id)
            .fetch_one(pool)
            .await
    }
}
