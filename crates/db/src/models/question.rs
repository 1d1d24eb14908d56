//! Question entity model.

use serde::Serialize;
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// A row from the `questions` table.
///
/// `answer_ids` is the denormalized ordered answer list; the answer create
/// path appends to it in a second write after inserting the answer row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub author_id: Option<DbId>,
    pub entity_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub content: String,
    pub answer_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for inserting a question (used by seeds and tests; questions are
/// created outside the answer subsystem).
#[derive(Debug, Clone)]
pub struct CreateQuestion {
    pub author_id: Option<DbId>,
    pub entity_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub content: String,
}
