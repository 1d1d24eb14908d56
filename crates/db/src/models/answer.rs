//! Answer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// A row from the `answers` table.
///
/// `votes` is the ordered voter set — a user id appears at most once.
/// `deleted` is a soft-delete tombstone; the row and its votes persist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub votes: Vec<DbId>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /answers`.
#[derive(Debug, Deserialize)]
pub struct CreateAnswer {
    /// Parent question id.
    pub question: Option<DbId>,
    pub content: Option<String>,
}

/// DTO for `PUT /answers/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAnswer {
    pub content: Option<String>,
}

/// Query parameters for the feed listing.
///
/// The date bounds are mutually exclusive; when both are supplied only
/// `created_after` is applied.
#[derive(Debug, Deserialize)]
pub struct AnswerFeedQuery {
    /// Exclusive lower bound on creation time.
    #[serde(rename = "createdAfter")]
    pub created_after: Option<Timestamp>,
    /// Inclusive upper bound on creation time.
    #[serde(rename = "createdAtBefore")]
    pub created_at_before: Option<Timestamp>,
}

/// An answer joined with its parent question's entity reference, as
/// returned by the feed listing query.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerFeedRow {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub votes: Vec<DbId>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub entity_id: Option<DbId>,
    pub entity_type: Option<String>,
}
