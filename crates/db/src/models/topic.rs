//! Topic entity model.

use serde::Serialize;
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// A row from the `topics` table.
///
/// The maintainer is the sole actor authorized to mutate the topic's page.
/// `topic_page_id` is set when the page is lazily created on first read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub maintainer_id: Option<DbId>,
    pub topic_page_id: Option<DbId>,
    pub created_at: Timestamp,
}
