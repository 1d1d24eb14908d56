//! Related link entity model.

use serde::Serialize;
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// A row from the `related_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RelatedLink {
    pub id: DbId,
    pub topic_page_id: DbId,
    pub user_id: Option<DbId>,
    pub url: String,
    pub title: String,
    pub deleted: bool,
    pub created_at: Timestamp,
}
