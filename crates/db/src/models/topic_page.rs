//! Topic page entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use qboard_core::types::{DbId, Timestamp};

/// Placeholder body for lazily created pages.
pub const PLACEHOLDER_CONTENT: &str = "This is an initial template for your topic page.";

/// A row from the `topic_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicPage {
    pub id: DbId,
    pub topic_id: DbId,
    pub content: String,
    pub logo: Option<String>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `PUT /topicpages/{slug}`.
///
/// `content` and `logo` are applied only when present — a partial patch
/// never wipes existing values. `published` defaults to `false` when
/// absent, so publish/unpublish callers must pre-set it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTopicPage {
    pub content: Option<String>,
    pub logo: Option<String>,
    pub published: Option<bool>,
    /// Revision event name; anything unrecognized records a generic edit.
    pub event: Option<String>,
}

/// A row from the append-only `topic_page_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionEvent {
    pub id: DbId,
    pub topic_page_id: DbId,
    pub user_id: DbId,
    pub event: String,
    pub created_at: Timestamp,
}

/// A row from the `topic_page_images` table.
///
/// Listings read newest-first; soft-deleted rows are filtered from public
/// reads but retained for audit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicPageImage {
    pub id: DbId,
    pub topic_page_id: DbId,
    pub user_id: DbId,
    pub url: String,
    pub deleted: bool,
    pub created_at: Timestamp,
}

/// DTO for `POST /topicpages/{slug}/images/sign`.
#[derive(Debug, Deserialize)]
pub struct SignImageUpload {
    #[serde(rename = "fileType")]
    pub file_type: String,
}
