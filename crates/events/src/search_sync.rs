//! Search index synchronization service.
//!
//! Rebuilds a topic's aggregate search document whenever a bus event
//! signals that related content changed. Best-effort by contract: a failed
//! reindex is logged and the next content change will repair the document.

use sqlx::PgPool;
use tokio::sync::broadcast;

use qboard_db::repositories::SearchRepo;

use crate::bus::{DomainEvent, ANSWER_CREATED, ANSWER_UPDATED, TOPIC_PAGE_UPDATED};

/// Keeps `topic_search_documents` in step with content changes.
pub struct SearchIndexSync {
    pool: PgPool,
}

impl SearchIndexSync {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Consume events until the bus closes.
    pub async fn run(self, mut rx: broadcast::Receiver<DomainEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.handle_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Search sync lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!("Search index sync stopped");
    }

    /// Process a single event. Public so tests can drive the service
    /// without a running bus.
    pub async fn handle_event(&self, event: &DomainEvent) {
        let relevant = matches!(
            event.event_type.as_str(),
            ANSWER_CREATED | ANSWER_UPDATED | TOPIC_PAGE_UPDATED
        );
        if !relevant {
            return;
        }

        // Events for questions without a resolvable topic carry no topic_id.
        let Some(topic_id) = event.topic_id() else {
            return;
        };

        if let Err(err) = SearchRepo::reindex_topic(&self.pool, topic_id).await {
            tracing::warn!(error = %err, topic_id, event_type = %event.event_type,
                "Failed to reindex topic search document");
        }
    }
}
