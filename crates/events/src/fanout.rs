//! Notification fan-out service.
//!
//! Subscribes to the event bus and, for events carrying a `notify` block,
//! writes an in-app notification record and optionally sends an email.
//! Everything here is best-effort: failures are logged and swallowed so
//! they can never reach the request path that published the event.

use serde::Deserialize;
use sqlx::PgPool;
use tokio::sync::broadcast;

use qboard_core::channels::{CHANNEL_EMAIL, CHANNEL_IN_APP};
use qboard_core::types::DbId;
use qboard_db::repositories::NotificationRepo;

use crate::bus::{DomainEvent, ANSWER_CREATED};
use crate::delivery::email::EmailDelivery;

/// The `notify` block a publisher attaches to an event's payload when the
/// recipient should be told about it. Publishers only attach the block
/// when sending is allowed, so its presence is the whole gate here.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyTarget {
    pub recipient_id: DbId,
    /// Missing keeps the fanout in-app only.
    pub recipient_email: Option<String>,
    pub title: String,
    pub body: String,
    /// Client routing data (actor, slug, url, ...).
    #[serde(default)]
    pub data: serde_json::Value,
    /// Relative link for the email call-to-action.
    pub url: Option<String>,
}

/// Persists in-app notifications and dispatches emails for bus events.
pub struct NotificationFanout {
    pool: PgPool,
    mailer: Option<EmailDelivery>,
}

impl NotificationFanout {
    pub fn new(pool: PgPool, mailer: Option<EmailDelivery>) -> Self {
        Self { pool, mailer }
    }

    /// Consume events until the bus closes.
    pub async fn run(self, mut rx: broadcast::Receiver<DomainEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.handle_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification fanout lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!("Notification fanout stopped");
    }

    /// Process a single event. Public so tests can drive the service
    /// without a running bus.
    pub async fn handle_event(&self, event: &DomainEvent) {
        if event.event_type != ANSWER_CREATED {
            return;
        }

        let Some(notify) = event.payload.get("notify") else {
            return;
        };

        let target: NotifyTarget = match serde_json::from_value(notify.clone()) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(error = %err, event_type = %event.event_type,
                    "Malformed notify block on event; skipping fanout");
                return;
            }
        };

        if let Err(err) = NotificationRepo::create(
            &self.pool,
            target.recipient_id,
            CHANNEL_IN_APP,
            &target.title,
            &target.body,
            &target.data,
        )
        .await
        {
            tracing::warn!(error = %err, recipient = target.recipient_id,
                "Failed to persist in-app notification");
        }

        if let (Some(mailer), Some(to_email)) = (&self.mailer, &target.recipient_email) {
            let action_link = target
                .url
                .as_deref()
                .map(|u| format!("{}{u}", mailer.site_base_url()))
                .unwrap_or_default();
            let body = format!("{}\n\nView answer: {action_link}", target.body);

            match mailer.deliver(to_email, &target.title, &body).await {
                Ok(()) => {
                    // Audit row for the email channel.
                    if let Err(err) = NotificationRepo::create(
                        &self.pool,
                        target.recipient_id,
                        CHANNEL_EMAIL,
                        &target.title,
                        &target.body,
                        &target.data,
                    )
                    .await
                    {
                        tracing::warn!(error = %err, recipient = target.recipient_id,
                            "Failed to record email notification");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, recipient = target.recipient_id,
                        "Failed to send notification email");
                }
            }
        }
    }
}
