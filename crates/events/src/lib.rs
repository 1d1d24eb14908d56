//! Event bus and best-effort side-effect services.
//!
//! Content-producing handlers publish [`DomainEvent`]s onto the in-process
//! [`EventBus`]; background services subscribed to the bus carry out the
//! fan-out work that must never block or fail the primary response:
//!
//! - [`NotificationFanout`] — persists an in-app notification record and,
//!   when configured and warranted, sends an email to the recipient.
//! - [`SearchIndexSync`] — rebuilds a topic's aggregate search document
//!   after related content changes.
//! - [`delivery`] — the SMTP email channel.

pub mod bus;
pub mod delivery;
pub mod fanout;
pub mod search_sync;

pub use bus::{DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use fanout::NotificationFanout;
pub use search_sync::SearchIndexSync;
