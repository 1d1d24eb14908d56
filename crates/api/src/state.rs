use std::sync::Arc;

use qboard_cloud::signer::UploadSigner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: qboard_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<qboard_events::EventBus>,
    /// Presigned-URL signer for topic page image uploads.
    pub signer: Arc<dyn UploadSigner>,
}
