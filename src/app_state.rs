//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::dto::Projector;
use crate::service::SnapshotService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Snapshot service for all business logic.
    pub service: Arc<SnapshotService>,
    /// Response projector composing outward-facing payloads.
    pub projector: Arc<Projector>,
}
