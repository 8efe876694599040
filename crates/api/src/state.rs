use std::sync::Arc;

use quest_core::service::QuestService;

use crate::clock::Clock;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Daily quest operations over the configured key-value store.
    pub service: QuestService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for day bucketing.
    pub clock: Arc<dyn Clock>,
}
