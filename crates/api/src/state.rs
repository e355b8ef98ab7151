use std::sync::Arc;

use crate::config::ServerConfig;
use crate::workflow::{ContentWorkflow, MagazineAssembler};
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: inkpress_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing workflow events.
    pub event_bus: Arc<inkpress_events::EventBus>,
    /// Content review workflow engine.
    pub workflow: Arc<ContentWorkflow>,
    /// Magazine assembly and publication engine.
    pub assembler: Arc<MagazineAssembler>,
}
