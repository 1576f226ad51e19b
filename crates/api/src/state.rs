use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: muraja_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus for publishing chat and connection events.
    pub event_bus: Arc<muraja_events::EventBus>,
    /// Local storage for avatars and chat attachments.
    pub uploads: Arc<UploadStore>,
}
