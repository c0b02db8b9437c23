use std::sync::Arc;

use dressup_core::DressUpEngine;

use crate::config::ServerConfig;
use crate::sessions::SessionManager;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Placement rules over the read-only catalog.
    pub engine: Arc<DressUpEngine>,
    /// Open styling sessions.
    pub sessions: Arc<SessionManager>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus for avatar notifications.
    pub event_bus: Arc<dressup_events::EventBus>,
}
