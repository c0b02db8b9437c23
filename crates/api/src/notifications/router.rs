use std::sync::Arc;

use axum::extract::ws::Message;
use dressup_events::{AvatarEvent, Notification};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Wire frame sent to session WebSocket clients.
#[derive(Debug, Serialize)]
pub struct NotificationFrame<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub event_type: &'a str,
    pub item_id: Option<&'a str>,
    pub notification: Notification,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<'a> NotificationFrame<'a> {
    /// Frame for `event`, or `None` when the event is not user-visible.
    pub fn for_event(event: &'a AvatarEvent) -> Option<Self> {
        Some(Self {
            kind: "notification",
            event_type: &event.event_type,
            item_id: event.item_id.as_deref(),
            notification: Notification::from_event(event)?,
            timestamp: event.timestamp,
        })
    }
}

/// Forwards avatar events to the owning session's live connections.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run until the event bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<AvatarEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(&self, event: &AvatarEvent) {
        let Some(frame) = NotificationFrame::for_event(event) else {
            return;
        };

        let text = match serde_json::to_string(&frame) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Failed to encode notification");
                return;
            }
        };

        let delivered = self
            .ws_manager
            .send_to_session(event.session_id, Message::Text(text.into()))
            .await;
        tracing::debug!(
            session_id = %event.session_id,
            event_type = %event.event_type,
            delivered,
            "Notification routed"
        );
    }
}
