use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use dressup_core::types::SessionId;
use futures::{SinkExt, StreamExt};

use crate::error::AppResult;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// GET /api/v1/sessions/{id}/ws
///
/// Upgrades to a WebSocket that receives the session's notifications.
/// The session must exist at upgrade time.
pub async fn session_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    state.sessions.get(session_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, session_id, state.ws_manager)))
}

/// Drive one connection: forward queued notifications to the sink and
/// drain inbound frames until the client goes away.
async fn handle_socket(socket: WebSocket, session_id: SessionId, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, %session_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), Some(session_id)).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
            if closing {
                break;
            }
        }
    });

    // Clients only listen; inbound frames other than Close are ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, %session_id, "WebSocket disconnected");
}
