//! Periodic removal of idle styling sessions.
//!
//! A session is idle when nothing has read or written it for the configured
//! timeout and no WebSocket client is following it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::sessions::SessionManager;
use crate::ws::WsManager;

/// Run the reaper loop until `cancel` is triggered.
pub async fn run(
    sessions: Arc<SessionManager>,
    ws_manager: Arc<WsManager>,
    idle_timeout: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        idle_timeout_secs = idle_timeout.as_secs(),
        interval_secs = interval.as_secs(),
        "Session reaper started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session reaper stopping");
                break;
            }
            _ = ticker.tick() => {
                let reaped = reap_once(&sessions, &ws_manager, idle_timeout).await;
                if reaped > 0 {
                    tracing::info!(reaped, "Reaped idle sessions");
                }
            }
        }
    }
}

/// One pass: remove every idle, unwatched session. Returns how many went.
pub async fn reap_once(
    sessions: &SessionManager,
    ws_manager: &WsManager,
    idle_timeout: Duration,
) -> usize {
    let Ok(idle) = chrono::Duration::from_std(idle_timeout) else {
        tracing::warn!("Idle timeout out of range, skipping reap");
        return 0;
    };
    let cutoff = Utc::now() - idle;

    let mut reaped = 0;
    for session_id in sessions.idle_since(cutoff).await {
        if ws_manager.session_connection_count(session_id).await > 0 {
            continue;
        }
        if sessions.remove_if_idle(session_id, cutoff).await {
            tracing::debug!(%session_id, "Session reaped");
            reaped += 1;
        }
    }
    reaped
}
