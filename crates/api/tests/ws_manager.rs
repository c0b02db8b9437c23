//! Unit tests for `WsManager`.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use axum::extract::ws::Message;
use dressup_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: add/remove track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx1 = manager.add("conn-1".to_string(), None).await;
    let _rx2 = manager.add("conn-2".to_string(), None).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: send_to_session reaches only that session's connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_session_targets_followers_only() {
    let manager = WsManager::new();
    let session = uuid::Uuid::new_v4();

    let mut rx1 = manager.add("conn-1".to_string(), Some(session)).await;
    let mut rx2 = manager.add("conn-2".to_string(), Some(session)).await;
    let mut rx3 = manager.add("conn-3".to_string(), Some(uuid::Uuid::new_v4())).await;
    let mut rx4 = manager.add("conn-4".to_string(), None).await;

    let sent = manager
        .send_to_session(session, Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 2);
    assert_eq!(manager.session_connection_count(session).await, 2);

    assert!(matches!(rx1.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
    assert!(matches!(rx2.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
    assert!(rx3.try_recv().is_err());
    assert!(rx4.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: close_session sends Close and forgets only that session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn close_session_closes_and_forgets_followers() {
    let manager = WsManager::new();
    let session = uuid::Uuid::new_v4();

    let mut rx1 = manager.add("conn-1".to_string(), Some(session)).await;
    let _rx2 = manager.add("conn-2".to_string(), None).await;

    assert_eq!(manager.close_session(session).await, 1);
    assert_eq!(manager.connection_count().await, 1);
    assert_eq!(manager.session_connection_count(session).await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), None).await;
    let mut rx2 = manager.add("conn-2".to_string(), Some(uuid::Uuid::new_v4())).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
    assert!(matches!(rx2.recv().await, Some(Message::Close(None))));
}

// ---------------------------------------------------------------------------
// Test: ping_all sends a Ping to every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_sends_ping() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string(), None).await;

    manager.ping_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
}
