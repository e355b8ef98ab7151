//! Unit tests for `WsManager`.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, scope
//! subscription and delivery, and graceful shutdown behaviour.

use axum::extract::ws::Message;
use inkpress_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() increments the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_increments_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1, vec![]).await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() decrements the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_decrements_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1, vec![]).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1, vec![]).await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1, vec![]).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2, vec![]).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.shutdown_all().await;

    // Connection count should be zero after shutdown.
    assert_eq!(manager.connection_count().await, 0);

    // Both receivers should have received a Close message.
    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(
        matches!(msg1, Message::Close(None)),
        "Expected Close(None), got: {msg1:?}"
    );

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(
        matches!(msg2, Message::Close(None)),
        "Expected Close(None), got: {msg2:?}"
    );

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}

// ---------------------------------------------------------------------------
// Test: send_to_scope() reaches only subscribed connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_scope_reaches_only_subscribers() {
    let manager = WsManager::new();

    let mut rx1 = manager
        .add("conn-1".to_string(), 1, vec!["content:42".to_string()])
        .await;
    let mut rx2 = manager.add("conn-2".to_string(), 2, vec![]).await;

    let sent = manager
        .send_to_scope("content:42", Message::Text("round update".into()))
        .await;
    assert_eq!(sent, 1);

    let msg = rx1.recv().await.expect("subscriber should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "round update"));

    // The non-subscriber's channel stays empty.
    assert!(rx2.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: subscribe_scope() and unsubscribe_scope() change delivery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_and_unsubscribe_scope() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), 1, vec![]).await;

    manager
        .subscribe_scope("conn-1", "content:7".to_string())
        .await;
    let sent = manager
        .send_to_scope("content:7", Message::Text("joined".into()))
        .await;
    assert_eq!(sent, 1);
    let msg = rx.recv().await.expect("should receive after join");
    assert!(matches!(&msg, Message::Text(t) if *t == "joined"));

    manager.unsubscribe_scope("conn-1", "content:7").await;
    let sent = manager
        .send_to_scope("content:7", Message::Text("left".into()))
        .await;
    assert_eq!(sent, 0);
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send_to_user() reaches all of that user's connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_reaches_all_user_connections() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1, vec![]).await;
    let mut rx2 = manager.add("conn-2".to_string(), 1, vec![]).await;
    let mut rx3 = manager.add("conn-3".to_string(), 2, vec![]).await;

    let sent = manager
        .send_to_user(1, Message::Text("for user 1".into()))
        .await;
    assert_eq!(sent, 2);

    assert!(rx1.recv().await.is_some());
    assert!(rx2.recv().await.is_some());
    assert!(rx3.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send_to_scope() skips closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_scope_skips_closed_channels() {
    let manager = WsManager::new();

    let rx1 = manager
        .add("conn-1".to_string(), 1, vec!["organization:3".to_string()])
        .await;
    let mut rx2 = manager
        .add("conn-2".to_string(), 2, vec!["organization:3".to_string()])
        .await;

    // Drop rx1 to close its channel.
    drop(rx1);

    manager
        .send_to_scope("organization:3", Message::Text("still alive".into()))
        .await;

    // conn-2 should still receive the message.
    let msg = rx2.recv().await.expect("rx2 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: adding with duplicate ID replaces the previous connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_id_replaces_previous_connection() {
    let manager = WsManager::new();

    let _rx_old = manager
        .add("conn-1".to_string(), 1, vec!["user:1".to_string()])
        .await;
    assert_eq!(manager.connection_count().await, 1);

    // Re-add with the same ID -- should replace, not duplicate.
    let mut rx_new = manager
        .add("conn-1".to_string(), 1, vec!["user:1".to_string()])
        .await;
    assert_eq!(manager.connection_count().await, 1);

    manager
        .send_to_scope("user:1", Message::Text("replaced".into()))
        .await;
    let msg = rx_new.recv().await.expect("New rx should receive message");
    assert!(matches!(&msg, Message::Text(t) if *t == "replaced"));
}
