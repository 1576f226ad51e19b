//! Unit tests for `WsManager`.
//!
//! These exercise the connection registry directly, without performing any
//! HTTP upgrades: add/remove semantics, room delivery, and shutdown.

use axum::extract::ws::Message;
use muraja_api::ws::WsManager;
use muraja_core::chat::room_for;

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx1 = manager.add("conn-1".to_string(), Some(1)).await;
    let _rx2 = manager.add("conn-2".to_string(), Some(2)).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn room_delivery_requires_join() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string(), Some(5)).await;

    // Registered but not joined: nothing arrives.
    assert_eq!(manager.send_to_user(5, Message::Text("early".into())).await, 0);
    assert!(rx.try_recv().is_err());

    assert!(manager.join("conn-1", &room_for(5)).await);
    assert_eq!(manager.send_to_user(5, Message::Text("hello".into())).await, 1);
    assert_eq!(rx.try_recv().unwrap(), Message::Text("hello".into()));
}

#[tokio::test]
async fn every_tab_of_a_user_receives_room_messages() {
    let manager = WsManager::new();
    let mut tab1 = manager.add("tab-1".to_string(), Some(9)).await;
    let mut tab2 = manager.add("tab-2".to_string(), Some(9)).await;
    let mut other = manager.add("other".to_string(), Some(10)).await;
    for conn in ["tab-1", "tab-2"] {
        manager.join(conn, &room_for(9)).await;
    }
    manager.join("other", &room_for(10)).await;

    let mut tabs = manager.get_by_user(9).await;
    tabs.sort();
    assert_eq!(tabs, vec!["tab-1".to_string(), "tab-2".to_string()]);

    let sent = manager.send_to_user(9, Message::Text("salam".into())).await;
    assert_eq!(sent, 2);
    assert!(tab1.try_recv().is_ok());
    assert!(tab2.try_recv().is_ok());
    assert!(other.try_recv().is_err());
}

#[tokio::test]
async fn join_unknown_connection_fails() {
    let manager = WsManager::new();
    assert!(!manager.join("ghost", &room_for(1)).await);
}

#[tokio::test]
async fn closed_channels_are_skipped() {
    let manager = WsManager::new();
    let rx_dead = manager.add("dead".to_string(), Some(3)).await;
    let mut rx_live = manager.add("live".to_string(), Some(3)).await;
    manager.join("dead", &room_for(3)).await;
    manager.join("live", &room_for(3)).await;
    drop(rx_dead);

    assert_eq!(manager.send_to_user(3, Message::Text("x".into())).await, 1);
    assert!(rx_live.try_recv().is_ok());
}

#[tokio::test]
async fn direct_send_targets_one_connection() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string(), Some(1)).await;

    assert!(manager.send_to_connection("conn-1", Message::Text("ack".into())).await);
    assert!(!manager.send_to_connection("conn-2", Message::Text("ack".into())).await);
    assert_eq!(rx.try_recv().unwrap(), Message::Text("ack".into()));
}

#[tokio::test]
async fn ping_all_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string(), Some(1)).await;
    let mut rx2 = manager.add("conn-2".to_string(), None).await;

    manager.ping_all().await;

    assert!(matches!(rx1.try_recv().unwrap(), Message::Ping(_)));
    assert!(matches!(rx2.try_recv().unwrap(), Message::Ping(_)));
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string(), Some(1)).await;
    let mut rx2 = manager.add("conn-2".to_string(), Some(2)).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert_eq!(rx1.try_recv().unwrap(), Message::Close(None));
    assert_eq!(rx2.try_recv().unwrap(), Message::Close(None));
}
