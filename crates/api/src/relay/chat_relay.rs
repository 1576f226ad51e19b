//! Routes platform events to the rooms of their recipients.

use std::sync::Arc;

use muraja_events::event_types;
use muraja_events::PlatformEvent;
use tokio::sync::broadcast;

use crate::ws::protocol;
use crate::ws::WsManager;

/// Consumes events from the bus and delivers them as socket frames.
pub struct ChatRelay {
    ws_manager: Arc<WsManager>,
}

impl ChatRelay {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the relay loop.
    ///
    /// Exits when the channel is closed, i.e. when the
    /// [`EventBus`](muraja_events::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let delivered = self.deliver(&event).await;
                    tracing::debug!(
                        event_type = %event.event_type,
                        recipients = event.recipients.len(),
                        delivered,
                        "Relayed event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Chat relay lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, chat relay shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event to every recipient's room. Returns the number of
    /// sockets reached.
    pub async fn deliver(&self, event: &PlatformEvent) -> usize {
        let Some(frame_event) = frame_event_for(&event.event_type) else {
            tracing::debug!(event_type = %event.event_type, "No socket frame for event");
            return 0;
        };

        let mut delivered = 0;
        for &user_id in &event.recipients {
            let msg = protocol::frame(frame_event, event.payload.clone());
            delivered += self.ws_manager.send_to_user(user_id, msg).await;
        }
        delivered
    }
}

/// Socket frame name for a bus event type. `None` for events clients do
/// not subscribe to.
pub fn frame_event_for(event_type: &str) -> Option<&'static str> {
    match event_type {
        event_types::MESSAGE_SENT => Some(protocol::RECEIVE_MESSAGE),
        event_types::MESSAGE_DELETED => Some("message_deleted"),
        event_types::MESSAGES_READ => Some("messages_read"),
        event_types::CONNECTION_REQUESTED => Some("connection_request"),
        event_types::CONNECTION_UPDATED => Some("connection_updated"),
        event_types::TASK_ASSIGNED => Some("task_assigned"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ws::Message;
    use muraja_core::chat::room_for;
    use muraja_events::EventBus;
    use serde_json::{json, Value};

    fn parse(msg: Message) -> Value {
        match msg {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    #[test]
    fn frame_names() {
        assert_eq!(frame_event_for("chat.message_sent"), Some("receive_message"));
        assert_eq!(frame_event_for("connection.requested"), Some("connection_request"));
        assert_eq!(frame_event_for("something.else"), None);
    }

    #[tokio::test]
    async fn delivers_only_to_joined_recipient_rooms() {
        let manager = Arc::new(WsManager::new());
        let mut receiver_rx = manager.add("a".into(), Some(2)).await;
        manager.join("a", &room_for(2)).await;
        let mut bystander_rx = manager.add("b".into(), Some(3)).await;
        manager.join("b", &room_for(3)).await;

        let relay = ChatRelay::new(Arc::clone(&manager));
        let event = PlatformEvent::new(event_types::MESSAGE_SENT)
            .with_actor(1)
            .with_recipients([2])
            .with_payload(json!({"id": 10, "content": "salam"}));

        assert_eq!(relay.deliver(&event).await, 1);
        let frame = parse(receiver_rx.try_recv().unwrap());
        assert_eq!(frame["event"], "receive_message");
        assert_eq!(frame["data"]["content"], "salam");
        assert!(bystander_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unjoined_connection_hears_nothing() {
        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("a".into(), Some(2)).await;
        let relay = ChatRelay::new(Arc::clone(&manager));

        let event = PlatformEvent::new(event_types::MESSAGES_READ).with_recipients([2]);
        assert_eq!(relay.deliver(&event).await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn run_stops_when_bus_is_dropped() {
        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("a".into(), Some(5)).await;
        manager.join("a", &room_for(5)).await;

        let bus = EventBus::default();
        let handle = tokio::spawn(ChatRelay::new(Arc::clone(&manager)).run(bus.subscribe()));

        bus.publish(
            PlatformEvent::new(event_types::CONNECTION_UPDATED)
                .with_recipients([5])
                .with_payload(json!({"status": "ACCEPTED"})),
        );
        drop(bus);
        handle.await.unwrap();

        let frame = parse(rx.recv().await.unwrap());
        assert_eq!(frame["event"], "connection_updated");
        assert_eq!(frame["data"]["status"], "ACCEPTED");
    }
}
