//! Fan-out of domain events to in-process listeners.
//!
//! Handlers publish a [`PlatformEvent`] after a write commits; the chat relay
//! subscribes and forwards each event to the sockets of its recipients.

use chrono::{DateTime, Utc};
use muraja_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 1024;

/// The row an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSource {
    /// Table-like kind, e.g. `"message"` or `"connection"`.
    pub kind: String,
    pub id: DbId,
}

/// Something that happened, and who should hear about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// One of the names in [`crate::event_types`].
    pub event_type: String,
    pub source: Option<EventSource>,
    /// User whose request caused the event.
    pub actor_id: Option<DbId>,
    /// Users whose live connections receive the event, without duplicates.
    pub recipients: Vec<DbId>,
    /// Forwarded verbatim as the `data` of the socket frame.
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source: None,
            actor_id: None,
            recipients: Vec::new(),
            payload: serde_json::Value::Object(Default::default()),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_source(mut self, kind: impl Into<String>, id: DbId) -> Self {
        self.source = Some(EventSource {
            kind: kind.into(),
            id,
        });
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_id = Some(user_id);
        self
    }

    /// Add recipients, skipping ids already present.
    pub fn with_recipients(mut self, users: impl IntoIterator<Item = DbId>) -> Self {
        for id in users {
            if !self.recipients.contains(&id) {
                self.recipients.push(id);
            }
        }
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Serialize `data` as the payload. A value that cannot be represented
    /// as JSON leaves an empty payload and is logged.
    pub fn with_data<T: Serialize>(self, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(payload) => self.with_payload(payload),
            Err(e) => {
                tracing::warn!(event_type = %self.event_type, error = %e, "Unserializable event payload");
                self
            }
        }
    }

    pub fn is_for(&self, user_id: DbId) -> bool {
        self.recipients.contains(&user_id)
    }
}

/// Broadcast hub shared as `Arc<EventBus>`.
///
/// Every subscriber sees every event. A subscriber that falls more than the
/// channel capacity behind gets `RecvError::Lagged` and skips ahead.
///
/// ```rust
/// use muraja_events::bus::{EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
/// bus.publish(PlatformEvent::new("chat.message_sent").with_recipients([2]));
/// assert!(rx.try_recv().unwrap().is_for(2));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Hand the event to all current subscribers. Returns how many there were.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        let event_type = event.event_type.clone();
        match self.sender.send(event) {
            Ok(listeners) => listeners,
            Err(_) => {
                tracing::debug!(%event_type, "Event published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
