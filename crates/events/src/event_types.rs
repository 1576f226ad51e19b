//! Dot-separated event names carried in [`PlatformEvent::event_type`](crate::PlatformEvent).
//!
//! The same strings are used as the `event` field of the frames pushed to
//! WebSocket clients.

/// A direct message was stored. Payload: the message with sender details.
pub const MESSAGE_SENT: &str = "chat.message_sent";

/// A message was deleted by its sender. Payload: `{ "id", "sender_id", "receiver_id" }`.
pub const MESSAGE_DELETED: &str = "chat.message_deleted";

/// A conversation was opened and its messages marked read.
/// Payload: `{ "reader_id", "sender_id", "count" }`.
pub const MESSAGES_READ: &str = "chat.messages_read";

/// A student asked an ustaz to connect. Payload: the connection row.
pub const CONNECTION_REQUESTED: &str = "connection.requested";

/// An ustaz accepted or rejected a request. Payload: the connection row.
pub const CONNECTION_UPDATED: &str = "connection.updated";

/// A task was assigned to a student. Payload: the task row.
pub const TASK_ASSIGNED: &str = "task.assigned";
