//! Event-bus to WebSocket delivery.
//!
//! The [`ChatRelay`] subscribes to the event bus and pushes each event to the
//! rooms of the users it is addressed to.

pub mod chat_relay;

pub use chat_relay::ChatRelay;
