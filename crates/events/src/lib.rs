//! Muraja domain event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope, addressed to the users
//!   whose open sockets should hear about it.
//! - [`event_types`]: the event names published by the API.

pub mod bus;
pub mod event_types;

pub use bus::{EventBus, EventSource, PlatformEvent};
