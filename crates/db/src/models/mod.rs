//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Joined read models where a list endpoint needs a counterpart's name

pub mod attendance;
pub mod connection;
pub mod feedback;
pub mod message;
pub mod session;
pub mod task;
pub mod time_slot;
pub mod user;
