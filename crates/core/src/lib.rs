//! Domain rules for the Muraja platform.
//!
//! This crate has zero internal dependencies so both the repository layer
//! and the API layer can share the same validation and status vocabulary.

pub mod attendance;
pub mod chat;
pub mod connection;
pub mod error;
pub mod presence;
pub mod profile;
pub mod roles;
pub mod schedule;
pub mod types;
pub mod uploads;
