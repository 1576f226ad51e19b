//! HTTP handlers, one module per resource.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod chat;
pub mod schedule;
pub mod student;
pub mod tasks;
pub mod users;
