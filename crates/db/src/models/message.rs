//! Direct message model and DTOs.

use muraja_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub attachment_url: Option<String>,
    pub attachment_type: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A message joined with its sender's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MessageWithSender {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub attachment_url: Option<String>,
    pub attachment_type: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub sender_name: String,
    pub sender_photo_url: Option<String>,
}

/// DTO for inserting a message.
#[derive(Debug)]
pub struct CreateMessage {
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub attachment_url: Option<String>,
    pub attachment_type: Option<String>,
}
