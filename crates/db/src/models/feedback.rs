//! Student feedback and complaint models.
//!
//! Both tables share the same shape, so one row type serves both.

use muraja_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `feedback` or `complaints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentNote {
    pub id: DbId,
    pub student_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A feedback or complaint row joined with the author's name, for admins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentNoteWithAuthor {
    pub id: DbId,
    pub student_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub student_name: String,
    pub student_email: String,
}
