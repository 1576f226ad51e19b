//! Student-to-ustaz connection model.

use muraja_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `connections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Connection {
    pub id: DbId,
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pending request as the ustaz sees it: the student's details plus the
/// connection id needed to answer it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingRequest {
    pub connection_id: DbId,
    pub requested_at: Timestamp,
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}
