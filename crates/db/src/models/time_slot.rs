//! Weekly time slot model and DTOs.

use muraja_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `time_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub ustaz_id: DbId,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
    pub booked_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a time slot.
#[derive(Debug, Deserialize)]
pub struct CreateTimeSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}
