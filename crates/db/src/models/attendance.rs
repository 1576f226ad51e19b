//! Attendance record model and DTOs.

use muraja_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub date: Timestamp,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
}

/// An attendance record with the other party's name (the ustaz for a
/// student viewer, the student for an ustaz viewer).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceWithName {
    pub id: DbId,
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub date: Timestamp,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub counterpart_name: String,
}

/// DTO for recording attendance.
#[derive(Debug)]
pub struct CreateAttendance {
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub date: Timestamp,
    pub status: String,
    pub remarks: Option<String>,
}
