//! Repository for the `attendance` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{Attendance, AttendanceWithName, CreateAttendance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, ustaz_id, date, status, remarks, created_at";

/// Provides create and list operations for attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record a session's attendance.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (student_id, ustaz_id, date, status, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.student_id)
            .bind(input.ustaz_id)
            .bind(input.date)
            .bind(&input.status)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    /// A student's attendance history with each ustaz's name, most recent first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<AttendanceWithName>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceWithName>(
            "SELECT a.id, a.student_id, a.ustaz_id, a.date, a.status, a.remarks, a.created_at,
                    u.name AS counterpart_name
             FROM attendance a
             JOIN users u ON u.id = a.ustaz_id
             WHERE a.student_id = $1
             ORDER BY a.date DESC, a.id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Attendance recorded by an ustaz with each student's name, most recent first.
    pub async fn list_for_ustaz(
        pool: &PgPool,
        ustaz_id: DbId,
    ) -> Result<Vec<AttendanceWithName>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceWithName>(
            "SELECT a.id, a.student_id, a.ustaz_id, a.date, a.status, a.remarks, a.created_at,
                    u.name AS counterpart_name
             FROM attendance a
             JOIN users u ON u.id = a.student_id
             WHERE a.ustaz_id = $1
             ORDER BY a.date DESC, a.id DESC",
        )
        .bind(ustaz_id)
        .fetch_all(pool)
        .await
    }
}
