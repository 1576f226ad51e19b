//! Repository for the `time_slots` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_slot::{CreateTimeSlot, TimeSlot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ustaz_id, day, start_time, end_time, is_booked, booked_by, created_at";

/// Orders rows Monday first, then by start time. `HH:MM` sorts lexically.
const WEEK_ORDER: &str = "ORDER BY array_position(
        ARRAY['Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday', 'Saturday', 'Sunday'],
        day
    ), start_time, id";

/// Provides CRUD operations for an ustaz's weekly availability.
pub struct TimeSlotRepo;

impl TimeSlotRepo {
    /// Insert a new unbooked slot for an ustaz.
    pub async fn create(
        pool: &PgPool,
        ustaz_id: DbId,
        input: &CreateTimeSlot,
    ) -> Result<TimeSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_slots (ustaz_id, day, start_time, end_time)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(ustaz_id)
            .bind(&input.day)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .fetch_one(pool)
            .await
    }

    /// Find a slot by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_slots WHERE id = $1");
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List slots in week order, optionally restricted to one ustaz.
    pub async fn list(
        pool: &PgPool,
        ustaz_id: Option<DbId>,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_slots
             WHERE ($1::BIGINT IS NULL OR ustaz_id = $1)
             {WEEK_ORDER}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(ustaz_id)
            .fetch_all(pool)
            .await
    }

    /// Claim a free slot for a student.
    ///
    /// Only succeeds while the slot is unbooked. Returns `None` when the slot
    /// is missing or already taken.
    pub async fn book(
        pool: &PgPool,
        id: DbId,
        student_id: DbId,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots SET is_booked = true, booked_by = $2
             WHERE id = $1 AND is_booked = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
