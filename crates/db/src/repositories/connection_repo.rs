//! Repository for the `connections` table.

use muraja_core::connection::{STATUS_ACCEPTED, STATUS_PENDING};
use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::connection::{Connection, PendingRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, ustaz_id, status, created_at, updated_at";

/// Provides CRUD operations for student-to-ustaz connections.
pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Insert a new `PENDING` request.
    ///
    /// A duplicate (student, ustaz) pair violates `uq_connections_student_ustaz`.
    pub async fn create_request(
        pool: &PgPool,
        student_id: DbId,
        ustaz_id: DbId,
    ) -> Result<Connection, sqlx::Error> {
        let query = format!(
            "INSERT INTO connections (student_id, ustaz_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(student_id)
            .bind(ustaz_id)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a connection by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Connection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM connections WHERE id = $1");
        sqlx::query_as::<_, Connection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the connection between a student and an ustaz, in any status.
    pub async fn find_by_pair(
        pool: &PgPool,
        student_id: DbId,
        ustaz_id: DbId,
    ) -> Result<Option<Connection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM connections WHERE student_id = $1 AND ustaz_id = $2");
        sqlx::query_as::<_, Connection>(&query)
            .bind(student_id)
            .bind(ustaz_id)
            .fetch_optional(pool)
            .await
    }

    /// `true` when the student and ustaz have an accepted connection.
    pub async fn is_accepted(
        pool: &PgPool,
        student_id: DbId,
        ustaz_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM connections
                WHERE student_id = $1 AND ustaz_id = $2 AND status = $3
             )",
        )
        .bind(student_id)
        .bind(ustaz_id)
        .bind(STATUS_ACCEPTED)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// All connections where the user is the student, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Connection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM connections WHERE student_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Pending requests addressed to an ustaz, oldest first, with student details.
    pub async fn list_pending_for_ustaz(
        pool: &PgPool,
        ustaz_id: DbId,
    ) -> Result<Vec<PendingRequest>, sqlx::Error> {
        sqlx::query_as::<_, PendingRequest>(
            "SELECT c.id AS connection_id, c.created_at AS requested_at,
                    u.id, u.name, u.email, u.category, u.photo_url, u.location, u.bio
             FROM connections c
             JOIN users u ON u.id = c.student_id
             WHERE c.ustaz_id = $1 AND c.status = $2
             ORDER BY c.created_at, c.id",
        )
        .bind(ustaz_id)
        .bind(STATUS_PENDING)
        .fetch_all(pool)
        .await
    }

    /// Move a connection out of `PENDING`.
    ///
    /// The update only applies while the row is still pending, so two racing
    /// decisions cannot both succeed. Returns `None` when nothing changed.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Connection>, sqlx::Error> {
        let query = format!(
            "UPDATE connections SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(id)
            .bind(status)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }
}
