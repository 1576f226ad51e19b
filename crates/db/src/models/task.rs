//! Memorization task model and DTOs.

use muraja_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task with the names of both parties.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithNames {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub student_id: DbId,
    pub ustaz_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub student_name: String,
    pub ustaz_name: String,
}

/// DTO for creating a task.
#[derive(Debug)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub student_id: DbId,
    pub ustaz_id: DbId,
}

/// DTO for updating a task. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}
