//! Repository for the `tasks` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskWithNames, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, is_completed, student_id, ustaz_id, created_at, updated_at";

/// Task columns aliased `t` joined with both parties' names.
const WITH_NAMES: &str = "SELECT t.id, t.title, t.description, t.is_completed, t.student_id, \
                          t.ustaz_id, t.created_at, t.updated_at, \
                          s.name AS student_name, u.name AS ustaz_name \
                          FROM tasks t \
                          JOIN users s ON s.id = t.student_id \
                          JOIN users u ON u.id = t.ustaz_id";

/// Provides CRUD operations for memorization tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, student_id, ustaz_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.student_id)
            .bind(input.ustaz_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tasks assigned to a student, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<TaskWithNames>, sqlx::Error> {
        let query =
            format!("{WITH_NAMES} WHERE t.student_id = $1 ORDER BY t.created_at DESC, t.id DESC");
        sqlx::query_as::<_, TaskWithNames>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Tasks created by an ustaz, newest first.
    pub async fn list_for_ustaz(
        pool: &PgPool,
        ustaz_id: DbId,
    ) -> Result<Vec<TaskWithNames>, sqlx::Error> {
        let query =
            format!("{WITH_NAMES} WHERE t.ustaz_id = $1 ORDER BY t.created_at DESC, t.id DESC");
        sqlx::query_as::<_, TaskWithNames>(&query)
            .bind(ustaz_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_completed = COALESCE($4, is_completed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }
}
