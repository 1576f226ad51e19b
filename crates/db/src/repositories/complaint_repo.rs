//! Repository for the `complaints` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{StudentNote, StudentNoteWithAuthor};

pub struct ComplaintRepo;

impl ComplaintRepo {
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        content: &str,
    ) -> Result<StudentNote, sqlx::Error> {
        sqlx::query_as::<_, StudentNote>(
            "INSERT INTO complaints (student_id, content)
             VALUES ($1, $2)
             RETURNING id, student_id, content, created_at",
        )
        .bind(student_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// All complaints with author details, newest first.
    pub async fn list_with_author(
        pool: &PgPool,
    ) -> Result<Vec<StudentNoteWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, StudentNoteWithAuthor>(
            "SELECT c.id, c.student_id, c.content, c.created_at,
                    u.name AS student_name, u.email AS student_email
             FROM complaints c
             JOIN users u ON u.id = c.student_id
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
