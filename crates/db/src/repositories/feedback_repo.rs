//! Repository for the `feedback` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{StudentNote, StudentNoteWithAuthor};

/// Provides create and list operations for student feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Store a feedback entry written by a student.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        content: &str,
    ) -> Result<StudentNote, sqlx::Error> {
        sqlx::query_as::<_, StudentNote>(
            "INSERT INTO feedback (student_id, content)
             VALUES ($1, $2)
             RETURNING id, student_id, content, created_at",
        )
        .bind(student_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// All feedback with author details, newest first.
    pub async fn list_with_author(
        pool: &PgPool,
    ) -> Result<Vec<StudentNoteWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, StudentNoteWithAuthor>(
            "SELECT f.id, f.student_id, f.content, f.created_at,
                    u.name AS student_name, u.email AS student_email
             FROM feedback f
             JOIN users u ON u.id = f.student_id
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
