//! Repository for the `messages` table.

use muraja_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message, MessageWithSender};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sender_id, receiver_id, content, attachment_url, attachment_type, \
                        is_read, created_at";

/// Message columns aliased `m` plus the sender's display fields aliased `u`.
const WITH_SENDER: &str = "m.id, m.sender_id, m.receiver_id, m.content, m.attachment_url, \
                            m.attachment_type, m.is_read, m.created_at, \
                            u.name AS sender_name, u.photo_url AS sender_photo_url";

/// Provides CRUD operations for direct messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message and return it joined with the sender's name and photo.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMessage,
    ) -> Result<MessageWithSender, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO messages (sender_id, receiver_id, content, attachment_url, attachment_type)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {COLUMNS}
             )
             SELECT {WITH_SENDER}
             FROM m JOIN users u ON u.id = m.sender_id"
        );
        sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(&input.content)
            .bind(&input.attachment_url)
            .bind(&input.attachment_type)
            .fetch_one(pool)
            .await
    }

    /// Find a message by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Both directions of the conversation between two users, oldest first.
    pub async fn list_conversation(
        pool: &PgPool,
        user_id: DbId,
        other_user_id: DbId,
    ) -> Result<Vec<MessageWithSender>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_SENDER}
             FROM messages m JOIN users u ON u.id = m.sender_id
             WHERE (m.sender_id = $1 AND m.receiver_id = $2)
                OR (m.sender_id = $2 AND m.receiver_id = $1)
             ORDER BY m.created_at, m.id"
        );
        sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(user_id)
            .bind(other_user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every unread message from `sender_id` to `receiver_id` as read.
    ///
    /// Returns the number of messages that changed.
    pub async fn mark_read_from(
        pool: &PgPool,
        sender_id: DbId,
        receiver_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true
             WHERE sender_id = $1 AND receiver_id = $2 AND is_read = false",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count all unread messages addressed to a user.
    pub async fn unread_count(pool: &PgPool, receiver_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = false",
        )
        .bind(receiver_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Delete a message. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
