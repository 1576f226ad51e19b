//! Repository for the `users` table.

use muraja_core::connection::STATUS_ACCEPTED;
use muraja_core::roles::{ROLE_STUDENT, ROLE_USTAZ};
use muraja_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{
    AdminUserRow, Contact, CreateUser, PublicUstazCard, UpdateProfile, User, UstazCard,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, category, assigned_ustaz_id, \
                        photo_url, previous_photo_url, location, education_level, bio, \
                        phone_number, last_seen_at, failed_login_count, locked_until, \
                        created_at, updated_at";

/// Columns of the accepted counterpart in a contact list, aliased `u`.
/// `$1` is the viewer whose unread messages are counted.
const CONTACT_COLUMNS: &str = "u.id, u.name, u.email, u.role, u.category, u.photo_url, u.bio, \
                                u.location, u.phone_number, u.last_seen_at, \
                                c.id AS connection_id, \
                                (SELECT COUNT(*) FROM messages m \
                                  WHERE m.sender_id = u.id AND m.receiver_id = $1 \
                                    AND m.is_read = false) AS unread_count";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List every user for the admin table, newest first.
    pub async fn list_for_admin(pool: &PgPool) -> Result<Vec<AdminUserRow>, sqlx::Error> {
        sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, name, email, role, category, assigned_ustaz_id, created_at
             FROM users ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List all ustaz as discovery cards, ordered by name.
    pub async fn list_ustaz(pool: &PgPool) -> Result<Vec<UstazCard>, sqlx::Error> {
        sqlx::query_as::<_, UstazCard>(
            "SELECT id, name, photo_url, bio, location, education_level
             FROM users WHERE role = $1 ORDER BY name, id",
        )
        .bind(ROLE_USTAZ)
        .fetch_all(pool)
        .await
    }

    /// List all ustaz with accepted-student and free-slot counts.
    pub async fn list_public_ustaz(pool: &PgPool) -> Result<Vec<PublicUstazCard>, sqlx::Error> {
        sqlx::query_as::<_, PublicUstazCard>(
            "SELECT u.id, u.name, u.photo_url, u.bio, u.location, u.education_level,
                    (SELECT COUNT(*) FROM connections c
                      WHERE c.ustaz_id = u.id AND c.status = $2) AS student_count,
                    (SELECT COUNT(*) FROM time_slots t
                      WHERE t.ustaz_id = u.id AND t.is_booked = false) AS free_slots
             FROM users u
             WHERE u.role = $1
             ORDER BY u.name, u.id",
        )
        .bind(ROLE_USTAZ)
        .bind(STATUS_ACCEPTED)
        .fetch_all(pool)
        .await
    }

    /// Accepted students of an ustaz, each with their unread count towards the ustaz.
    pub async fn list_students_of(
        pool: &PgPool,
        ustaz_id: DbId,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS}
             FROM connections c
             JOIN users u ON u.id = c.student_id
             WHERE c.ustaz_id = $1 AND c.status = $2
             ORDER BY u.name, u.id"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(ustaz_id)
            .bind(STATUS_ACCEPTED)
            .fetch_all(pool)
            .await
    }

    /// Accepted ustaz of a student, each with their unread count towards the student.
    pub async fn list_ustaz_of(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS}
             FROM connections c
             JOIN users u ON u.id = c.ustaz_id
             WHERE c.student_id = $1 AND c.status = $2
             ORDER BY u.name, u.id"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(student_id)
            .bind(STATUS_ACCEPTED)
            .fetch_all(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied;
    /// `input.photos`, when set, replaces both photo columns in the same row write.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                education_level = COALESCE($4, education_level),
                bio = COALESCE($5, bio),
                phone_number = COALESCE($6, phone_number),
                photo_url = CASE WHEN $7 THEN $8 ELSE photo_url END,
                previous_photo_url = CASE WHEN $7 THEN $9 ELSE previous_photo_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let photos = input.photos.as_ref();
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.education_level)
            .bind(&input.bio)
            .bind(&input.phone_number)
            .bind(photos.is_some())
            .bind(photos.and_then(|p| p.current.as_deref()))
            .bind(photos.and_then(|p| p.previous.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the current and previous photo URLs.
    pub async fn set_photos(
        pool: &PgPool,
        id: DbId,
        photo_url: Option<&str>,
        previous_photo_url: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET photo_url = $2, previous_photo_url = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(photo_url)
            .bind(previous_photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Point a student at their assigned ustaz. Returns `None` if the student
    /// does not exist or is not a student.
    pub async fn assign_ustaz(
        pool: &PgPool,
        student_id: DbId,
        ustaz_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET assigned_ustaz_id = $2
             WHERE id = $1 AND role = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(student_id)
            .bind(ustaz_id)
            .bind(ROLE_STUDENT)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Dependent rows cascade. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp `last_seen_at = NOW()`. Returns `false` if the user no longer exists.
    pub async fn touch_last_seen(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_seen_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a user account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_seen_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_seen_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
