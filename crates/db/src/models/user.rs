//! User entity model and DTOs.

use muraja_core::profile::PhotoPair;
use muraja_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub category: Option<String>,
    pub assigned_ustaz_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub previous_photo_url: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub last_seen_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash or lockout state).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub category: Option<String>,
    pub assigned_ustaz_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub previous_photo_url: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            category: user.category,
            assigned_ustaz_id: user.assigned_ustaz_id,
            photo_url: user.photo_url,
            previous_photo_url: user.previous_photo_url,
            location: user.location,
            education_level: user.education_level,
            bio: user.bio,
            phone_number: user.phone_number,
            last_seen_at: user.last_seen_at,
            created_at: user.created_at,
        }
    }
}

/// Public profile card for an ustaz in the discovery list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UstazCard {
    pub id: DbId,
    pub name: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
}

/// Ustaz card for the public landing page, with aggregate counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicUstazCard {
    pub id: DbId,
    pub name: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
    /// Number of accepted student connections.
    pub student_count: i64,
    /// Number of unbooked time slots.
    pub free_slots: i64,
}

/// Row for the admin user table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminUserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub category: Option<String>,
    pub assigned_ustaz_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// An accepted counterpart (student or ustaz) with the number of unread
/// messages they have sent to the viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub last_seen_at: Option<Timestamp>,
    pub connection_id: DbId,
    pub unread_count: i64,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub category: Option<String>,
}

/// DTO for profile edits. All fields are optional; `None` keeps the current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    /// Replacement `(photo_url, previous_photo_url)`, written as a pair.
    #[serde(skip)]
    pub photos: Option<PhotoPair>,
}
