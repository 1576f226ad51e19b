//! Startup provisioning of the admin account.
//!
//! Admins cannot self-register, so the first one comes from the environment.

use muraja_core::roles::ROLE_ADMIN;
use muraja_db::models::user::CreateUser;
use muraja_db::repositories::UserRepo;
use muraja_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin if no user with that email exists yet.
///
/// Returns `true` when an account was created. An existing account is left
/// untouched, whatever its role.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if let Some(existing) = UserRepo::find_by_email(pool, &admin.email).await? {
        if existing.role != ROLE_ADMIN {
            tracing::warn!(
                email = %admin.email,
                role = %existing.role,
                "Bootstrap admin email belongs to a non-admin account"
            );
        }
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.clone(),
            email: admin.email.trim().to_lowercase(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
            category: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Created bootstrap admin");
    Ok(true)
}
