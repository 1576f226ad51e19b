//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use muraja_core::error::CoreError;
use muraja_core::types::DbId;
use muraja_db::repositories::UserRepo;

use crate::auth::jwt::decode_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Extraction also stamps the user's `last_seen_at`, which drives the
/// presence shown to their contacts. A token for a deleted user is rejected.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role (`ADMIN`, `USTAZ` or `STUDENT`).
    pub role: String,
}

impl AuthUser {
    /// Resolve a raw access token into a live user.
    ///
    /// Shared by the header extractor and the WebSocket upgrade, which
    /// carries its token in the query string.
    pub async fn from_token(state: &AppState, token: &str) -> AppResult<Self> {
        let claims = decode_access_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !UserRepo::touch_last_seen(&state.pool, claims.sub).await? {
            return Err(AppError::Core(CoreError::Unauthorized(
                "User not found".into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        AuthUser::from_token(state, token).await
    }
}
