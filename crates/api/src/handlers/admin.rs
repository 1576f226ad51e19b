//! Handlers for the `/admin` resource (ADMIN only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use muraja_core::error::CoreError;
use muraja_core::roles::{ROLE_STUDENT, ROLE_USTAZ};
use muraja_core::types::DbId;
use muraja_db::models::feedback::StudentNoteWithAuthor;
use muraja_db::models::user::{AdminUserRow, UserResponse};
use muraja_db::repositories::{ComplaintRepo, FeedbackRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/assign-ustaz`.
#[derive(Debug, Deserialize)]
pub struct AssignUstazRequest {
    pub student_id: DbId,
    pub ustaz_id: DbId,
}

/// GET /api/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdminUserRow>>>> {
    let users = UserRepo::list_for_admin(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// DELETE /api/admin/users/{id}
///
/// Hard-delete a user and everything that hangs off them. Admins cannot
/// delete their own account.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete your own account".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    UserRepo::delete(&state.pool, id).await?;

    if let Some(photo) = user.photo_url.as_deref() {
        state.uploads.remove(photo).await;
    }
    if let Some(photo) = user.previous_photo_url.as_deref() {
        state.uploads.remove(photo).await;
    }

    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/assign-ustaz
pub async fn assign_ustaz(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AssignUstazRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let student = UserRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.student_id,
        }))?;
    if student.role != ROLE_STUDENT {
        return Err(AppError::Core(CoreError::Validation(
            "Only students can be assigned an ustaz".into(),
        )));
    }

    let ustaz = UserRepo::find_by_id(&state.pool, input.ustaz_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.ustaz_id,
        }))?;
    if ustaz.role != ROLE_USTAZ {
        return Err(AppError::Core(CoreError::Validation(
            "Assigned user must be an ustaz".into(),
        )));
    }

    let updated = UserRepo::assign_ustaz(&state.pool, student.id, ustaz.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: student.id,
        }))?;

    tracing::info!(
        student_id = student.id,
        ustaz_id = ustaz.id,
        admin_id = admin.user_id,
        "Ustaz assigned"
    );
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// GET /api/admin/feedback
pub async fn list_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StudentNoteWithAuthor>>>> {
    let feedback = FeedbackRepo::list_with_author(&state.pool).await?;
    Ok(Json(DataResponse { data: feedback }))
}

/// GET /api/admin/complaints
pub async fn list_complaints(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StudentNoteWithAuthor>>>> {
    let complaints = ComplaintRepo::list_with_author(&state.pool).await?;
    Ok(Json(DataResponse { data: complaints }))
}
