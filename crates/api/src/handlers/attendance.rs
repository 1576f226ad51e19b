//! Handlers for the `/attendance` resource.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use muraja_core::attendance::validate_status;
use muraja_core::error::CoreError;
use muraja_core::roles::ROLE_STUDENT;
use muraja_core::types::{DbId, Timestamp};
use muraja_db::models::attendance::{Attendance, AttendanceWithName, CreateAttendance};
use muraja_db::repositories::{AttendanceRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireUstaz;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Request body for `POST /attendance`.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: DbId,
    pub status: String,
    pub remarks: Option<String>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD`. Defaults to now.
    pub date: Option<String>,
}

/// POST /api/attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
    Json(input): Json<MarkAttendanceRequest>,
) -> AppResult<Created<Attendance>> {
    validate_status(&input.status)?;
    let date = match input.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date(raw)?,
        _ => Utc::now(),
    };

    let student = UserRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.student_id,
        }))?;
    if student.role != ROLE_STUDENT {
        return Err(AppError::Core(CoreError::Validation(
            "Attendance can only be recorded for students".into(),
        )));
    }

    let record = AttendanceRepo::create(
        &state.pool,
        &CreateAttendance {
            student_id: student.id,
            ustaz_id: auth.user_id,
            date,
            status: input.status,
            remarks: input.remarks.filter(|r| !r.trim().is_empty()),
        },
    )
    .await?;

    tracing::info!(
        attendance_id = record.id,
        student_id = record.student_id,
        status = %record.status,
        "Attendance recorded"
    );
    Ok(created(record))
}

/// GET /api/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<AttendanceWithName>>>> {
    let records = if auth.role == ROLE_STUDENT {
        AttendanceRepo::list_for_student(&state.pool, auth.user_id).await?
    } else {
        AttendanceRepo::list_for_ustaz(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: records }))
}

fn parse_date(raw: &str) -> Result<Timestamp, CoreError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("Invalid date '{raw}'")))
}
