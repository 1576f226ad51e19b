//! Handlers for the `/schedule` resource: an ustaz's weekly time slots.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use muraja_core::error::CoreError;
use muraja_core::schedule::validate_slot;
use muraja_core::types::DbId;
use muraja_db::models::time_slot::{CreateTimeSlot, TimeSlot};
use muraja_db::repositories::{ConnectionRepo, TimeSlotRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireStudent, RequireUstaz};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Query parameters for `GET /schedule`.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub ustaz_id: Option<DbId>,
}

/// POST /api/schedule
pub async fn create_slot(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
    Json(input): Json<CreateTimeSlot>,
) -> AppResult<Created<TimeSlot>> {
    let input = CreateTimeSlot {
        day: input.day.trim().to_string(),
        start_time: input.start_time.trim().to_string(),
        end_time: input.end_time.trim().to_string(),
    };
    validate_slot(&input.day, &input.start_time, &input.end_time)?;

    let slot = TimeSlotRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(slot_id = slot.id, ustaz_id = auth.user_id, day = %slot.day, "Time slot created");
    Ok(created(slot))
}

/// GET /api/schedule?ustaz_id=
pub async fn list_slots(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ScheduleQuery>,
) -> AppResult<Json<DataResponse<Vec<TimeSlot>>>> {
    let slots = TimeSlotRepo::list(&state.pool, params.ustaz_id).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// DELETE /api/schedule/{id}
pub async fn delete_slot(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let slot = find_slot(&state, id).await?;
    if slot.ustaz_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can delete this slot".into(),
        )));
    }

    TimeSlotRepo::delete(&state.pool, id).await?;
    tracing::info!(slot_id = id, ustaz_id = auth.user_id, "Time slot deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/schedule/{id}/book
///
/// A student books a free slot of an ustaz they are connected to.
pub async fn book_slot(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TimeSlot>>> {
    let slot = find_slot(&state, id).await?;

    if !ConnectionRepo::is_accepted(&state.pool, auth.user_id, slot.ustaz_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only book slots of an ustaz who accepted you".into(),
        )));
    }
    if slot.is_booked {
        return Err(AppError::Core(CoreError::Conflict(
            "Slot is already booked".into(),
        )));
    }

    // The conditional update loses to a concurrent booking.
    let booked = TimeSlotRepo::book(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Slot is already booked".into())))?;

    tracing::info!(slot_id = id, student_id = auth.user_id, "Time slot booked");
    Ok(Json(DataResponse { data: booked }))
}

async fn find_slot(state: &AppState, id: DbId) -> AppResult<TimeSlot> {
    TimeSlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id,
        }))
}
