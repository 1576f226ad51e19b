//! Handlers for the `/tasks` resource.
//!
//! An ustaz assigns memorization tasks to students. Either party may edit a
//! task afterwards (typically the student marking it completed).

use axum::extract::{Path, State};
use axum::Json;
use muraja_core::error::CoreError;
use muraja_core::roles::ROLE_STUDENT;
use muraja_core::types::DbId;
use muraja_db::models::task::{CreateTask, Task, TaskWithNames, UpdateTask};
use muraja_db::repositories::{TaskRepo, UserRepo};
use muraja_events::{event_types, PlatformEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireUstaz;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub student_id: DbId,
}

/// Request body for `PUT /tasks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn checked(self) -> AppResult<UpdateTask> {
        let trimmed = UpdateTaskRequest {
            title: self.title.map(|t| t.trim().to_string()),
            ..self
        };
        trimmed.validate()?;
        Ok(UpdateTask {
            title: trimmed.title,
            description: trimmed.description,
            is_completed: trimmed.is_completed,
        })
    }
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<Created<Task>> {
    let input = CreateTaskRequest {
        title: input.title.trim().to_string(),
        ..input
    };
    input.validate()?;

    let student = UserRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.student_id,
        }))?;
    if student.role != ROLE_STUDENT {
        return Err(AppError::Core(CoreError::Validation(
            "Tasks can only be assigned to students".into(),
        )));
    }

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            title: input.title,
            description: input.description.filter(|d| !d.trim().is_empty()),
            student_id: student.id,
            ustaz_id: auth.user_id,
        },
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::TASK_ASSIGNED)
            .with_source("task", task.id)
            .with_actor(auth.user_id)
            .with_recipients([task.student_id])
            .with_data(&task),
    );

    tracing::info!(task_id = task.id, student_id = task.student_id, "Task assigned");
    Ok(created(task))
}

/// GET /api/tasks
///
/// Students see tasks assigned to them; everyone else sees the tasks they
/// assigned.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TaskWithNames>>>> {
    let tasks = if auth.role == ROLE_STUDENT {
        TaskRepo::list_for_student(&state.pool, auth.user_id).await?
    } else {
        TaskRepo::list_for_ustaz(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: tasks }))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    if task.student_id != auth.user_id && task.ustaz_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to update this task".into(),
        )));
    }
    let input = input.checked()?;
    let updated = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: updated }))
}
