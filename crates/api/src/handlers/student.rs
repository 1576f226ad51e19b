//! Handlers for the `/student` resource: feedback and complaints.

use axum::extract::State;
use axum::Json;
use muraja_db::models::feedback::StudentNote;
use muraja_db::repositories::{ComplaintRepo, FeedbackRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStudent;
use crate::response::{created, Created};
use crate::state::AppState;

/// Request body shared by `POST /student/feedback` and `POST /student/complaint`.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"))]
    pub content: String,
}

impl NoteRequest {
    fn checked(self) -> AppResult<String> {
        let trimmed = NoteRequest {
            content: self.content.trim().to_string(),
        };
        trimmed.validate()?;
        Ok(trimmed.content)
    }
}

/// POST /api/student/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Json(input): Json<NoteRequest>,
) -> AppResult<Created<StudentNote>> {
    let content = input.checked()?;
    let note = FeedbackRepo::create(&state.pool, auth.user_id, &content).await?;
    tracing::info!(feedback_id = note.id, student_id = auth.user_id, "Feedback submitted");
    Ok(created(note))
}

/// POST /api/student/complaint
pub async fn submit_complaint(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Json(input): Json<NoteRequest>,
) -> AppResult<Created<StudentNote>> {
    let content = input.checked()?;
    let note = ComplaintRepo::create(&state.pool, auth.user_id, &content).await?;
    tracing::info!(complaint_id = note.id, student_id = auth.user_id, "Complaint submitted");
    Ok(created(note))
}
