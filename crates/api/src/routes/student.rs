//! Route definitions for the `/student` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Routes mounted at `/student` (`STUDENT` only).
///
/// ```text
/// POST /feedback   -> submit_feedback
/// POST /complaint  -> submit_complaint
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(student::submit_feedback))
        .route("/complaint", post(student::submit_complaint))
}
