//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `ADMIN` role (enforced by handler extractors).
///
/// ```text
/// GET    /users          -> list_users
/// DELETE /users/{id}     -> delete_user
/// POST   /assign-ustaz   -> assign_ustaz
/// GET    /feedback       -> list_feedback
/// GET    /complaints     -> list_complaints
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/assign-ustaz", post(admin::assign_ustaz))
        .route("/feedback", get(admin::list_feedback))
        .route("/complaints", get(admin::list_complaints))
}
