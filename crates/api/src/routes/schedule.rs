//! Route definitions for the `/schedule` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedule`.
///
/// ```text
/// GET    /            -> list_slots (?ustaz_id=)
/// POST   /            -> create_slot (ustaz)
/// DELETE /{id}        -> delete_slot (owner)
/// POST   /{id}/book   -> book_slot (connected student)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::list_slots).post(schedule::create_slot))
        .route("/{id}", delete(schedule::delete_slot))
        .route("/{id}/book", post(schedule::book_slot))
}
