//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /profile               -> get_profile
/// PUT    /profile               -> update_profile (multipart)
/// POST   /profile/revert-photo  -> revert_photo
/// GET    /ustaz                 -> list_ustaz
/// GET    /public-ustazs         -> list_public_ustaz (no auth)
/// POST   /request-ustaz         -> request_ustaz (student)
/// GET    /pending-requests      -> pending_requests (ustaz)
/// PUT    /handle-request        -> handle_request (ustaz)
/// GET    /my-students           -> my_students (ustaz)
/// GET    /my-ustazs             -> my_ustaz (student)
/// GET    /my-connections        -> my_connections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/profile/revert-photo", post(users::revert_photo))
        .route("/ustaz", get(users::list_ustaz))
        .route("/public-ustazs", get(users::list_public_ustaz))
        .route("/request-ustaz", post(users::request_ustaz))
        .route("/pending-requests", get(users::pending_requests))
        .route("/handle-request", put(users::handle_request))
        .route("/my-students", get(users::my_students))
        .route("/my-ustazs", get(users::my_ustaz))
        .route("/my-connections", get(users::my_connections))
}
