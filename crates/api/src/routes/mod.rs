pub mod admin;
pub mod attendance;
pub mod auth;
pub mod chat;
pub mod health;
pub mod schedule;
pub mod student;
pub mod tasks;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?token=                      WebSocket
///
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
///
/// /users/...                      profile, discovery, connection requests
///
/// /admin/users                    list (admin only)
/// /admin/users/{id}               delete
/// /admin/assign-ustaz             assign a student to an ustaz
/// /admin/feedback                 feedback listing
/// /admin/complaints               complaint listing
///
/// /tasks                          list, create
/// /tasks/{id}                     update
///
/// /attendance                     list, mark
///
/// /schedule                       list (?ustaz_id=), create
/// /schedule/{id}                  delete
/// /schedule/{id}/book             book
///
/// /student/feedback               submit feedback (student only)
/// /student/complaint              submit complaint (student only)
///
/// /chat/send                      send (multipart)
/// /chat/unread/count              unread count
/// /chat/read                      mark a sender's messages read
/// /chat/{id}                      conversation (GET), delete message (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint (token in the query string).
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
        .nest("/tasks", tasks::router())
        .nest("/attendance", attendance::router())
        .nest("/schedule", schedule::router())
        .nest("/student", student::router())
        .nest("/chat", chat::router())
}
