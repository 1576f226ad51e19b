//! Route definitions for the `/chat` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST   /send                -> send_message (multipart)
/// GET    /unread/count        -> unread_count
/// PUT    /read                -> mark_read
/// GET    /{other_user_id}     -> conversation
/// DELETE /{id}                -> delete_message (sender)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(chat::send_message))
        .route("/unread/count", get(chat::unread_count))
        .route("/read", put(chat::mark_read))
        .route(
            "/{id}",
            get(chat::conversation).delete(chat::delete_message),
        )
}
