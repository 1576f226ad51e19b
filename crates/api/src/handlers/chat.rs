//! Handlers for the `/chat` resource: direct messages between users.
//!
//! Every write goes to Postgres first and is then published on the event
//! bus, which the chat relay turns into socket frames for the counterpart.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use muraja_core::chat::{validate_message, validate_participants, AttachmentKind};
use muraja_core::error::CoreError;
use muraja_core::types::DbId;
use muraja_db::models::message::{CreateMessage, MessageWithSender};
use muraja_db::repositories::{MessageRepo, UserRepo};
use muraja_events::{event_types, PlatformEvent};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;
use crate::uploads::MultipartForm;

/// Multipart part carrying an attachment.
const ATTACHMENT_FIELD: &str = "file";

/// Request body for `PUT /chat/read`.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub sender_id: DbId,
}

/// Response for `GET /chat/unread/count`.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// Response for `PUT /chat/read`.
#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: u64,
}

/// POST /api/chat/send
///
/// Multipart form with `receiver_id`, optional `content` and optional `file`.
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Created<MessageWithSender>> {
    let form = MultipartForm::read(multipart, ATTACHMENT_FIELD).await?;

    let receiver_id: DbId = form
        .text("receiver_id")
        .ok_or_else(|| AppError::BadRequest("receiver_id is required".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("receiver_id must be an integer".into()))?;
    let content = form.fields.get("content").cloned().unwrap_or_default();

    validate_participants(auth.user_id, receiver_id)?;
    validate_message(&content, form.file.is_some())?;

    if UserRepo::find_by_id(&state.pool, receiver_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: receiver_id,
        }));
    }

    let (attachment_url, attachment_type) = match &form.file {
        Some(file) => {
            let url = state.uploads.save(file).await?;
            let kind = AttachmentKind::from_mime(file.content_type.as_deref());
            (Some(url), Some(kind.as_str().to_string()))
        }
        None => (None, None),
    };

    let message = match MessageRepo::create(
        &state.pool,
        &CreateMessage {
            sender_id: auth.user_id,
            receiver_id,
            content,
            attachment_url: attachment_url.clone(),
            attachment_type,
        },
    )
    .await
    {
        Ok(message) => message,
        Err(e) => {
            if let Some(url) = attachment_url.as_deref() {
                state.uploads.remove(url).await;
            }
            return Err(e.into());
        }
    };

    state.event_bus.publish(
        PlatformEvent::new(event_types::MESSAGE_SENT)
            .with_source("message", message.id)
            .with_actor(auth.user_id)
            .with_recipients([receiver_id])
            .with_data(&message),
    );

    tracing::info!(
        message_id = message.id,
        sender_id = auth.user_id,
        receiver_id,
        has_attachment = message.attachment_url.is_some(),
        "Message sent"
    );
    Ok(created(message))
}

/// GET /api/chat/unread/count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = MessageRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// GET /api/chat/{other_user_id}
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(other_user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MessageWithSender>>>> {
    let messages = MessageRepo::list_conversation(&state.pool, auth.user_id, other_user_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// PUT /api/chat/read
///
/// Mark every message from `sender_id` to the caller as read.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<MarkReadRequest>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let updated = MessageRepo::mark_read_from(&state.pool, input.sender_id, auth.user_id).await?;

    if updated > 0 {
        state.event_bus.publish(
            PlatformEvent::new(event_types::MESSAGES_READ)
                .with_actor(auth.user_id)
                .with_recipients([input.sender_id])
                .with_payload(json!({
                    "reader_id": auth.user_id,
                    "sender_id": input.sender_id,
                    "count": updated,
                })),
        );
    }

    Ok(Json(DataResponse {
        data: MarkedRead { updated },
    }))
}

/// DELETE /api/chat/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;

    if message.sender_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the sender can delete this message".into(),
        )));
    }

    MessageRepo::delete(&state.pool, id).await?;
    if let Some(url) = message.attachment_url.as_deref() {
        state.uploads.remove(url).await;
    }

    state.event_bus.publish(
        PlatformEvent::new(event_types::MESSAGE_DELETED)
            .with_source("message", id)
            .with_actor(auth.user_id)
            .with_recipients([message.receiver_id])
            .with_payload(json!({
                "id": id,
                "sender_id": message.sender_id,
                "receiver_id": message.receiver_id,
            })),
    );

    tracing::info!(message_id = id, sender_id = auth.user_id, "Message deleted");
    Ok(StatusCode::NO_CONTENT)
}
