use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use muraja_core::types::DbId;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::manager::WsManager;
use crate::ws::protocol::{self, SocketAction};

/// Query string of the upgrade request.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: String,
}

/// GET /api/ws?token=<jwt>
///
/// Authenticates the access token, then upgrades the connection. Browsers
/// cannot set headers on a WebSocket handshake, hence the query parameter.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> AppResult<impl IntoResponse> {
    let user = AuthUser::from_token(&state, &params.token).await?;
    let manager = Arc::clone(&state.ws_manager);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, manager, user.user_id)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Interprets inbound frames on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), Some(user_id)).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                apply(&ws_manager, &conn_id, protocol::interpret(user_id, text.as_str())).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket disconnected");
}

/// Carry out an interpreted inbound frame.
async fn apply(ws_manager: &WsManager, conn_id: &str, action: SocketAction) {
    match action {
        SocketAction::Join { room } => {
            ws_manager.join(conn_id, &room).await;
            tracing::debug!(conn_id, room = %room, "Joined room");
            ws_manager
                .send_to_connection(conn_id, protocol::frame(protocol::JOINED, json!(room)))
                .await;
        }
        SocketAction::Relay { room, data } => {
            let delivered = ws_manager
                .send_to_room(&room, protocol::frame(protocol::RECEIVE_MESSAGE, data))
                .await;
            tracing::debug!(conn_id, room = %room, delivered, "Relayed socket message");
        }
        SocketAction::Reject(reason) => {
            ws_manager
                .send_to_connection(
                    conn_id,
                    protocol::frame(protocol::ERROR, json!({ "message": reason })),
                )
                .await;
        }
    }
}
