//! JSON frame protocol spoken over `/api/ws`.
//!
//! Every frame in either direction is `{"event": <name>, "data": <payload>}`.
//! Inbound frames are interpreted into a [`SocketAction`] without touching
//! any shared state, so the rules live in one testable place.

use axum::extract::ws::Message;
use muraja_core::chat::room_for;
use muraja_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client asks to join the room of a user id.
pub const JOIN_ROOM: &str = "join_room";
/// Client relays a message to another user.
pub const SEND_MESSAGE: &str = "send_message";
/// Server delivers a message.
pub const RECEIVE_MESSAGE: &str = "receive_message";
/// Server confirms a room join.
pub const JOINED: &str = "joined";
/// Server reports a rejected frame.
pub const ERROR: &str = "error";

/// Wire shape of every frame.
#[derive(Debug, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// What the connection should do in response to an inbound frame.
#[derive(Debug, PartialEq)]
pub enum SocketAction {
    /// Join this room and acknowledge to the sender.
    Join { room: String },
    /// Deliver `data` as a `receive_message` frame to `room`.
    Relay { room: String, data: Value },
    /// Answer the sender with an `error` frame.
    Reject(String),
}

/// Build an outbound text frame.
pub fn frame(event: &str, data: Value) -> Message {
    let body = serde_json::json!({ "event": event, "data": data });
    Message::Text(body.to_string().into())
}

/// Interpret an inbound text frame from a connection authenticated as `user_id`.
pub fn interpret(user_id: DbId, text: &str) -> SocketAction {
    let Ok(frame) = serde_json::from_str::<Frame>(text) else {
        return SocketAction::Reject("Malformed frame".into());
    };

    match frame.event.as_str() {
        JOIN_ROOM => match id_from(&frame.data) {
            Some(id) if id == user_id => SocketAction::Join {
                room: room_for(id),
            },
            Some(_) => SocketAction::Reject("Cannot join another user's room".into()),
            None => SocketAction::Reject("join_room expects a user id".into()),
        },
        SEND_MESSAGE => {
            let Value::Object(mut payload) = frame.data else {
                return SocketAction::Reject("send_message expects an object".into());
            };
            let Some(receiver_id) = payload.get("receiver_id").and_then(id_from) else {
                return SocketAction::Reject("send_message requires receiver_id".into());
            };
            payload.insert("sender_id".into(), Value::from(user_id));
            SocketAction::Relay {
                room: room_for(receiver_id),
                data: Value::Object(payload),
            }
        }
        other => SocketAction::Reject(format!("Unknown event '{other}'")),
    }
}

/// Accept a user id given either as a JSON number or a numeric string.
fn id_from(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
