//! Telegram Bot API wire types.
//!
//! Only the `sendMessage` method is used; docs:
//! <https://core.telegram.org/bots/api#sendmessage>

use serde::{Deserialize, Serialize};

/// `sendMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: String,
    pub text: String,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// The message object `sendMessage` returns on success. Only the fields
/// the bot cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
}
