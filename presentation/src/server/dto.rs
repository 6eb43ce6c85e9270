//! Request and response bodies of the chat API.

use serde::Serialize;
use serde_json::Value;
use toolchat_domain::{ConversationHistory, ErrorKind, Message, Role};

/// A validated `POST /api/chat` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Every message but the last
    pub history: ConversationHistory,
    /// Content of the last message
    pub last_message: String,
}

impl ChatRequest {
    /// Validate a raw JSON body of the form
    /// `{ "messages": [{ "role": "user" | "assistant", "content": "..." }] }`.
    ///
    /// Role `assistant` (or `model`) maps to the model; any other or missing
    /// role is treated as the user.
    pub fn from_json(body: &Value) -> Result<Self, String> {
        let messages = body
            .get("messages")
            .and_then(Value::as_array)
            .ok_or_else(|| "Invalid request: messages array is required".to_string())?;

        let mut parsed = messages
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let content = m.get("content").and_then(Value::as_str).ok_or_else(|| {
                    format!("Invalid request: messages[{}].content must be a string", i)
                })?;
                let role = m.get("role").and_then(Value::as_str).unwrap_or("user");
                Ok(Message::new(Role::from_label(role), content))
            })
            .collect::<Result<Vec<_>, String>>()?;

        let last = parsed
            .pop()
            .ok_or_else(|| "Invalid request: messages must not be empty".to_string())?;
        if last.content.trim().is_empty() {
            return Err("Invalid request: the last message is empty".to_string());
        }

        Ok(Self {
            history: ConversationHistory::from(parsed),
            last_message: last.content,
        })
    }
}

/// Successful chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
}

/// Failure body: `{ "error": <ErrorKind>, "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
