//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording the transcript of a
//! chat run (user message, tool calls, tool results, final reply) to a
//! structured log. This is separate from `tracing` diagnostics: tracing
//! carries human-readable operation logs, this port carries the transcript.

use serde_json::Value;

/// A structured conversation event for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_message", "tool_results").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and non-fallible; a logger that cannot write drops
/// the event.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
