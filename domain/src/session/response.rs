//! Model response types.
//!
//! A model turn is either *final* (no tool calls, text present) or
//! *intermediate* (at least one tool call, text optional). Providers return
//! their output as an ordered list of content blocks; the order of
//! [`ContentBlock::ToolCall`] blocks is the order the calls were requested in,
//! and results are correlated with them positionally.
//!
//! ```
//! use toolchat_domain::session::response::ModelResponse;
//! use toolchat_domain::tool::entities::ToolCall;
//!
//! let response = ModelResponse::from_text("It's 28°C in Taipei.");
//! assert!(response.is_final());
//!
//! let response = ModelResponse::from_tool_calls(vec![
//!     ToolCall::new("getCurrentWeather").with_arg("city", "Taipei"),
//! ]);
//! assert!(!response.is_final());
//! assert_eq!(response.text(), None);
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// A single block of content within a model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text produced by the model.
    Text(String),
    /// A request to run a tool before the model continues.
    ToolCall(ToolCall),
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            ContentBlock::ToolCall(call) => Some(call),
            _ => None,
        }
    }
}

/// Structured response for one model turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Content blocks in the order the provider returned them.
    pub content: Vec<ContentBlock>,
    /// Model identifier reported by the provider, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ModelResponse {
    /// Create a final, text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            model: None,
        }
    }

    /// Create an intermediate response carrying only tool calls.
    pub fn from_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: calls.into_iter().map(ContentBlock::ToolCall).collect(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Concatenate all `Text` blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Text of the response, or `None` when the model produced no text.
    pub fn text(&self) -> Option<String> {
        let text = self.text_content();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Tool calls in request order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| b.as_tool_call().cloned())
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolCall(_)))
    }

    /// A response is final when it requests no further tool calls.
    pub fn is_final(&self) -> bool {
        !self.has_tool_calls()
    }
}
