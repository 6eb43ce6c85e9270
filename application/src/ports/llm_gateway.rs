//! LLM Gateway port
//!
//! Defines the interface for communicating with the model provider, and the
//! classification of provider failures into [`ErrorKind`]s.

use async_trait::async_trait;
use thiserror::Error;
use toolchat_domain::{ConversationHistory, ErrorKind, ModelResponse, ToolResult};

/// Errors that can occur during LLM gateway operations
///
/// Provider failures are classified once, where the provider call fails;
/// the use case propagates them unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Classify a provider failure by its HTTP status code.
    ///
    /// | Status | Classification |
    /// |--------|----------------|
    /// | 401, 403 | [`GatewayError::AuthFailed`] |
    /// | 404 | [`GatewayError::ModelNotFound`] |
    /// | 429 | [`GatewayError::QuotaExceeded`] |
    /// | 502, 503, 504 | [`GatewayError::ServiceUnavailable`] |
    /// | anything else | [`GatewayError::Provider`] |
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => GatewayError::AuthFailed(message),
            404 => GatewayError::ModelNotFound(message),
            429 => GatewayError::QuotaExceeded(message),
            502..=504 => GatewayError::ServiceUnavailable(message),
            _ => GatewayError::Provider { status, message },
        }
    }

    /// Error kind reported to the caller of a chat run.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::AuthFailed(_) => ErrorKind::AuthError,
            GatewayError::QuotaExceeded(_) => ErrorKind::QuotaExceeded,
            GatewayError::ModelNotFound(_) => ErrorKind::ModelNotFound,
            GatewayError::ServiceUnavailable(_)
            | GatewayError::ConnectionError(_)
            | GatewayError::Timeout => ErrorKind::ServiceUnavailable,
            GatewayError::Provider { .. } | GatewayError::InvalidResponse(_) => {
                ErrorKind::UnknownError
            }
        }
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer. A gateway is
/// created once at startup and shared by every concurrent run.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Identifier of the model sessions are opened against
    fn model_name(&self) -> &str;

    /// Open a session seeded with prior turns and the tools the model may call.
    ///
    /// `tools` are provider-neutral declarations produced by a
    /// [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort).
    async fn open_session(
        &self,
        history: &ConversationHistory,
        tools: &[serde_json::Value],
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active, stateful conversation with the model
///
/// Callers never have two sends in flight on the same session.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &str;

    /// Send a user message and get the model's response
    async fn send(&self, content: &str) -> Result<ModelResponse, GatewayError>;

    /// Reply to the most recent intermediate response with its tool results.
    ///
    /// `results[i]` answers the i-th tool call of that response.
    async fn send_tool_results(
        &self,
        results: &[ToolResult],
    ) -> Result<ModelResponse, GatewayError>;
}
