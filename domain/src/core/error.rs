//! Error taxonomy surfaced at the chat request boundary.

use serde::{Deserialize, Serialize};

/// Closed set of failure kinds a chat run can end with.
///
/// | Kind | Status | Recovery |
/// |------|--------|----------|
/// | `ValidationError` | 400 | rejected before any session is opened |
/// | `AuthError` | 401 | run aborted |
/// | `QuotaExceeded` | 429 | run aborted, caller may retry later |
/// | `ModelNotFound` | 404 | run aborted |
/// | `ServiceUnavailable` | 503 | run aborted, caller may retry |
/// | `LoopLimitExceeded` | 500 | run aborted |
/// | `ToolExecutionError` | - | absorbed inside the loop, never surfaced |
/// | `UnknownError` | 500 | run aborted |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    AuthError,
    QuotaExceeded,
    ModelNotFound,
    ServiceUnavailable,
    LoopLimitExceeded,
    ToolExecutionError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::AuthError => "AuthError",
            ErrorKind::QuotaExceeded => "QuotaExceeded",
            ErrorKind::ModelNotFound => "ModelNotFound",
            ErrorKind::ServiceUnavailable => "ServiceUnavailable",
            ErrorKind::LoopLimitExceeded => "LoopLimitExceeded",
            ErrorKind::ToolExecutionError => "ToolExecutionError",
            ErrorKind::UnknownError => "UnknownError",
        }
    }

    /// HTTP status code used when this kind reaches the request boundary.
    ///
    /// `ToolExecutionError` never reaches the boundary; it maps to 500 only so
    /// that the function is total.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::ValidationError => 400,
            ErrorKind::AuthError => 401,
            ErrorKind::ModelNotFound => 404,
            ErrorKind::QuotaExceeded => 429,
            ErrorKind::ServiceUnavailable => 503,
            ErrorKind::LoopLimitExceeded
            | ErrorKind::ToolExecutionError
            | ErrorKind::UnknownError => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
