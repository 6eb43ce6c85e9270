//! HTTP boundary
//!
//! ```text
//! POST /api/chat   { messages: [{ role, content }] } → { reply, model }
//! GET  /health     → { status: "ok", message }
//! ```
//!
//! Failures are answered with `{ error: <ErrorKind>, message }` and the
//! status code of the error kind.

pub mod dto;
pub mod error;
pub mod routes;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use toolchat_application::{ExecutionParams, RunChatUseCase};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers
pub struct AppState {
    pub run_chat: RunChatUseCase,
    /// Turn cap and tool time limit applied to every run
    pub execution: ExecutionParams,
}

impl AppState {
    pub fn new(run_chat: RunChatUseCase, execution: ExecutionParams) -> Self {
        Self {
            run_chat,
            execution,
        }
    }
}

/// CORS policy admitting exactly `origins`, with credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).map_err(|_| ServerError::InvalidOrigin(o.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Build the application router
pub fn router(state: AppState, allowed_origins: &[String]) -> Result<Router, ServerError> {
    let app = Router::new()
        .merge(routes::chat_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Serve `app` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
