//! Google Gemini provider
//!
//! Talks to the Generative Language REST API (`generateContent`) with
//! function calling.

mod adapter;
mod client;
mod session;
mod types;

pub use adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiGateway};
pub use session::GeminiSession;
