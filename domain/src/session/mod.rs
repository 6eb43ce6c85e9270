//! Conversation domain.
//!
//! - [`entities::Message`]: a single immutable turn of a conversation
//! - [`entities::ConversationHistory`]: every turn before the new user message
//! - [`response::ModelResponse`]: what the model returned for one turn

pub mod entities;
pub mod response;
