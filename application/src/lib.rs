//! Application layer for toolchat
//!
//! This crate contains the chat use case, the tool invoker, port definitions
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::invoke_tools::ToolInvoker;
pub use use_cases::run_chat::{RunChatError, RunChatInput, RunChatOutput, RunChatUseCase};
