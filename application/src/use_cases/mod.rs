//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke_tools;
pub mod run_chat;
