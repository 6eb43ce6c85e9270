//! Application-level configuration.
//!
//! - [`ExecutionParams`]: loop control for a chat run (turn cap, tool timeout)

pub mod execution_params;

pub use execution_params::ExecutionParams;
