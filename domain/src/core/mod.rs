//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ErrorKind`]: error taxonomy exposed to callers of a chat run

pub mod error;
