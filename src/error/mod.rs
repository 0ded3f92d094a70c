//! Error handling
//!
//! Defines error types for server setup and per-connection sessions.

pub mod types;

pub use types::*;
