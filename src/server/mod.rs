//! Server core functionality
//!
//! Binds the listener and hands every accepted connection to its own
//! session task.

pub mod acceptor;

pub use acceptor::Server;
