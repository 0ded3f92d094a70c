//! Connection sessions
//!
//! One session per accepted connection: per-connection protocol state, line
//! framing, and the read-dispatch-respond loop.

pub mod framing;
pub mod handler;
pub mod state;

pub use handler::handle_session;
pub use state::{Session, SessionState};
