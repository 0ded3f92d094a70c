//! Error types
//!
//! Defines the setup faults that stop the server and the stream faults that
//! end a single session.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Faults raised while bringing the server up. All of them are fatal.
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    InvalidBindAddress(String),
    BindFailed(SocketAddr, io::Error),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::InvalidBindAddress(addr) => {
                write!(f, "Invalid bind address: {}", addr)
            }
            ServerError::BindFailed(addr, e) => write!(f, "Failed to bind to {}: {}", addr, e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::BindFailed(_, e) | ServerError::IoError(e) => Some(e),
            ServerError::InvalidBindAddress(_) => None,
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}

/// Stream faults that terminate the owning session.
///
/// A peer closing its end cleanly is not an error.
#[derive(Debug)]
pub enum SessionError {
    ReadFailed(io::Error),
    WriteFailed(io::Error),
    IdleTimeout(Duration),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ReadFailed(e) => write!(f, "Read failed: {}", e),
            SessionError::WriteFailed(e) => write!(f, "Write failed: {}", e),
            SessionError::IdleTimeout(after) => {
                write!(f, "Idle for {}s, closing", after.as_secs())
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::ReadFailed(e) | SessionError::WriteFailed(e) => Some(e),
            SessionError::IdleTimeout(_) => None,
        }
    }
}
