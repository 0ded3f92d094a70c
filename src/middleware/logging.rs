//! Logging middleware
//!
//! Provides connection and request logging functionality.

use log::{debug, info, warn};
use std::net::SocketAddr;

use crate::error::SessionError;
use crate::protocol::Command;

/// Log a client connection
pub fn log_connection(client_addr: &SocketAddr) {
    info!("Client connected: {}", client_addr);
}

/// Log a connection turned away at the session ceiling
pub fn log_rejection(client_addr: &SocketAddr, limit: usize) {
    warn!(
        "Rejected {}: session limit of {} reached",
        client_addr, limit
    );
}

/// Log a client command
pub fn log_command(client_addr: &SocketAddr, command: &Command) {
    match command {
        Command::Unknown => debug!("Client {} sent an unrecognized request", client_addr),
        _ => debug!("Client {} executed: {:?}", client_addr, command),
    }
}

/// Log a player leaving the lobby when its connection ends
pub fn log_departure(client_addr: &SocketAddr, name: &str) {
    info!("Player {} at {} left the lobby", name, client_addr);
}

/// Log how a session ended
pub fn log_session_end(client_addr: &SocketAddr, result: &Result<(), SessionError>) {
    match result {
        Ok(()) => info!("Client {} disconnected", client_addr),
        Err(SessionError::IdleTimeout(_)) => {
            info!("Client {} disconnected: idle timeout", client_addr)
        }
        Err(e) => warn!("Client {} disconnected: {}", client_addr, e),
    }
}
