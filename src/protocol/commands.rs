//! Module `commands`
//!
//! Defines the lobby commands and the result of executing one.

/// A request line parsed from the client.
#[derive(Debug, PartialEq)]
pub enum Command {
    Join(String),   // Claim a player name
    Invite(String), // Ask for another player's address
    List,           // Ask who is online
    Unknown,        // Malformed or unrecognized, answered with silence
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Rejected,
    Ignored,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message),
        }
    }

    pub fn rejected(message: String) -> Self {
        Self {
            status: CommandStatus::Rejected,
            message: Some(message),
        }
    }

    pub fn ignored() -> Self {
        Self {
            status: CommandStatus::Ignored,
            message: None,
        }
    }
}
