//! Lobby response texts
//!
//! Every response is a single `\n`-terminated line.

use std::net::IpAddr;

pub const ROSTER_LABEL: &str = "Players: ";
pub const ROSTER_SEPARATOR: &str = ", ";
pub const NO_PLAYERS: &str = "There are no players online\n";

pub fn player_added(name: &str) -> String {
    format!("Player {} added to the player's list\n", name)
}

pub fn player_exists(name: &str) -> String {
    format!("Player {} is already in the player's list\n", name)
}

pub fn player_address(addr: IpAddr) -> String {
    format!("{}\n", addr)
}

pub fn player_not_found(name: &str) -> String {
    format!("Player {} not found\n", name)
}

pub fn roster<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ROSTER_SEPARATOR);
    format!("{}{}\n", ROSTER_LABEL, joined)
}

pub fn no_players() -> String {
    NO_PLAYERS.to_string()
}

/// Truncates `message` so that it fits in `max_len` bytes, keeping the
/// trailing newline and whole UTF-8 characters.
pub fn cap(mut message: String, max_len: usize) -> String {
    if message.len() <= max_len {
        return message;
    }

    let mut body_len = max_len.saturating_sub(1);
    while !message.is_char_boundary(body_len) {
        body_len -= 1;
    }
    message.truncate(body_len);
    if max_len > 0 {
        message.push('\n');
    }
    message
}
