//! Lobby command parsing
//!
//! Splits a request line into a verb and an optional argument.

use crate::protocol::Command;

/// Parses a raw request line into a `Command`.
///
/// Only the first two whitespace-separated tokens matter; anything after
/// the argument is dropped. Verbs are case-sensitive. A verb missing its
/// argument, or a name containing control characters, yields `Unknown`.
pub fn parse_command(raw: &str) -> Command {
    let mut tokens = raw.split_whitespace();
    let verb = tokens.next().unwrap_or("");
    let arg = tokens.next().filter(|name| is_valid_name(name));

    match (verb, arg) {
        ("join", Some(name)) => Command::Join(name.to_string()),
        ("invite", Some(name)) => Command::Invite(name.to_string()),
        ("list", _) => Command::List,
        _ => Command::Unknown,
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_control)
}
