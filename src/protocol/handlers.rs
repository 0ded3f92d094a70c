//! Command handlers module for the lobby server.
//!
//! Executes parsed commands for one session against the shared player
//! registry and builds the text sent back to the client.

use log::{debug, info};

use crate::protocol::responses;
use crate::protocol::{Command, CommandResult};
use crate::registry::PlayerRegistry;
use crate::session::Session;

/// Dispatches a received command to its corresponding handler.
///
/// # Arguments
///
/// * `session` - Mutable reference to the session that sent the command.
/// * `command` - Reference to the parsed command.
/// * `registry` - The shared player registry.
///
/// # Returns
///
/// * `CommandResult` - Status and the response line, if any.
pub fn handle_command(
    session: &mut Session,
    command: &Command,
    registry: &PlayerRegistry,
) -> CommandResult {
    match command {
        Command::Join(name) => handle_cmd_join(session, name, registry),
        Command::Invite(name) => handle_cmd_invite(name, registry),
        Command::List => handle_cmd_list(registry),
        Command::Unknown => CommandResult::ignored(),
    }
}

/// Handles `join <name>`: claims the name for this session's peer address.
///
/// Names claimed earlier by the same session stay active until it closes.
fn handle_cmd_join(session: &mut Session, name: &str, registry: &PlayerRegistry) -> CommandResult {
    if !registry.try_join(name, session.peer()) {
        return CommandResult::rejected(responses::player_exists(name));
    }

    if let Some(previous) = session.name() {
        info!("Player {} also joined as {}", previous, name);
    }
    session.assign_name(name.to_string());

    CommandResult::success(responses::player_added(name))
}

/// Handles `invite <name>`: returns the invited player's address.
fn handle_cmd_invite(name: &str, registry: &PlayerRegistry) -> CommandResult {
    match registry.locate(name) {
        Some(addr) => {
            debug!("Resolved {} to {}", name, addr);
            CommandResult::success(responses::player_address(addr))
        }
        None => CommandResult::rejected(responses::player_not_found(name)),
    }
}

/// Handles `list`: returns all online players.
fn handle_cmd_list(registry: &PlayerRegistry) -> CommandResult {
    match registry.roster() {
        Some(names) => CommandResult::success(responses::roster(&names)),
        None => CommandResult::rejected(responses::no_players()),
    }
}
