//! Module `state`
//!
//! Defines the `Session` struct that tracks which player name, if any, a
//! connection has claimed, and the address it connected from.

use std::net::IpAddr;

use crate::registry::PlayerRegistry;

/// Where a connection stands in the lobby protocol.
///
/// A joined session keeps every name it claimed, oldest first; the last one
/// is the name it currently plays under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Joined(Vec<String>),
}

/// Per-connection protocol state.
#[derive(Debug)]
pub struct Session {
    peer: IpAddr,
    state: SessionState,
}

impl Session {
    pub fn new(peer: IpAddr) -> Self {
        Self {
            peer,
            state: SessionState::Anonymous,
        }
    }

    /// Returns the address this connection came from.
    pub fn peer(&self) -> IpAddr {
        self.peer
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the most recently claimed player name, if the session has joined.
    pub fn name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Joined(names) => names.last().map(String::as_str),
            SessionState::Anonymous => None,
        }
    }

    /// Records a successful join.
    pub fn assign_name(&mut self, name: String) {
        match &mut self.state {
            SessionState::Joined(names) => names.push(name),
            SessionState::Anonymous => self.state = SessionState::Joined(vec![name]),
        }
    }

    /// Ends the session, marking every player name it claimed as departed.
    ///
    /// Returns the names that were released. An entry that now belongs to
    /// a different address is left untouched and not reported.
    pub fn close(self, registry: &PlayerRegistry) -> Vec<String> {
        match self.state {
            SessionState::Joined(names) => names
                .into_iter()
                .filter(|name| registry.remove_if_matches(name, self.peer))
                .collect(),
            SessionState::Anonymous => Vec::new(),
        }
    }
}
