//! Registry slot
//!
//! Value stored for each player name ever seen by the registry.

use std::net::IpAddr;

/// State of a single name in the player registry.
///
/// Names are never removed from the registry. A player leaving turns its
/// slot into `Departed`, which keeps the name known but unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    /// Player is online and reachable at this address.
    Active(IpAddr),
    /// Player joined at some point and has since left.
    Departed,
}

impl PlayerSlot {
    /// Returns the address if the player is online.
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            PlayerSlot::Active(addr) => Some(*addr),
            PlayerSlot::Departed => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PlayerSlot::Active(_))
    }
}
