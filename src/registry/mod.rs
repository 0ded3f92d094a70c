//! Player registry
//!
//! Process-wide directory of player names and the addresses other players
//! use to reach them.

pub mod directory;
pub mod policy;
pub mod slot;

pub use directory::PlayerRegistry;
pub use policy::NameReusePolicy;
pub use slot::PlayerSlot;
