//! Name reuse policy
//!
//! Decides whether a departed player's name can be claimed again.

use serde::Deserialize;
use std::fmt;

/// Which registry slots block a `join` for the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameReusePolicy {
    /// Any name ever joined stays taken for the life of the process,
    /// even after its player has left.
    #[default]
    Reserved,
    /// Only names of players currently online are taken.
    AfterDeparture,
}

impl fmt::Display for NameReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameReusePolicy::Reserved => write!(f, "reserved"),
            NameReusePolicy::AfterDeparture => write!(f, "after_departure"),
        }
    }
}
