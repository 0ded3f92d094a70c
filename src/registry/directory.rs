//! Module `directory`
//!
//! Provides `PlayerRegistry`, the shared name → address directory used by
//! every connection session. The map and its active-player counter live
//! behind a single mutex; callers only see the atomic operations below and
//! never the lock itself.

use log::{debug, info};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::registry::{NameReusePolicy, PlayerSlot};

/// Map of player names to slots plus the number of `Active` slots.
#[derive(Default)]
struct Directory {
    players: HashMap<String, PlayerSlot>,
    active: usize,
}

impl Directory {
    fn is_claimable(&self, name: &str, policy: NameReusePolicy) -> bool {
        match (self.players.get(name), policy) {
            (None, _) => true,
            (Some(PlayerSlot::Departed), NameReusePolicy::AfterDeparture) => true,
            (Some(_), _) => false,
        }
    }

    fn lookup(&self, name: &str) -> Option<IpAddr> {
        self.players.get(name).and_then(PlayerSlot::address)
    }

    fn active_players(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|(_, slot)| slot.is_active())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Concurrent player directory shared by all sessions.
///
/// Every operation, including pure reads, runs entirely under one lock, so
/// compound checks such as count-then-lookup are atomic as a unit.
pub struct PlayerRegistry {
    directory: Mutex<Directory>,
    policy: NameReusePolicy,
}

impl PlayerRegistry {
    pub fn new(policy: NameReusePolicy) -> Self {
        Self {
            directory: Mutex::new(Directory::default()),
            policy,
        }
    }

    /// Returns the name reuse policy this registry enforces.
    pub fn policy(&self) -> NameReusePolicy {
        self.policy
    }

    // No operation can leave the directory half-updated, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims `name` for a player reachable at `addr`.
    ///
    /// Returns `false` without touching the registry if the name is taken
    /// according to the registry's `NameReusePolicy`.
    pub fn try_join(&self, name: &str, addr: IpAddr) -> bool {
        let mut dir = self.lock();

        if !dir.is_claimable(name, self.policy) {
            debug!("Join refused for {}: name already known", name);
            return false;
        }

        dir.players.insert(name.to_string(), PlayerSlot::Active(addr));
        dir.active += 1;
        info!("Player {} added to the player's list ({} online)", name, dir.active);
        true
    }

    /// Returns whether `name` was ever joined, online or not.
    pub fn exists(&self, name: &str) -> bool {
        self.lock().players.contains_key(name)
    }

    /// Returns the address of `name` if the player is online.
    pub fn lookup(&self, name: &str) -> Option<IpAddr> {
        self.lock().lookup(name)
    }

    /// Number of players currently online.
    pub fn count(&self) -> usize {
        self.lock().active
    }

    /// Marks `name` as departed, but only if it is still online at `addr`.
    ///
    /// A session whose name has since been taken over by someone at a
    /// different address leaves the newer entry alone.
    pub fn remove_if_matches(&self, name: &str, addr: IpAddr) -> bool {
        let mut guard = self.lock();
        let dir = &mut *guard;

        match dir.players.get_mut(name) {
            Some(slot) if *slot == PlayerSlot::Active(addr) => {
                *slot = PlayerSlot::Departed;
                dir.active -= 1;
                info!("Player {} removed from the player's list ({} online)", name, dir.active);
                true
            }
            _ => false,
        }
    }

    /// Names of all players currently online, in no particular order.
    pub fn active_players(&self) -> Vec<String> {
        self.lock().active_players()
    }

    /// Resolves an invitation target in one atomic step.
    ///
    /// An empty registry answers without consulting the map.
    pub fn locate(&self, name: &str) -> Option<IpAddr> {
        let dir = self.lock();
        if dir.active == 0 || !dir.players.contains_key(name) {
            return None;
        }
        dir.lookup(name)
    }

    /// Snapshot of online players, or `None` when nobody is online.
    pub fn roster(&self) -> Option<Vec<String>> {
        let dir = self.lock();
        if dir.active == 0 {
            return None;
        }
        Some(dir.active_players())
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new(NameReusePolicy::default())
    }
}
