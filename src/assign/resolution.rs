use crate::assign::derangement::Derangement;
use crate::roster::Participant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub mc_user: String,
    pub discord_user: String,
}

/// Maps every registered discord id to its gift recipient. Rosters below the
/// minimum size resolve to an entry for every participant with no recipient
/// rather than an error.
pub fn resolve_assignments(
    roster: &[Participant],
    seed: i64,
) -> HashMap<String, Option<Recipient>> {
    let permutation = match Derangement::generate(roster.len(), seed) {
        Ok(derangement) => derangement.0,
        Err(_) => {
            return roster
                .iter()
                .map(|participant| (participant.discord_id.clone(), None))
                .collect();
        }
    };

    roster
        .iter()
        .enumerate()
        .map(|(index, giver)| {
            let target = &roster[permutation[index]];
            (
                giver.discord_id.clone(),
                Some(Recipient {
                    mc_user: target.mc_user.clone(),
                    discord_user: target.discord_user.clone(),
                }),
            )
        })
        .collect()
}

/// The currently visible mapping. Page views read it concurrently; a new
/// registration recomputes the whole mapping and swaps it in while holding
/// the write lock, so two rebuilds can never interleave.
pub struct AssignmentTable {
    entries: RwLock<HashMap<String, Option<Recipient>>>,
}

impl AssignmentTable {
    pub fn resolve(roster: &[Participant], seed: i64) -> Self {
        AssignmentTable {
            entries: RwLock::new(resolve_assignments(roster, seed)),
        }
    }

    pub fn rebuild(&self, roster: &[Participant], seed: i64) {
        let mut guard = self.entries.write().expect("assignment table poisoned");
        *guard = resolve_assignments(roster, seed);
    }

    /// Outer `None` means the discord id never registered; inner `None`
    /// means registered but the roster is still too small to pair.
    pub fn lookup(&self, discord_id: &str) -> Option<Option<Recipient>> {
        let guard = self.entries.read().expect("assignment table poisoned");
        guard.get(discord_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("assignment table poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pairing_active(&self) -> bool {
        let guard = self.entries.read().expect("assignment table poisoned");
        guard.values().any(|entry| entry.is_some())
    }
}
