use crate::roster::Participant;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    DuplicateMinecraftName(String),
    DuplicateDiscordId(String),
    DuplicateDiscordName(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::DuplicateMinecraftName(name) => {
                write!(f, "minecraft name '{name}' is already registered")
            }
            RosterError::DuplicateDiscordId(id) => {
                write!(f, "discord id '{id}' is already registered")
            }
            RosterError::DuplicateDiscordName(name) => {
                write!(f, "discord name '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for RosterError {}

/// Append-only participant list in registration order. Ids increment from 1
/// and never get reused, so the slice returned by `participants` is the
/// stable order the assignment resolution zips against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Roster {
            participants: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(
        &mut self,
        mc_user: &str,
        discord_id: &str,
        discord_user: &str,
    ) -> Result<u64, RosterError> {
        for existing in &self.participants {
            if existing.mc_user == mc_user {
                return Err(RosterError::DuplicateMinecraftName(mc_user.to_string()));
            }
            if existing.discord_id == discord_id {
                return Err(RosterError::DuplicateDiscordId(discord_id.to_string()));
            }
            if existing.discord_user == discord_user {
                return Err(RosterError::DuplicateDiscordName(discord_user.to_string()));
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.participants.push(Participant {
            id,
            mc_user: mc_user.to_string(),
            discord_id: discord_id.to_string(),
            discord_user: discord_user.to_string(),
        });
        Ok(id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}
