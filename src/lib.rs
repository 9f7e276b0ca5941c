pub mod assign;
pub mod config;
pub mod roster;
pub mod utils;
pub mod web;

pub use assign::{
    derangement, resolve_assignments, AssignmentTable, Derangement, DerangementError, Recipient,
    MIN_PARTICIPANTS,
};
pub use config::{load_config, Config};
pub use roster::{Participant, Roster, RosterError};
pub use utils::serialization::{load_roster, load_roster_or_default, save_roster};
pub use web::ExchangeServer;
