pub mod participant;
pub mod store;

pub use participant::Participant;
pub use store::{Roster, RosterError};
