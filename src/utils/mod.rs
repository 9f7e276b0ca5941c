pub mod serialization;

pub use serialization::{load_roster, load_roster_or_default, save_roster};
