pub mod derangement;
pub mod resolution;

pub use derangement::{derangement, Derangement, DerangementError, MIN_PARTICIPANTS};
pub use resolution::{resolve_assignments, AssignmentTable, Recipient};
