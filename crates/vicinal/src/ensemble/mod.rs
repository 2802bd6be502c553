//! Meta-estimators that aggregate other estimators.

mod committee;

pub use committee::{CommitteeMachine, Expert};
