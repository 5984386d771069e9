//! Candidate partitioning and final photo selection.

mod partition;
mod select;

pub use partition::Candidates;
pub use select::{select_best, SelectionOverrides};
