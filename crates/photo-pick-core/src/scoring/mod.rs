//! Photo scoring and folder-level category detection.

mod category;
mod photo;

pub use category::{CategoryDetector, DetectedCategory};
pub use photo::PhotoScorer;
