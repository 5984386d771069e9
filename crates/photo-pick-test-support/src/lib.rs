//! Test support utilities for photo-pick.
//!
//! Provides mock port implementations and builders for photos and scored
//! photos, so engine and selection tests never need a real classifier or
//! the filesystem.
//!
//! # Example
//!
//! ```
//! use photo_pick_test_support::{MockLabelProvider, MockPhotoSource, PhotoBuilder};
//!
//! let photo = PhotoBuilder::new("bag.jpg").dimensions(1200, 1200).build();
//! let provider = MockLabelProvider::new().with_labels("bag.jpg", &[("backpack", 0.9)]);
//! let source = MockPhotoSource::new(vec![photo]);
//! ```

mod builders;
mod mocks;

pub use builders::{PhotoBuilder, ScoredPhotoBuilder};
pub use mocks::{MockLabelProvider, MockPhotoSource, MockProgressSink, MockReportSink};
