//! Progress reporting port for UI integration.

use crate::domain::{ContentType, Viewpoint};

/// Events emitted while a folder is analyzed.
///
/// Scoring may run in parallel, so `Scored` events arrive in completion
/// order, not input order.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Scoring started for a photo.
    Started {
        /// Bare filename.
        filename: String,
        /// Total photos in the folder, if known.
        total: Option<usize>,
    },
    /// A photo was scored.
    Scored {
        /// Bare filename.
        filename: String,
        /// Composite score.
        final_score: f32,
        /// Content bucket.
        content_type: ContentType,
        /// Inferred viewpoint.
        main_view: Viewpoint,
    },
    /// A photo was skipped because it could not be read. The reason carries
    /// the offending path as error context.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },
    /// The folder is done.
    Finished {
        /// Photos scored successfully.
        processed: usize,
        /// Photos skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// A sink that discards all events.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
