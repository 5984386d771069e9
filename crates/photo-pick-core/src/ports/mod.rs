//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the selection engine and
//! external adapters (classifier, filesystem, UI, reporting).

mod label_provider;
mod photo_source;
mod progress;
mod report_sink;

pub use label_provider::LabelProvider;
pub use photo_source::PhotoSource;
pub use progress::{NullProgress, ProgressEvent, ProgressSink};
pub use report_sink::ReportSink;
