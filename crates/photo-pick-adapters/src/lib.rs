//! Photo Pick Adapters - External adapters for photo-pick.
//!
//! This crate provides adapters for:
//! - Filesystem photo source (folder scanning + attribute extraction)
//! - Candle-backed image classifier (the Label Provider)
//! - Model downloading and caching
//! - Filesystem selection reporter

pub mod classifier;
pub mod fs;
pub mod models;
pub mod report;

pub use classifier::CandleClassifier;
pub use fs::FsPhotoSource;
pub use models::{default_models_dir, ensure_models, model_path};
pub use report::FsReporter;
