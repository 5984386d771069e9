//! Photo Pick Core - Scoring and selection engine for product photos.
//!
//! This crate contains the domain types, the multi-factor photo scorer,
//! folder-level category detection, candidate partitioning and the final
//! selection algorithm, behind ports for the classifier and filesystem.

pub mod domain;
pub mod engine;
pub mod ports;
pub mod scoring;
pub mod selection;

pub use domain::{
    CategoryRuleSet, CategoryRules, ColorMode, ContainerFormat, ContentType, FolderAnalysis,
    LabelScore, PhotoAttributes, PhotoInfo, ScoredPhoto, Viewpoint,
};
pub use engine::FolderEngine;
pub use ports::{LabelProvider, NullProgress, PhotoSource, ProgressEvent, ProgressSink, ReportSink};
pub use scoring::{CategoryDetector, DetectedCategory, PhotoScorer};
pub use selection::{select_best, Candidates, SelectionOverrides};
