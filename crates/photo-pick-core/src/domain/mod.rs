//! Core domain types for product photo selection.

mod labels;
mod photo;
mod report;
mod rules;

pub use labels::{top_labels, LabelScore, TOP_LABELS};
pub use photo::{
    ColorMode, ContainerFormat, ContentType, PhotoAttributes, PhotoInfo, ScoredPhoto, Viewpoint,
};
pub use report::FolderAnalysis;
pub use rules::{CategoryRuleSet, CategoryRules, KeywordWeights};
