//! Report sink port for persisting selection results.

use crate::domain::FolderAnalysis;

/// Port for persisting the result of a folder analysis.
pub trait ReportSink: Send + Sync {
    /// Persists one folder's analysis.
    ///
    /// # Errors
    ///
    /// Returns an error when the report cannot be written.
    fn write(&self, analysis: &FolderAnalysis) -> anyhow::Result<()>;
}
