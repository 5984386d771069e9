//! Filesystem reporter: copies the chosen photos and writes the report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use photo_pick_core::domain::FolderAnalysis;
use photo_pick_core::ports::ReportSink;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Report file written next to the copied photos.
const REPORT_FILENAME: &str = "selection_report.json";

/// On-disk report: the analysis plus a timestamp and the copied files.
#[derive(Debug, Serialize)]
struct SelectionReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    analysis: &'a FolderAnalysis,
    copied: Vec<CopiedPhoto>,
}

/// One copied photo entry in the report.
#[derive(Debug, Clone, Serialize)]
struct CopiedPhoto {
    slot: usize,
    source: String,
    target: String,
}

/// Writes each folder's selection into `<output_dir>/<folder>/`: the chosen
/// photos under order-prefixed names plus a `selection_report.json`.
pub struct FsReporter {
    output_dir: PathBuf,
}

impl FsReporter {
    /// Creates a reporter rooted at `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn copy_selected(&self, analysis: &FolderAnalysis, dir: &Path) -> Result<Vec<CopiedPhoto>> {
        let mut copied = Vec::with_capacity(analysis.selected.len());
        for (index, photo) in analysis.selected.iter().enumerate() {
            let slot = index + 1;
            let target_name = format!("{}{}", slot_prefix(slot), photo.filename);
            let target = dir.join(&target_name);
            fs::copy(&photo.path, &target)
                .with_context(|| format!("failed to copy {} to {}", photo.path, target.display()))?;
            debug!("copied {} -> {}", photo.path, target.display());
            copied.push(CopiedPhoto {
                slot,
                source: photo.path.clone(),
                target: target.to_string_lossy().into_owned(),
            });
        }
        Ok(copied)
    }
}

impl ReportSink for FsReporter {
    fn write(&self, analysis: &FolderAnalysis) -> Result<()> {
        let dir = self.output_dir.join(&analysis.folder);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output folder {}", dir.display()))?;

        let copied = self.copy_selected(analysis, &dir)?;

        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("failed to format report timestamp")?;
        let report = SelectionReport {
            generated_at,
            analysis,
            copied,
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        let report_path = dir.join(REPORT_FILENAME);
        fs::write(&report_path, json)
            .with_context(|| format!("failed to write {}", report_path.display()))?;

        info!(
            "wrote {} selected photos and report to {}",
            analysis.selected.len(),
            dir.display()
        );
        Ok(())
    }
}

/// Order prefix for a 1-based selection slot.
fn slot_prefix(slot: usize) -> String {
    match slot {
        1 => "01_first_".to_string(),
        2 => "02_second_".to_string(),
        3 => "03_third_".to_string(),
        n => format!("{n:02}_"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_prefixes() {
        assert_eq!(slot_prefix(1), "01_first_");
        assert_eq!(slot_prefix(2), "02_second_");
        assert_eq!(slot_prefix(3), "03_third_");
        assert_eq!(slot_prefix(4), "04_");
        assert_eq!(slot_prefix(11), "11_");
    }
}
