//! JSON output adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use photo_pick_core::domain::FolderAnalysis;
use serde::Serialize;

/// JSON output adapter writing to one stream.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Creates a new JSON output writing to the given writer.
    #[allow(dead_code)] // API for programmatic use
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes a folder analysis.
    pub fn write_analysis(&self, analysis: &FolderAnalysis, pretty: bool) -> Result<()> {
        self.write_value(analysis, pretty)
    }

    /// Writes any serializable value as one JSON document.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_value<T: Serialize>(&self, value: &T, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}
