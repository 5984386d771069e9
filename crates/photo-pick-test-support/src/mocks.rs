//! Mock implementations of core port traits.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::anyhow;
use photo_pick_core::domain::{FolderAnalysis, LabelScore, PhotoInfo};
use photo_pick_core::ports::{LabelProvider, PhotoSource, ProgressEvent, ProgressSink, ReportSink};

/// Mock implementation of `LabelProvider` for testing.
///
/// Returns canned labels per filename and can be told to fail for
/// specific files to exercise the degraded-scoring path.
pub struct MockLabelProvider {
    labels: BTreeMap<String, Vec<LabelScore>>,
    failing: Vec<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockLabelProvider {
    /// Creates a provider with no canned labels; unknown files classify
    /// to an empty label list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: BTreeMap::new(),
            failing: Vec::new(),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Registers canned labels for a filename.
    #[must_use]
    pub fn with_labels(mut self, filename: impl Into<String>, labels: &[(&str, f32)]) -> Self {
        self.labels.insert(
            filename.into(),
            labels
                .iter()
                .map(|(label, confidence)| LabelScore {
                    label: (*label).to_string(),
                    confidence: *confidence,
                })
                .collect(),
        );
        self
    }

    /// Makes classification fail for a filename.
    #[must_use]
    pub fn failing_for(mut self, filename: impl Into<String>) -> Self {
        self.failing.push(filename.into());
        self
    }

    /// Returns the number of `classify` calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockLabelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelProvider for MockLabelProvider {
    fn classify(&self, photo: &PhotoInfo) -> anyhow::Result<Vec<LabelScore>> {
        if let Ok(mut c) = self.call_count.lock() {
            *c += 1;
        }
        if self.failing.contains(&photo.filename) {
            return Err(anyhow!("mock classification failure for {}", photo.filename));
        }
        Ok(self.labels.get(&photo.filename).cloned().unwrap_or_default())
    }
}

/// Mock implementation of `PhotoSource` for testing.
///
/// Yields pre-built photos, optionally followed by read errors, and
/// tracks iteration for assertions.
pub struct MockPhotoSource {
    photos: Vec<PhotoInfo>,
    read_errors: Vec<String>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockPhotoSource {
    /// Creates a new mock source with the given photos.
    #[must_use]
    pub fn new(photos: Vec<PhotoInfo>) -> Self {
        Self {
            photos,
            read_errors: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Adds an unreadable-photo error to the iteration.
    #[must_use]
    pub fn with_read_error(mut self, reason: impl Into<String>) -> Self {
        self.read_errors.push(reason.into());
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PhotoSource for MockPhotoSource {
    fn photos(&self) -> Box<dyn Iterator<Item = anyhow::Result<PhotoInfo>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        let errors = self
            .read_errors
            .iter()
            .map(|reason| Err(anyhow!("{reason}")));
        Box::new(self.photos.iter().cloned().map(Ok).chain(errors))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.photos.len())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Scored` events.
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Scored { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Mock implementation of `ReportSink` for testing.
///
/// Captures analyses for later assertions.
pub struct MockReportSink {
    reports: Arc<Mutex<Vec<FolderAnalysis>>>,
}

impl MockReportSink {
    /// Creates a new mock report sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured analyses.
    #[must_use]
    pub fn reports(&self) -> Vec<FolderAnalysis> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for MockReportSink {
    fn write(&self, analysis: &FolderAnalysis) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(analysis.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::PhotoBuilder;

    #[test]
    fn test_mock_photo_source_empty() {
        let source = MockPhotoSource::empty();
        assert_eq!(source.count_hint(), Some(0));
        assert_eq!(source.photos().count(), 0);
        assert_eq!(source.iteration_count(), 1);
    }

    #[test]
    fn test_mock_photo_source_with_errors() {
        let source = MockPhotoSource::new(vec![PhotoBuilder::new("a.jpg").build()])
            .with_read_error("corrupt file");
        let items: Vec<_> = source.photos().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_mock_label_provider() {
        let provider = MockLabelProvider::new()
            .with_labels("a.jpg", &[("backpack", 0.9)])
            .failing_for("b.jpg");

        let a = PhotoBuilder::new("a.jpg").build();
        let labels = provider.classify(&a).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label, "backpack");

        let b = PhotoBuilder::new("b.jpg").build();
        assert!(provider.classify(&b).is_err());

        let unknown = PhotoBuilder::new("c.jpg").build();
        assert!(provider.classify(&unknown).unwrap().is_empty());
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn test_mock_progress_sink() {
        let sink = MockProgressSink::new();
        sink.on_event(ProgressEvent::Skipped {
            reason: "corrupt".into(),
        });
        sink.on_event(ProgressEvent::Finished {
            processed: 2,
            skipped: 1,
        });
        assert_eq!(sink.skipped_count(), 1);
        assert_eq!(sink.finished_counts(), Some((2, 1)));
    }
}
