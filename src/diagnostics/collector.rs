// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Controllers hold a [`DiagnosticsHandle`]; the owner of the collector
//! drains the channel on each tick with [`DiagnosticsCollector::process_pending`].

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::{
    BufferCapacity, ChangeSource, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, ReportMetadata, SerializableEvent,
};
use crate::domain::presentation::PresentationMode;
use crate::error::Result;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sends never block: when the channel is full the
/// event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// A handle whose events go nowhere.
    ///
    /// Used by controllers constructed without a collector.
    #[must_use]
    pub fn disconnected() -> Self {
        let (event_tx, _) = bounded(1);
        Self { event_tx }
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_player_event(&self, name: &str) {
        self.send(DiagnosticEventKind::PlayerEvent {
            name: name.to_string(),
        });
    }

    pub fn log_transition(&self, from: &str, to: &str) {
        self.send(DiagnosticEventKind::OverlayTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn log_menu_change(&self, depth: usize, active: Option<&str>) {
        self.send(DiagnosticEventKind::MenuChange {
            depth,
            active: active.map(str::to_string),
        });
    }

    pub fn log_presentation_change(
        &self,
        from: PresentationMode,
        to: PresentationMode,
        source: ChangeSource,
    ) {
        self.send(DiagnosticEventKind::PresentationChange {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            source,
        });
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }
}

impl Default for DiagnosticsHandle {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Central collector for diagnostic events.
///
/// Events arrive through a bounded channel and are stored in a
/// memory-bounded circular buffer.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for relative event timestamps.
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Records an event directly, bypassing the channel.
    pub fn record(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all collected events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.export_json()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn handle_events_arrive_after_process_pending() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_player_event("play");
        handle.log_transition("hidden", "fading_in");
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn buffer_capacity_bounds_stored_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        let handle = collector.handle();
        for i in 0..25 {
            handle.log_warning(format!("warning {i}"));
        }
        collector.process_pending();
        assert_eq!(collector.len(), 10);

        let first = collector.iter().next().map(|e| e.kind.clone());
        assert_eq!(
            first,
            Some(DiagnosticEventKind::Warning {
                message: "warning 15".into()
            })
        );
    }

    #[test]
    fn disconnected_handle_drops_silently() {
        let handle = DiagnosticsHandle::disconnected();
        handle.log_warning("nobody listens");
        handle.log_menu_change(0, None);
    }

    #[test]
    fn export_json_contains_metadata_and_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.record(DiagnosticEventKind::PresentationChange {
            from: "inline".into(),
            to: "fullscreen".into(),
            source: ChangeSource::Api,
        });

        let json = collector.export_json().expect("export should succeed");
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("JSON should be parseable");

        assert_eq!(parsed["metadata"]["event_count"], 1);
        assert_eq!(parsed["events"][0]["type"], "presentation_change");
        assert_eq!(parsed["events"][0]["source"], "api");
        assert_eq!(
            parsed["summary"]["event_counts"]["presentation_change"],
            1
        );
    }

    #[test]
    fn export_to_file_writes_report() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("reports").join("overlay.json");

        let mut collector = DiagnosticsCollector::default();
        collector.record(DiagnosticEventKind::Warning {
            message: "host rejected".into(),
        });
        collector
            .export_to_file(&path)
            .expect("export should succeed");

        let content = std::fs::read_to_string(&path).expect("file should exist");
        assert!(content.contains("host rejected"));
    }
}
