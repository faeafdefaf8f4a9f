// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report generation and JSON export.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

// =============================================================================
// Report Metadata
// =============================================================================

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (ISO 8601)
    pub generated_at: String,
    /// Crate version that generated the report
    pub version: String,
    /// When diagnostic collection started (ISO 8601)
    pub collection_started_at: String,
    /// Duration of collection in milliseconds
    pub collection_duration_ms: u64,
    /// Total number of events in the report
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

// =============================================================================
// Serializable Event
// =============================================================================

/// A diagnostic event with its timestamp made relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

// =============================================================================
// Diagnostic Report
// =============================================================================

/// Count of events by type, e.g. `"overlay_transition": 12`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub event_counts: BTreeMap<String, usize>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut event_counts = BTreeMap::new();
        for event in events {
            let type_name = match &event.kind {
                DiagnosticEventKind::PlayerEvent { .. } => "player_event",
                DiagnosticEventKind::OverlayTransition { .. } => "overlay_transition",
                DiagnosticEventKind::MenuChange { .. } => "menu_change",
                DiagnosticEventKind::PresentationChange { .. } => "presentation_change",
                DiagnosticEventKind::Warning { .. } => "warning",
            };
            *event_counts.entry(type_name.to_string()).or_insert(0) += 1;
        }
        Self { event_counts }
    }
}

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    /// Creates a new diagnostic report with summary computed automatically.
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            events,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn serializable_event_uses_relative_timestamp() {
        let start = Instant::now();
        let event = SerializableEvent::new(
            start + Duration::from_millis(250),
            start,
            DiagnosticEventKind::Warning {
                message: "late".into(),
            },
        );
        assert_eq!(event.timestamp_ms, 250);
    }

    #[test]
    fn event_before_start_clamps_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let event = SerializableEvent::new(
            Instant::now(),
            start,
            DiagnosticEventKind::Warning {
                message: "early".into(),
            },
        );
        assert_eq!(event.timestamp_ms, 0);
    }

    #[test]
    fn summary_counts_by_type() {
        let start = Instant::now();
        let events = vec![
            SerializableEvent::new(
                start,
                start,
                DiagnosticEventKind::PlayerEvent {
                    name: "play".into(),
                },
            ),
            SerializableEvent::new(
                start,
                start,
                DiagnosticEventKind::PlayerEvent {
                    name: "pause".into(),
                },
            ),
            SerializableEvent::new(
                start,
                start,
                DiagnosticEventKind::MenuChange {
                    depth: 1,
                    active: Some("settings".into()),
                },
            ),
        ];
        let summary = ReportSummary::from_events(&events);
        assert_eq!(summary.event_counts.get("player_event"), Some(&2));
        assert_eq!(summary.event_counts.get("menu_change"), Some(&1));
        assert_eq!(summary.event_counts.get("warning"), None);
    }
}
