// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Who triggered a presentation change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// `set_presentation_mode` was called.
    Api,
    /// The host OS reported the change.
    Host,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A player event reached the overlay.
    PlayerEvent { name: String },

    /// The overlay moved between hidden / fading / showing.
    OverlayTransition { from: String, to: String },

    /// A menu was pushed or popped.
    MenuChange {
        depth: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<String>,
    },

    /// The presentation mode changed (or was re-announced by the host).
    PresentationChange {
        from: String,
        to: String,
        source: ChangeSource,
    },

    /// A non-fatal problem, e.g. a host call that failed during teardown.
    Warning { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::OverlayTransition {
            from: "showing".into(),
            to: "fading_out".into(),
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"overlay_transition\""));
        assert!(json.contains("\"to\":\"fading_out\""));
    }

    #[test]
    fn menu_change_omits_missing_active_menu() {
        let kind = DiagnosticEventKind::MenuChange {
            depth: 0,
            active: None,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(!json.contains("active"));
    }

    #[test]
    fn presentation_change_round_trips() {
        let kind = DiagnosticEventKind::PresentationChange {
            from: "inline".into(),
            to: "picture-in-picture".into(),
            source: ChangeSource::Host,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        let back: DiagnosticEventKind =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(back, kind);
    }
}
