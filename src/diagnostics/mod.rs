// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the overlay and presentation controllers.
//!
//! Controllers log overlay transitions, menu changes, presentation changes
//! and host warnings through a [`DiagnosticsHandle`]. The events land in a
//! memory-bounded [`CircularBuffer`] and can be exported as a JSON report.

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{ChangeSource, DiagnosticEvent, DiagnosticEventKind};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
