// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`cast`]: Cast session state ([`CastState`](cast::CastState), [`CastTarget`](cast::CastTarget))
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`presentation`]: Presentation types ([`PresentationMode`](presentation::PresentationMode),
//!   [`AspectRatio`](presentation::AspectRatio), [`Rect`](presentation::Rect))
//! - [`ui`]: Overlay value objects ([`FadeTimeout`](ui::FadeTimeout),
//!   [`Opacity`](ui::Opacity), [`Platform`](ui::Platform))

pub mod cast;
pub mod diagnostics;
pub mod presentation;
pub mod ui;
