// SPDX-License-Identifier: MPL-2.0
//! Iced views for the player overlay.
//!
//! - [`overlay`] - Renders a [`RenderPlan`](crate::overlay::RenderPlan)
//! - [`design_tokens`] - Colors, spacing and type scale

pub mod design_tokens;
pub mod overlay;
