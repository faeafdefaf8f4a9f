// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the player overlay.
//!
//! - **Palette**: base colors
//! - **Opacity**: standardized alpha levels
//! - **Spacing**: 8px grid
//! - **Typography**: font size scale
//! - **Radius**: border radii
//!
//! ```
//! use player_overlay::ui::design_tokens::{opacity, palette};
//! use iced::Color;
//!
//! let scrim = Color {
//!     a: opacity::SCRIM,
//!     ..palette::BLACK
//! };
//! assert!(scrim.a < 1.0);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    /// Background behind the control bars.
    pub const SCRIM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    /// Controls that are drawn but not interactive.
    pub const DISABLED: f32 = 0.4;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

/// Scales the alpha channel of `color` by `factor`.
#[must_use]
pub fn faded(color: Color, factor: f32) -> Color {
    Color {
        a: color.a * factor.clamp(0.0, 1.0),
        ..color
    }
}

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SCRIM > 0.0 && opacity::SCRIM < 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY > typography::CAPTION);
};
