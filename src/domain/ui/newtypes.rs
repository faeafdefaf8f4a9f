// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for overlay values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Fade Timeout Bounds
// =============================================================================

/// Auto-hide timeout bounds (0.5 to 30 seconds).
pub mod fade_timeout_bounds {
    /// Minimum timeout in milliseconds.
    pub const MIN_MS: u32 = 500;
    /// Maximum timeout in milliseconds.
    pub const MAX_MS: u32 = 30_000;
    /// Default timeout in milliseconds.
    pub const DEFAULT_MS: u32 = 2500;
}

// =============================================================================
// FadeTimeout
// =============================================================================

/// Delay between the last activity and the overlay fading out.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (500 ms–30 s).
///
/// # Example
///
/// ```
/// use player_overlay::domain::ui::FadeTimeout;
///
/// let timeout = FadeTimeout::new(3000);
/// assert_eq!(timeout.value_ms(), 3000);
///
/// // Values outside range are clamped
/// let too_low = FadeTimeout::new(10);
/// assert_eq!(too_low.value_ms(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTimeout(u32);

impl FadeTimeout {
    /// Creates a new timeout, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(fade_timeout_bounds::MIN_MS, fade_timeout_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value_ms(self) -> u32 {
        self.0
    }

    /// Returns the timeout as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for FadeTimeout {
    fn default() -> Self {
        Self(fade_timeout_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Opacity
// =============================================================================

/// Overlay opacity, guaranteed to be within 0.0 (hidden) and 1.0 (shown).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Opacity(f32);

impl Opacity {
    /// Fully transparent.
    pub const HIDDEN: Self = Self(0.0);
    /// Fully opaque.
    pub const SHOWN: Self = Self(1.0);

    /// Creates a new opacity, clamping to the valid range. NaN maps to hidden.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::HIDDEN;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Linear interpolation from `self` towards `target`.
    #[must_use]
    pub fn lerp(self, target: Opacity, progress: f32) -> Self {
        let t = progress.clamp(0.0, 1.0);
        Self::new(self.0 + (target.0 - self.0) * t)
    }

    #[must_use]
    pub fn is_hidden(self) -> bool {
        self.0 <= 0.0
    }

    #[must_use]
    pub fn is_shown(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::SHOWN
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Host platform the overlay is rendered on.
///
/// Pointer-move input only exists on the web, and native platforms hand
/// picture-in-picture chrome over to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Android,
    Ios,
    Web,
}

impl Platform {
    #[must_use]
    pub fn is_web(self) -> bool {
        matches!(self, Self::Web)
    }

    /// Whether pointer movement counts as user activity.
    #[must_use]
    pub fn has_pointer(self) -> bool {
        self.is_web()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }

    /// Parses a platform name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            "web" => Some(Self::Web),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
