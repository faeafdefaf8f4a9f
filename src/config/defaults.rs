// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Overlay**: Auto-hide timeout and fade animation
//! - **Presentation**: Picture-in-picture defaults
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default delay before the control overlay auto-hides (in milliseconds).
pub const DEFAULT_FADE_TIMEOUT_MS: u32 = 2500;

/// Minimum auto-hide delay (in milliseconds).
pub const MIN_FADE_TIMEOUT_MS: u32 = 500;

/// Maximum auto-hide delay (in milliseconds).
pub const MAX_FADE_TIMEOUT_MS: u32 = 30_000;

/// Duration of a single fade-in or fade-out animation (in milliseconds).
pub const FADE_ANIMATION_MS: u64 = 200;

/// Interval of the demo application's animation tick (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

// ==========================================================================
// Presentation Defaults
// ==========================================================================

/// Whether the player enters picture-in-picture when the app is backgrounded.
pub const DEFAULT_AUTO_ENTER_PICTURE_IN_PICTURE: bool = false;

/// Aspect ratio numerator used when the video size is unknown.
pub const DEFAULT_ASPECT_RATIO_WIDTH: u32 = 16;

/// Aspect ratio denominator used when the video size is unknown.
pub const DEFAULT_ASPECT_RATIO_HEIGHT: u32 = 9;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_FADE_TIMEOUT_MS > 0);
    assert!(MAX_FADE_TIMEOUT_MS >= MIN_FADE_TIMEOUT_MS);
    assert!(DEFAULT_FADE_TIMEOUT_MS >= MIN_FADE_TIMEOUT_MS);
    assert!(DEFAULT_FADE_TIMEOUT_MS <= MAX_FADE_TIMEOUT_MS);

    // The timer must outlast the fade it triggers
    assert!(MIN_FADE_TIMEOUT_MS as u64 > FADE_ANIMATION_MS);

    assert!(DEFAULT_ASPECT_RATIO_WIDTH > 0);
    assert!(DEFAULT_ASPECT_RATIO_HEIGHT > 0);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_timeout_defaults_are_valid() {
        assert_eq!(DEFAULT_FADE_TIMEOUT_MS, 2500);
        assert!(DEFAULT_FADE_TIMEOUT_MS >= MIN_FADE_TIMEOUT_MS);
        assert!(DEFAULT_FADE_TIMEOUT_MS <= MAX_FADE_TIMEOUT_MS);
    }

    #[test]
    fn fade_animation_is_200ms() {
        assert_eq!(FADE_ANIMATION_MS, 200);
    }

    #[test]
    fn default_aspect_ratio_is_16_by_9() {
        assert_eq!(
            (DEFAULT_ASPECT_RATIO_WIDTH, DEFAULT_ASPECT_RATIO_HEIGHT),
            (16, 9)
        );
    }

    #[test]
    fn diagnostics_defaults_are_valid() {
        assert_eq!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, 1000);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
