// SPDX-License-Identifier: MPL-2.0
//! Presentation mode value objects.
//!
//! A player is presented in exactly one mode at a time. Keeping the mode
//! as a single enum (rather than separate fullscreen / pip flags) makes
//! the two exclusive by construction.

use std::fmt;

/// How the player surface is currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationMode {
    #[default]
    Inline,
    Fullscreen,
    PictureInPicture,
}

impl PresentationMode {
    #[must_use]
    pub fn is_fullscreen(self) -> bool {
        matches!(self, Self::Fullscreen)
    }

    #[must_use]
    pub fn is_picture_in_picture(self) -> bool {
        matches!(self, Self::PictureInPicture)
    }

    /// Wire name used by player events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Fullscreen => "fullscreen",
            Self::PictureInPicture => "picture-in-picture",
        }
    }

    /// Parses the wire name of a mode.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "inline" => Some(Self::Inline),
            "fullscreen" => Some(Self::Fullscreen),
            "picture-in-picture" => Some(Self::PictureInPicture),
            _ => None,
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle in host window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Width-to-height ratio handed to the OS when entering picture-in-picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    numerator: u32,
    denominator: u32,
}

impl AspectRatio {
    /// 16:9, used whenever the video size is unknown.
    pub const WIDESCREEN: Self = Self {
        numerator: 16,
        denominator: 9,
    };

    /// Builds a ratio from the video size, or `None` if either side is zero.
    #[must_use]
    pub fn from_video_size(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            numerator: width,
            denominator: height,
        })
    }

    /// Ratio for an optional video size, falling back to 16:9.
    #[must_use]
    pub fn for_video(size: Option<(u32, u32)>) -> Self {
        size.and_then(|(w, h)| Self::from_video_size(w, h))
            .unwrap_or(Self::WIDESCREEN)
    }

    #[must_use]
    pub fn numerator(self) -> u32 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(self) -> u32 {
        self.denominator
    }

    #[must_use]
    pub fn as_f32(self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_inline() {
        assert_eq!(PresentationMode::default(), PresentationMode::Inline);
    }

    #[test]
    fn mode_wire_names_round_trip() {
        for mode in [
            PresentationMode::Inline,
            PresentationMode::Fullscreen,
            PresentationMode::PictureInPicture,
        ] {
            assert_eq!(PresentationMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(PresentationMode::parse("theater"), None);
    }

    #[test]
    fn aspect_ratio_uses_video_size_when_positive() {
        let ratio = AspectRatio::for_video(Some((1280, 720)));
        assert_eq!(ratio.numerator(), 1280);
        assert_eq!(ratio.denominator(), 720);
    }

    #[test]
    fn aspect_ratio_falls_back_to_widescreen() {
        assert_eq!(AspectRatio::for_video(None), AspectRatio::WIDESCREEN);
        assert_eq!(AspectRatio::for_video(Some((1920, 0))), AspectRatio::WIDESCREEN);
        assert_eq!(AspectRatio::for_video(Some((0, 1080))), AspectRatio::WIDESCREEN);
    }

    #[test]
    fn rect_dimensions() {
        let rect = Rect::new(10, 20, 110, 70);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
        assert!(!rect.is_empty());
        assert!(Rect::default().is_empty());
    }
}
