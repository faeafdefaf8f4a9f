// SPDX-License-Identifier: MPL-2.0
//! Minimal model of the native view hierarchy around the player.
//!
//! Only used to find where the video is drawn, so the OS can animate the
//! picture-in-picture window out of the right rectangle.

use crate::domain::presentation::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// A container with children.
    Group,
    /// A surface the decoder renders into.
    Surface,
    /// A texture-backed video view.
    Texture,
    Other,
}

impl ViewKind {
    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, Self::Surface | Self::Texture)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub kind: ViewKind,
    /// Visible bounds in window coordinates.
    pub bounds: Rect,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    #[must_use]
    pub fn group(bounds: Rect, children: Vec<ViewNode>) -> Self {
        Self {
            kind: ViewKind::Group,
            bounds,
            children,
        }
    }

    #[must_use]
    pub fn surface(bounds: Rect) -> Self {
        Self::leaf(ViewKind::Surface, bounds)
    }

    #[must_use]
    pub fn texture(bounds: Rect) -> Self {
        Self::leaf(ViewKind::Texture, bounds)
    }

    #[must_use]
    pub fn other(bounds: Rect) -> Self {
        Self::leaf(ViewKind::Other, bounds)
    }

    fn leaf(kind: ViewKind, bounds: Rect) -> Self {
        Self {
            kind,
            bounds,
            children: Vec::new(),
        }
    }
}

/// Bounds of the first surface or texture view found depth-first under
/// `root`, children visited in order.
///
/// A group with no video inside does not end the search; its later
/// siblings are still visited.
#[must_use]
pub fn find_video_surface_rect(root: &ViewNode) -> Option<Rect> {
    root.children.iter().find_map(|child| {
        if child.kind.is_video() {
            Some(child.bounds)
        } else {
            find_video_surface_rect(child)
        }
    })
}
