// SPDX-License-Identifier: MPL-2.0
//! Modal menu stack.

/// Menus the overlay can show in place of the control bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuDescriptor {
    Settings,
    Language,
    Quality,
    PlaybackRate,
    RenderingTarget,
}

impl MenuDescriptor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Language => "language",
            Self::Quality => "quality",
            Self::PlaybackRate => "playback-rate",
            Self::RenderingTarget => "rendering-target",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::Language => "Language",
            Self::Quality => "Quality",
            Self::PlaybackRate => "Playback rate",
            Self::RenderingTarget => "Rendering target",
        }
    }

    /// Sub-menus reachable from this menu.
    #[must_use]
    pub fn children(self) -> &'static [MenuDescriptor] {
        match self {
            Self::Settings => &[Self::Quality, Self::PlaybackRate, Self::RenderingTarget],
            Self::Language | Self::Quality | Self::PlaybackRate | Self::RenderingTarget => &[],
        }
    }
}

/// Ordered stack of open menus; the last one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuStack {
    menus: Vec<MenuDescriptor>,
}

impl MenuStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, menu: MenuDescriptor) {
        self.menus.push(menu);
    }

    pub fn pop(&mut self) -> Option<MenuDescriptor> {
        self.menus.pop()
    }

    #[must_use]
    pub fn active(&self) -> Option<MenuDescriptor> {
        self.menus.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MenuDescriptor] {
        &self.menus
    }
}
