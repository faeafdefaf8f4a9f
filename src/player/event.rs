// SPDX-License-Identifier: MPL-2.0
//! Player lifecycle events.

use crate::domain::cast::{CastState, CastTarget};
use crate::domain::presentation::PresentationMode;
use crate::error::PlayerError;

/// Event type used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEventKind {
    LoadStart,
    Play,
    Playing,
    Pause,
    SourceChange,
    Ended,
    Error,
    Cast,
    PresentationModeChange,
}

impl PlayerEventKind {
    /// Every kind, in the order listeners are attached.
    pub const ALL: [PlayerEventKind; 9] = [
        PlayerEventKind::LoadStart,
        PlayerEventKind::Error,
        PlayerEventKind::Cast,
        PlayerEventKind::Play,
        PlayerEventKind::Playing,
        PlayerEventKind::Pause,
        PlayerEventKind::SourceChange,
        PlayerEventKind::Ended,
        PlayerEventKind::PresentationModeChange,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadStart => "loadstart",
            Self::Play => "play",
            Self::Playing => "playing",
            Self::Pause => "pause",
            Self::SourceChange => "sourcechange",
            Self::Ended => "ended",
            Self::Error => "error",
            Self::Cast => "cast",
            Self::PresentationModeChange => "presentationmodechange",
        }
    }
}

/// Sub-events of the cast event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastEvent {
    /// A Chromecast or AirPlay session changed state.
    StateChange { target: CastTarget, state: CastState },
    /// A cast session reported an error.
    Error { message: String },
}

/// A typed event delivered by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    LoadStart,
    Play,
    Playing,
    Pause,
    SourceChange,
    Ended,
    Error(PlayerError),
    Cast(CastEvent),
    PresentationModeChange(PresentationMode),
}

impl PlayerEvent {
    #[must_use]
    pub fn kind(&self) -> PlayerEventKind {
        match self {
            Self::LoadStart => PlayerEventKind::LoadStart,
            Self::Play => PlayerEventKind::Play,
            Self::Playing => PlayerEventKind::Playing,
            Self::Pause => PlayerEventKind::Pause,
            Self::SourceChange => PlayerEventKind::SourceChange,
            Self::Ended => PlayerEventKind::Ended,
            Self::Error(_) => PlayerEventKind::Error,
            Self::Cast(_) => PlayerEventKind::Cast,
            Self::PresentationModeChange(_) => PlayerEventKind::PresentationModeChange,
        }
    }

    /// Shorthand for a cast state change.
    #[must_use]
    pub fn cast_state(target: CastTarget, state: CastState) -> Self {
        Self::Cast(CastEvent::StateChange { target, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(PlayerEvent::Playing.kind(), PlayerEventKind::Playing);
        assert_eq!(
            PlayerEvent::Error(PlayerError::new("boom")).kind(),
            PlayerEventKind::Error
        );
        assert_eq!(
            PlayerEvent::cast_state(CastTarget::AirPlay, CastState::Connected).kind(),
            PlayerEventKind::Cast
        );
        assert_eq!(
            PlayerEvent::PresentationModeChange(PresentationMode::Fullscreen).kind(),
            PlayerEventKind::PresentationModeChange
        );
    }

    #[test]
    fn all_kinds_are_distinct() {
        let kinds: std::collections::HashSet<_> = PlayerEventKind::ALL.iter().collect();
        assert_eq!(kinds.len(), 9);
        let names: std::collections::HashSet<_> =
            PlayerEventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), 9);
    }
}
