// SPDX-License-Identifier: MPL-2.0
//! Cast session value objects.

/// Cast technology reporting a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    Chromecast,
    AirPlay,
}

impl CastTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chromecast => "chromecast",
            Self::AirPlay => "airplay",
        }
    }
}

/// Connection state of a cast session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastState {
    Available,
    #[default]
    Unavailable,
    Connecting,
    Connected,
}

impl CastState {
    /// Parses an SDK state name. Unknown names map to `Unavailable`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "available" => Self::Available,
            "connecting" => Self::Connecting,
            "connected" => Self::Connected,
            _ => Self::Unavailable,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }

    /// Whether playback is (about to be) on a remote device.
    #[must_use]
    pub fn is_casting(self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }
}

/// Status line shown while casting, e.g. "Playing on chromecast".
#[must_use]
pub fn cast_message(target: CastTarget, state: CastState) -> Option<String> {
    match state {
        CastState::Connecting => Some(format!("Connecting to {} ...", target.as_str())),
        CastState::Connected => Some(format!("Playing on {}", target.as_str())),
        CastState::Available | CastState::Unavailable => None,
    }
}
