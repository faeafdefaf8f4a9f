// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Serialization(String),
    Host(HostError),
}

/// Failures reported by the host platform integration.
///
/// These never reach the user: teardown paths swallow them and the
/// controllers record them as diagnostics warnings instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host context (activity, window) is no longer available.
    ContextGone,
    /// A signal receiver was not registered, or already unregistered.
    NotRegistered,
    /// The host does not support the requested capability.
    Unsupported,
    /// The host refused the request.
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ContextGone => write!(f, "Host context is gone"),
            HostError::NotRegistered => write!(f, "Receiver is not registered"),
            HostError::Unsupported => write!(f, "Unsupported by host"),
            HostError::Rejected(msg) => write!(f, "Rejected by host: {}", msg),
        }
    }
}

/// Category of a player-reported error.
/// Used to pick the heading of the error view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerErrorCode {
    /// Network or manifest download failure.
    Network,
    /// DRM license or key system failure.
    ContentProtection,
    /// Media could not be decoded.
    Media,
    /// Source could not be loaded or is unsupported.
    Source,
    /// Anything else.
    Other,
}

impl PlayerErrorCode {
    /// Returns the message key for this category.
    pub fn message_key(self) -> &'static str {
        match self {
            PlayerErrorCode::Network => "error-player-network",
            PlayerErrorCode::ContentProtection => "error-player-content-protection",
            PlayerErrorCode::Media => "error-player-media",
            PlayerErrorCode::Source => "error-player-source",
            PlayerErrorCode::Other => "error-player-general",
        }
    }

    /// Categorizes a raw SDK error code or message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // DRM first, license errors often mention the network too
        if msg_lower.contains("drm")
            || msg_lower.contains("license")
            || msg_lower.contains("content_protection")
            || msg_lower.contains("key system")
        {
            return PlayerErrorCode::ContentProtection;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("timeout")
            || msg_lower.contains("http")
            || msg_lower.contains("manifest")
        {
            return PlayerErrorCode::Network;
        }

        if msg_lower.contains("decode") || msg_lower.contains("codec") || msg_lower.contains("media")
        {
            return PlayerErrorCode::Media;
        }

        if msg_lower.contains("source") || msg_lower.contains("unsupported") {
            return PlayerErrorCode::Source;
        }

        PlayerErrorCode::Other
    }
}

/// Error payload delivered by the player's error event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerError {
    pub code: PlayerErrorCode,
    pub message: String,
}

impl PlayerError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code: PlayerErrorCode::from_message(&message),
            message,
        }
    }

    pub fn with_code(code: PlayerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Serialization(e) => write!(f, "Serialization Error: {}", e),
            Error::Host(e) => write!(f, "Host Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Error::Host(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
