// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::ui::overlay;
use iced::window;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Overlay(overlay::Message),
    /// Periodic tick driving playback, the fade animation and the auto-hide timer.
    Tick(Instant),
    Simulate(Simulation),
    /// The first window event carries the id needed for fullscreen requests.
    WindowOpened(window::Id),
}

/// Keyboard shortcuts standing in for the native player and host OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simulation {
    /// `l`: load a new source.
    LoadSource,
    /// `space`: toggle playback.
    TogglePlayback,
    /// `c`: step the Chromecast session.
    CycleCast,
    /// `e`: fail with a network error.
    PlayerError,
    /// `h`: the user leaves the app.
    UserLeaveHint,
    /// `x`: the OS closes the picture-in-picture window.
    ExitPictureInPicture,
    /// `d`: write the diagnostics report.
    ExportDiagnostics,
    /// `Escape`: leave fullscreen, or close the active menu.
    Back,
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Platform whose overlay rules apply (`android`, `ios` or `web`).
    pub platform: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `PLAYER_OVERLAY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Forces automatic picture-in-picture on user leave, regardless of config.
    pub auto_pip: bool,
}
