// SPDX-License-Identifier: MPL-2.0
//! Presentation mode controller: inline, fullscreen or picture-in-picture.
//!
//! The controller owns the mode of one player view and talks to the host OS
//! through [`PresentationHost`]. Host signals (the app going to background,
//! the OS entering or leaving picture-in-picture) arrive on a channel that
//! [`PresentationController::process_host_signals`] drains.
//!
//! Mode changes requested through the API are deduplicated. Changes the OS
//! reports are always forwarded, even when the mode did not change, because
//! the OS is the source of truth for its own picture-in-picture window.

mod view_tree;

pub use view_tree::{find_video_surface_rect, ViewKind, ViewNode};

use crate::diagnostics::{ChangeSource, DiagnosticsHandle};
use crate::domain::presentation::{AspectRatio, PresentationMode, Rect};
use crate::error::HostError;
use crate::observer::{Observers, SubscriptionId};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Notification pushed by the host OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The user is leaving the app (home button, app switch).
    UserLeaveHint,
    /// The OS entered (`true`) or left (`false`) picture-in-picture.
    PictureInPictureModeChanged(bool),
}

impl HostSignal {
    #[must_use]
    pub fn kind(self) -> HostSignalKind {
        match self {
            Self::UserLeaveHint => HostSignalKind::UserLeaveHint,
            Self::PictureInPictureModeChanged(_) => HostSignalKind::PictureInPictureModeChanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignalKind {
    UserLeaveHint,
    PictureInPictureModeChanged,
}

impl HostSignalKind {
    pub const ALL: [HostSignalKind; 2] = [
        HostSignalKind::UserLeaveHint,
        HostSignalKind::PictureInPictureModeChanged,
    ];
}

/// Identifies a receiver registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverId(pub u64);

/// Parameters of a picture-in-picture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipParams {
    /// Where the video currently is, so the OS can animate from it.
    pub source_rect_hint: Option<Rect>,
    pub aspect_ratio: AspectRatio,
}

/// The host OS integration of a player view.
pub trait PresentationHost {
    /// Whether the OS offers picture-in-picture at all.
    fn supports_picture_in_picture(&self) -> bool;

    /// Whether the host window is currently in picture-in-picture.
    fn is_in_picture_in_picture(&self) -> bool;

    /// Asks the OS to move the host window into picture-in-picture.
    fn enter_picture_in_picture(&mut self, params: &PipParams) -> Result<(), HostError>;

    /// Hides (`true`) or restores the system bars.
    fn set_immersive(&mut self, immersive: bool) -> Result<(), HostError>;

    fn register_receiver(
        &mut self,
        kind: HostSignalKind,
        sender: Sender<HostSignal>,
    ) -> Result<ReceiverId, HostError>;

    fn unregister_receiver(&mut self, id: ReceiverId) -> Result<(), HostError>;

    /// Root of the player view hierarchy, if it is attached.
    fn player_view(&self) -> Option<&ViewNode>;

    /// Intrinsic size of the current video, if known.
    fn video_size(&self) -> Option<(u32, u32)>;
}

/// Owns the presentation mode for one player view.
///
/// Host receivers are registered on construction and unregistered by
/// [`teardown`](Self::teardown), which also runs on drop.
pub struct PresentationController<H: PresentationHost> {
    host: H,
    mode: PresentationMode,
    auto_enter_picture_in_picture: bool,
    receivers: Vec<ReceiverId>,
    signals_tx: Sender<HostSignal>,
    signals_rx: Receiver<HostSignal>,
    observers: Observers<PresentationMode>,
    diagnostics: DiagnosticsHandle,
    torn_down: bool,
}

impl<H: PresentationHost> PresentationController<H> {
    /// Creates the controller and registers its host receivers.
    ///
    /// Registration failures are recorded as warnings; the controller still
    /// works through its API, it just won't hear from the OS.
    pub fn new(
        mut host: H,
        auto_enter_picture_in_picture: bool,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        let (signals_tx, signals_rx) = unbounded();
        let mut receivers = Vec::with_capacity(HostSignalKind::ALL.len());
        for kind in HostSignalKind::ALL {
            match host.register_receiver(kind, signals_tx.clone()) {
                Ok(id) => receivers.push(id),
                Err(err) => diagnostics.log_warning(format!("register {kind:?}: {err}")),
            }
        }

        Self {
            host,
            mode: PresentationMode::Inline,
            auto_enter_picture_in_picture,
            receivers,
            signals_tx,
            signals_rx,
            observers: Observers::new(),
            diagnostics,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.mode.is_fullscreen()
    }

    #[must_use]
    pub fn is_picture_in_picture(&self) -> bool {
        self.mode.is_picture_in_picture()
    }

    #[must_use]
    pub fn auto_enter_picture_in_picture(&self) -> bool {
        self.auto_enter_picture_in_picture
    }

    /// Switches to `mode`.
    ///
    /// Returns `true` if the mode changed. Requesting the current mode does
    /// nothing and notifies nobody. Entering picture-in-picture without host
    /// support, or when the host refuses, leaves the mode unchanged.
    pub fn set_presentation_mode(&mut self, mode: PresentationMode) -> bool {
        if self.torn_down || mode == self.mode {
            return false;
        }

        if mode == PresentationMode::PictureInPicture && !self.request_picture_in_picture() {
            return false;
        }

        if self.mode.is_fullscreen() != mode.is_fullscreen() {
            self.apply_immersive(mode.is_fullscreen());
        }
        self.transition(mode, ChangeSource::Api);
        true
    }

    /// Whether playback should pause when the host app is paused.
    ///
    /// Keep playing only if the OS can do picture-in-picture and we are
    /// either already in it or about to enter it automatically.
    #[must_use]
    pub fn should_suspend_on_host_pause(&self) -> bool {
        let keeps_playing = self.host.supports_picture_in_picture()
            && (self.host.is_in_picture_in_picture()
                || self.mode.is_picture_in_picture()
                || self.auto_enter_picture_in_picture);
        !keeps_playing
    }

    /// Handles every host signal queued since the last call.
    pub fn process_host_signals(&mut self) {
        while let Ok(signal) = self.signals_rx.try_recv() {
            self.handle_host_signal(signal);
        }
    }

    pub fn handle_host_signal(&mut self, signal: HostSignal) {
        if self.torn_down {
            return;
        }
        match signal {
            HostSignal::UserLeaveHint => {
                if self.auto_enter_picture_in_picture {
                    self.set_presentation_mode(PresentationMode::PictureInPicture);
                }
            }
            HostSignal::PictureInPictureModeChanged(in_pip) => {
                // The mode is a single value, so the OS flag always wins: leaving
                // PiP lands in inline even if the controller thought it was
                // fullscreen, and the system bars are restored to match.
                let mode = if in_pip {
                    PresentationMode::PictureInPicture
                } else {
                    PresentationMode::Inline
                };
                if self.mode.is_fullscreen() {
                    self.apply_immersive(false);
                }
                self.transition(mode, ChangeSource::Host);
            }
        }
    }

    /// Sender the host (or a test) can push signals into.
    #[must_use]
    pub fn signal_sender(&self) -> Sender<HostSignal> {
        self.signals_tx.clone()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&PresentationMode) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Unregisters host receivers and drops queued signals.
    ///
    /// Never fails: host errors (receiver already gone, context destroyed)
    /// are recorded as warnings. Calling it again does nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        for id in self.receivers.drain(..) {
            if let Err(err) = self.host.unregister_receiver(id) {
                self.diagnostics
                    .log_warning(format!("unregister receiver {}: {err}", id.0));
            }
        }
        while self.signals_rx.try_recv().is_ok() {}
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn request_picture_in_picture(&mut self) -> bool {
        if !self.host.supports_picture_in_picture() {
            self.diagnostics
                .log_warning("picture-in-picture is not supported by the host");
            return false;
        }

        let params = PipParams {
            source_rect_hint: self.host.player_view().and_then(find_video_surface_rect),
            aspect_ratio: AspectRatio::for_video(self.host.video_size()),
        };
        match self.host.enter_picture_in_picture(&params) {
            Ok(()) => true,
            Err(err) => {
                self.diagnostics
                    .log_warning(format!("enter picture-in-picture: {err}"));
                false
            }
        }
    }

    fn apply_immersive(&mut self, immersive: bool) {
        if let Err(err) = self.host.set_immersive(immersive) {
            self.diagnostics
                .log_warning(format!("set immersive {immersive}: {err}"));
        }
    }

    fn transition(&mut self, mode: PresentationMode, source: ChangeSource) {
        let from = self.mode;
        self.mode = mode;
        self.diagnostics.log_presentation_change(from, mode, source);
        self.observers.notify(&mode);
    }
}

impl<H: PresentationHost> Drop for PresentationController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: PresentationHost> std::fmt::Debug for PresentationController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationController")
            .field("mode", &self.mode)
            .field(
                "auto_enter_picture_in_picture",
                &self.auto_enter_picture_in_picture,
            )
            .field("receivers", &self.receivers)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
