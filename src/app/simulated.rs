// SPDX-License-Identifier: MPL-2.0
//! Stand-ins for the native player and host OS used by the demo.
//!
//! [`SimulatedPlayer`] advances a fake playback clock and emits the same
//! events a bridged player would. [`DemoHost`] plays the part of the OS
//! window: it accepts picture-in-picture requests, confirms them through its
//! registered receivers, and reports immersive mode as window fullscreen.

use crate::domain::cast::{CastState, CastTarget};
use crate::domain::presentation::{PresentationMode, Rect};
use crate::error::{HostError, PlayerError};
use crate::player::{EventHub, PlayerEvent, PlayerEventSource, PlayerStatus};
use crate::presentation::{
    HostSignal, HostSignalKind, PipParams, PresentationHost, ReceiverId, ViewNode,
};
use crossbeam_channel::Sender;
use std::time::Duration;

/// Length of the simulated clip.
const CLIP_DURATION_SECS: f64 = 90.0;

const VIDEO_SIZE: (u32, u32) = (1920, 1080);

#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    hub: EventHub,
    cast_state: CastState,
}

impl SimulatedPlayer {
    #[must_use]
    pub fn new(hub: EventHub) -> Self {
        Self {
            hub,
            cast_state: CastState::Unavailable,
        }
    }

    #[must_use]
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    #[must_use]
    pub fn status(&self) -> PlayerStatus {
        self.hub.status()
    }

    /// Loads a new source, paused at the start.
    pub fn load(&self) {
        self.hub.update_status(|status| {
            status.has_source = true;
            status.current_time = 0.0;
            status.paused = true;
            status.video_size = Some(VIDEO_SIZE);
        });
        self.hub.emit(PlayerEvent::LoadStart);
        self.hub.emit(PlayerEvent::SourceChange);
    }

    pub fn play(&self) {
        if !self.status().has_source {
            self.load();
        }
        self.hub.emit(PlayerEvent::Play);
        self.hub.emit(PlayerEvent::Playing);
    }

    pub fn pause(&self) {
        self.hub.emit(PlayerEvent::Pause);
    }

    pub fn toggle_playback(&self) {
        if self.status().paused {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Advances the playback clock, emitting `Ended` at the end of the clip.
    pub fn advance(&self, elapsed: Duration) {
        let status = self.status();
        if status.paused || !status.has_source {
            return;
        }
        let next = status.current_time + elapsed.as_secs_f64();
        if next >= CLIP_DURATION_SECS {
            self.hub
                .update_status(|status| status.current_time = CLIP_DURATION_SECS);
            self.hub.emit(PlayerEvent::Ended);
        } else {
            self.hub.update_status(|status| status.current_time = next);
        }
    }

    pub fn fail(&self, message: &str) {
        self.hub.emit(PlayerEvent::Error(PlayerError::new(message)));
    }

    /// Steps the Chromecast session through its states.
    pub fn cycle_cast(&mut self) {
        self.cast_state = match self.cast_state {
            CastState::Unavailable | CastState::Available => CastState::Connecting,
            CastState::Connecting => CastState::Connected,
            CastState::Connected => CastState::Available,
        };
        self.hub
            .emit(PlayerEvent::cast_state(CastTarget::Chromecast, self.cast_state));
    }

    #[must_use]
    pub fn cast_state(&self) -> CastState {
        self.cast_state
    }

    /// Formats the playback position as `m:ss / m:ss`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!(
            "{} / {}",
            format_seconds(self.status().current_time),
            format_seconds(CLIP_DURATION_SECS)
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Fake host window.
#[derive(Debug)]
pub struct DemoHost {
    supports_picture_in_picture: bool,
    in_picture_in_picture: bool,
    immersive: bool,
    next_receiver: u64,
    receivers: Vec<(ReceiverId, HostSignalKind, Sender<HostSignal>)>,
    view: ViewNode,
    video_size: Option<(u32, u32)>,
}

impl DemoHost {
    #[must_use]
    pub fn new(supports_picture_in_picture: bool) -> Self {
        let window = Rect::new(0, 0, 960, 540);
        let view = ViewNode::group(
            window,
            vec![
                ViewNode::group(
                    Rect::new(0, 0, 960, 48),
                    vec![ViewNode::other(Rect::new(8, 8, 200, 40))],
                ),
                ViewNode::group(window, vec![ViewNode::surface(window)]),
            ],
        );
        Self {
            supports_picture_in_picture,
            in_picture_in_picture: false,
            immersive: false,
            next_receiver: 0,
            receivers: Vec::new(),
            view,
            video_size: Some(VIDEO_SIZE),
        }
    }

    /// Delivers an OS signal to every receiver registered for its kind.
    pub fn signal(&mut self, signal: HostSignal) {
        if let HostSignal::PictureInPictureModeChanged(in_pip) = signal {
            self.in_picture_in_picture = in_pip;
        }
        let kind = signal.kind();
        self.receivers.retain(|(_, receiver_kind, sender)| {
            *receiver_kind != kind || sender.send(signal).is_ok()
        });
    }

    #[must_use]
    pub fn is_immersive(&self) -> bool {
        self.immersive
    }

    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }
}

impl PresentationHost for DemoHost {
    fn supports_picture_in_picture(&self) -> bool {
        self.supports_picture_in_picture
    }

    fn is_in_picture_in_picture(&self) -> bool {
        self.in_picture_in_picture
    }

    fn enter_picture_in_picture(&mut self, _params: &PipParams) -> Result<(), HostError> {
        if !self.supports_picture_in_picture {
            return Err(HostError::Unsupported);
        }
        // The OS confirms asynchronously through the mode-changed receiver.
        self.signal(HostSignal::PictureInPictureModeChanged(true));
        Ok(())
    }

    fn set_immersive(&mut self, immersive: bool) -> Result<(), HostError> {
        self.immersive = immersive;
        Ok(())
    }

    fn register_receiver(
        &mut self,
        kind: HostSignalKind,
        sender: Sender<HostSignal>,
    ) -> Result<ReceiverId, HostError> {
        let id = ReceiverId(self.next_receiver);
        self.next_receiver += 1;
        self.receivers.push((id, kind, sender));
        Ok(id)
    }

    fn unregister_receiver(&mut self, id: ReceiverId) -> Result<(), HostError> {
        let before = self.receivers.len();
        self.receivers.retain(|(receiver_id, _, _)| *receiver_id != id);
        if self.receivers.len() == before {
            return Err(HostError::NotRegistered);
        }
        Ok(())
    }

    fn player_view(&self) -> Option<&ViewNode> {
        Some(&self.view)
    }

    fn video_size(&self) -> Option<(u32, u32)> {
        self.video_size
    }
}

/// Mirrors presentation changes into the player's event stream.
pub fn forward_presentation_changes(hub: &EventHub) -> impl FnMut(&PresentationMode) + 'static {
    let hub = hub.clone();
    move |mode| {
        hub.update_status(|status| status.presentation_mode = *mode);
        hub.emit(PlayerEvent::PresentationModeChange(*mode));
    }
}
