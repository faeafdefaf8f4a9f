// SPDX-License-Identifier: MPL-2.0
//! Player-facing side of the overlay: the events a player emits and the
//! publish/subscribe interface used to listen to them.
//!
//! Listeners are channel senders. The player pushes events into them and
//! the consumer drains its receiver on its own schedule, so no callback
//! ever runs inside the player's dispatch loop.

mod event;
mod hub;

pub use event::{CastEvent, PlayerEvent, PlayerEventKind};
pub use hub::EventHub;

use crate::domain::presentation::PresentationMode;
use crossbeam_channel::Sender;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Channel end a player pushes events into.
pub type Listener = Sender<PlayerEvent>;

/// Point-in-time view of the player properties the overlay reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStatus {
    pub paused: bool,
    pub has_source: bool,
    /// Playback position in seconds.
    pub current_time: f64,
    pub presentation_mode: PresentationMode,
    /// Intrinsic video size, if known.
    pub video_size: Option<(u32, u32)>,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            paused: true,
            has_source: false,
            current_time: 0.0,
            presentation_mode: PresentationMode::Inline,
            video_size: None,
        }
    }
}

impl PlayerStatus {
    /// Whether a mounted overlay should behave as if playback already began.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_source && self.current_time != 0.0
    }
}

/// Publish/subscribe interface of a player.
pub trait PlayerEventSource {
    /// Registers `listener` for events of `kind`.
    fn add_event_listener(&self, kind: PlayerEventKind, listener: Listener) -> ListenerId;

    /// Removes a listener. Returns false if it was not registered for `kind`.
    fn remove_event_listener(&self, kind: PlayerEventKind, id: ListenerId) -> bool;

    /// Current player properties.
    fn status(&self) -> PlayerStatus;
}
