// SPDX-License-Identifier: MPL-2.0
//! In-process event hub standing in for a bridged player instance.
//!
//! The native bridge (or the demo's simulated player) calls [`EventHub::emit`];
//! everything registered through [`PlayerEventSource`] receives a copy.

use super::{Listener, ListenerId, PlayerEvent, PlayerEventKind, PlayerEventSource, PlayerStatus};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: HashMap<PlayerEventKind, Vec<(ListenerId, Listener)>>,
    status: PlayerStatus,
}

/// Cheaply cloneable handle to a shared player event hub.
///
/// Clones share listeners and status. The hub lives on the UI thread.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hub reporting the given initial status.
    #[must_use]
    pub fn with_status(status: PlayerStatus) -> Self {
        let hub = Self::new();
        hub.inner.borrow_mut().status = status;
        hub
    }

    /// Updates the player status, then delivers `event` to every listener
    /// registered for its kind. Listeners whose receiver is gone are pruned.
    pub fn emit(&self, event: PlayerEvent) {
        let mut inner = self.inner.borrow_mut();
        apply_to_status(&mut inner.status, &event);

        if let Some(listeners) = inner.listeners.get_mut(&event.kind()) {
            listeners.retain(|(_, sender)| sender.send(event.clone()).is_ok());
        }
    }

    /// Mutates the status without emitting an event.
    pub fn update_status(&self, f: impl FnOnce(&mut PlayerStatus)) {
        f(&mut self.inner.borrow_mut().status);
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: PlayerEventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Number of listeners across all kinds.
    #[must_use]
    pub fn total_listener_count(&self) -> usize {
        self.inner.borrow().listeners.values().map(Vec::len).sum()
    }
}

/// Keeps the status in line with what the event implies.
fn apply_to_status(status: &mut PlayerStatus, event: &PlayerEvent) {
    match event {
        PlayerEvent::Play | PlayerEvent::Playing => status.paused = false,
        PlayerEvent::Pause | PlayerEvent::Ended => status.paused = true,
        PlayerEvent::LoadStart => status.has_source = true,
        PlayerEvent::PresentationModeChange(mode) => status.presentation_mode = *mode,
        PlayerEvent::SourceChange | PlayerEvent::Error(_) | PlayerEvent::Cast(_) => {}
    }
}

impl PlayerEventSource for EventHub {
    fn add_event_listener(&self, kind: PlayerEventKind, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    fn remove_event_listener(&self, kind: PlayerEventKind, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(listeners) = inner.listeners.get_mut(&kind) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(entry_id, _)| *entry_id != id);
        listeners.len() != before
    }

    fn status(&self) -> PlayerStatus {
        self.inner.borrow().status
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventHub")
            .field("status", &inner.status)
            .field(
                "listeners",
                &inner.listeners.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
