// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility controller.
//!
//! Decides when the control overlay is shown, when it fades away, and
//! whether its buttons accept input. It reacts to player events and raw
//! user input and keeps a stack of modal menus.
//!
//! ```text
//! Hidden ──(user action / player event)──▶ FadingIn ──(done)──▶ Showing
//! Showing ──(timer fires, not busy)──▶ FadingOut ──(done)──▶ Hidden
//! any ──(stop-and-show)──▶ FadingIn
//! ```
//!
//! The user is *busy* while a menu is open, while paused, or while casting.
//! The auto-hide timer re-checks this when it fires; a forced fade-out
//! (background tap) does not.
//!
//! Time is passed in explicitly, so the host decides the clock. The demo
//! calls [`VisibilityController::update`] with [`Message::Tick`] from an
//! `iced` time subscription.

mod fade;
mod menu;
mod render;
mod timer;

pub use fade::{FadeAnimator, FadeDirection, FADE_DURATION};
pub use menu::{MenuDescriptor, MenuStack};
pub use render::{ControlSlots, OverlayContent, OverlayPlan, RenderPlan};
pub use timer::AutoHideTimer;

use crate::diagnostics::DiagnosticsHandle;
use crate::domain::cast::cast_message;
use crate::domain::presentation::PresentationMode;
use crate::domain::ui::{FadeTimeout, Opacity, Platform};
use crate::error::PlayerError;
use crate::observer::{Observers, SubscriptionId};
use crate::player::{
    CastEvent, ListenerId, PlayerEvent, PlayerEventKind, PlayerEventSource,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Instant;

/// Visible phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Hidden,
    FadingIn,
    #[default]
    Showing,
    FadingOut,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::FadingIn => "fading_in",
            Self::Showing => "showing",
            Self::FadingOut => "fading_out",
        }
    }
}

/// Where a touch landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchTarget {
    /// The translucent background behind the controls.
    Background,
    /// A control bar, button or menu.
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    TouchStart(TouchTarget),
    /// Pointer movement. Only counts on platforms with a pointer.
    PointerMove,
}

/// Messages for the visibility controller.
#[derive(Debug, Clone)]
pub enum Message {
    Player(PlayerEvent),
    Input(UserInput),
    OpenMenu(MenuDescriptor),
    CloseMenu,
    RequestShow,
    /// Drain pending player events, advance the fade and poll the timer.
    Tick,
}

/// Immutable view of the controller state, published after each transition.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilitySnapshot {
    pub phase: Phase,
    pub showing: bool,
    pub buttons_enabled: bool,
    pub opacity: Opacity,
    /// Open menus, last is active.
    pub menus: Vec<MenuDescriptor>,
    pub first_play: bool,
    pub paused: bool,
    pub casting: bool,
    pub cast_message: Option<String>,
    pub error: Option<PlayerError>,
    pub pip: bool,
    pub platform: Platform,
    pub timer_armed: bool,
}

impl VisibilitySnapshot {
    /// What the view layer should draw.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        render::plan(self)
    }

    #[must_use]
    pub fn active_menu(&self) -> Option<MenuDescriptor> {
        self.menus.last().copied()
    }
}

impl Default for VisibilitySnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Showing,
            showing: true,
            buttons_enabled: true,
            opacity: Opacity::SHOWN,
            menus: Vec::new(),
            first_play: false,
            paused: true,
            casting: false,
            cast_message: None,
            error: None,
            pip: false,
            platform: Platform::default(),
            timer_armed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Started,
    Stopped,
}

#[derive(Debug)]
struct VisibilityState {
    showing: bool,
    buttons_enabled: bool,
    menus: MenuStack,
    first_play: bool,
    paused: bool,
    casting: bool,
    cast_message: Option<String>,
    error: Option<PlayerError>,
    pip: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self {
            showing: true,
            buttons_enabled: true,
            menus: MenuStack::new(),
            first_play: false,
            paused: true,
            casting: false,
            cast_message: None,
            error: None,
            pip: false,
        }
    }
}

/// Owns the overlay state for one player.
///
/// Listeners are attached by [`start`](Self::start) and detached by
/// [`stop`](Self::stop) or on drop. Handlers only run while started.
pub struct VisibilityController<P: PlayerEventSource> {
    player: P,
    platform: Platform,
    lifecycle: Lifecycle,
    listeners: Vec<(PlayerEventKind, ListenerId)>,
    events_tx: Sender<PlayerEvent>,
    events_rx: Receiver<PlayerEvent>,
    state: VisibilityState,
    timer: AutoHideTimer,
    fade: FadeAnimator,
    observers: Observers<VisibilitySnapshot>,
    published: VisibilitySnapshot,
    diagnostics: DiagnosticsHandle,
}

impl<P: PlayerEventSource> VisibilityController<P> {
    #[must_use]
    pub fn new(player: P, platform: Platform, fade_timeout: FadeTimeout) -> Self {
        let (events_tx, events_rx) = unbounded();
        let published = VisibilitySnapshot {
            platform,
            ..VisibilitySnapshot::default()
        };
        Self {
            player,
            platform,
            lifecycle: Lifecycle::Idle,
            listeners: Vec::new(),
            events_tx,
            events_rx,
            state: VisibilityState::default(),
            timer: AutoHideTimer::new(fade_timeout),
            fade: FadeAnimator::default(),
            observers: Observers::new(),
            published,
            diagnostics: DiagnosticsHandle::disconnected(),
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsHandle) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Attaches player listeners and syncs with a player that is already
    /// playing. Calling it while started does nothing.
    pub fn start(&mut self, now: Instant) {
        if self.lifecycle == Lifecycle::Started {
            return;
        }
        for kind in PlayerEventKind::ALL {
            let id = self.player.add_event_listener(kind, self.events_tx.clone());
            self.listeners.push((kind, id));
        }
        self.lifecycle = Lifecycle::Started;

        let status = self.player.status();
        if status.has_started() {
            self.on_play(now);
        }
        self.state.pip = status.presentation_mode.is_picture_in_picture();
        self.publish();
    }

    /// Detaches listeners, cancels the timer, settles any fade at its
    /// target and drops undelivered events. Safe to call any number of times.
    pub fn stop(&mut self) {
        for (kind, id) in self.listeners.drain(..) {
            self.player.remove_event_listener(kind, id);
        }
        self.timer.cancel();
        if let Some(direction) = self.fade.finish() {
            self.complete_fade(direction);
        }
        while self.events_rx.try_recv().is_ok() {}
        if self.lifecycle == Lifecycle::Started {
            self.lifecycle = Lifecycle::Stopped;
            self.publish();
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.lifecycle == Lifecycle::Started
    }

    /// Handles a controller message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn update(&mut self, message: Message, now: Instant) {
        match message {
            Message::Player(event) => self.handle_player_event(event, now),
            Message::Input(input) => self.handle_input(input, now),
            Message::OpenMenu(menu) => self.open_menu(menu, now),
            Message::CloseMenu => self.close_menu(now),
            Message::RequestShow => self.request_show(now),
            Message::Tick => self.tick(now),
        }
    }

    /// Handles every event the player queued since the last call.
    pub fn process_pending(&mut self, now: Instant) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_player_event(event, now);
        }
    }

    /// Drains pending events, advances the fade, then polls the timer.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_started() {
            return;
        }
        self.process_pending(now);

        if let Some(direction) = self.fade.tick(now) {
            self.complete_fade(direction);
        }

        if self.timer.poll(now) {
            self.fade_out(false, now);
        }
        self.publish();
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent, now: Instant) {
        if !self.is_started() {
            return;
        }
        self.diagnostics.log_player_event(event.kind().as_str());

        match event {
            PlayerEvent::LoadStart => self.state.error = None,
            PlayerEvent::Play | PlayerEvent::Playing => self.on_play(now),
            PlayerEvent::Pause => {
                self.state.first_play = true;
                self.state.paused = true;
                self.stop_and_show(now);
            }
            PlayerEvent::SourceChange => self.state.paused = self.player.status().paused,
            PlayerEvent::Ended => self.stop_and_show(now),
            PlayerEvent::Error(error) => {
                self.state.error = Some(error);
                self.timer.cancel();
            }
            PlayerEvent::Cast(CastEvent::StateChange { target, state }) => {
                self.state.casting = state.is_casting();
                self.state.cast_message = cast_message(target, state);
                // Casting is re-checked when the timer fires.
                if self.state.menus.is_empty() && !self.state.paused {
                    self.timer.arm(now);
                } else {
                    self.timer.cancel();
                }
            }
            PlayerEvent::Cast(CastEvent::Error { message }) => {
                self.diagnostics.log_warning(format!("cast error: {message}"));
            }
            PlayerEvent::PresentationModeChange(mode) => {
                self.state.pip = mode == PresentationMode::PictureInPicture;
            }
        }
        self.publish();
    }

    pub fn handle_input(&mut self, input: UserInput, now: Instant) {
        if !self.is_started() {
            return;
        }
        match input {
            UserInput::PointerMove => {
                if self.platform.has_pointer() {
                    self.user_action(now);
                }
            }
            UserInput::TouchStart(target) => {
                self.user_action(now);
                if target == TouchTarget::Background
                    && self.state.first_play
                    && self.state.buttons_enabled
                    && !self.state.casting
                {
                    self.fade_out(true, now);
                }
            }
        }
        self.publish();
    }

    /// Shows the overlay as if the user had touched it.
    pub fn request_show(&mut self, now: Instant) {
        if !self.is_started() {
            return;
        }
        self.user_action(now);
        self.publish();
    }

    /// Pushes a menu, makes it active and keeps the overlay up.
    pub fn open_menu(&mut self, menu: MenuDescriptor, now: Instant) {
        if !self.is_started() {
            return;
        }
        self.state.menus.push(menu);
        self.diagnostics
            .log_menu_change(self.state.menus.len(), Some(menu.as_str()));
        self.stop_and_show(now);
        self.publish();
    }

    /// Pops the active menu. Closing the last one restores the controls
    /// and re-arms the timer unless the user is busy.
    pub fn close_menu(&mut self, now: Instant) {
        if !self.is_started() {
            return;
        }
        self.state.menus.pop();
        self.diagnostics.log_menu_change(
            self.state.menus.len(),
            self.state.menus.active().map(MenuDescriptor::as_str),
        );
        self.resume(now);
        self.publish();
    }

    #[must_use]
    pub fn buttons_enabled(&self) -> bool {
        self.state.buttons_enabled
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.state.menus.is_empty() || self.state.paused || self.state.casting
    }

    #[must_use]
    pub fn snapshot(&self) -> VisibilitySnapshot {
        VisibilitySnapshot {
            phase: self.phase(),
            showing: self.state.showing,
            buttons_enabled: self.state.buttons_enabled,
            opacity: self.fade.level(),
            menus: self.state.menus.as_slice().to_vec(),
            first_play: self.state.first_play,
            paused: self.state.paused,
            casting: self.state.casting,
            cast_message: self.state.cast_message.clone(),
            error: self.state.error.clone(),
            pip: self.state.pip,
            platform: self.platform,
            timer_armed: self.timer.is_armed(),
        }
    }

    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        self.snapshot().render_plan()
    }

    /// When the timer will fire, if armed.
    #[must_use]
    pub fn timer_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.fade.is_animating()
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&VisibilitySnapshot) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[must_use]
    pub fn player(&self) -> &P {
        &self.player
    }

    fn phase(&self) -> Phase {
        match self.fade.direction() {
            Some(FadeDirection::In) => Phase::FadingIn,
            Some(FadeDirection::Out) => Phase::FadingOut,
            None if self.state.showing => Phase::Showing,
            None => Phase::Hidden,
        }
    }

    fn on_play(&mut self, now: Instant) {
        self.state.first_play = true;
        self.state.paused = false;
        self.resume(now);
    }

    fn user_action(&mut self, now: Instant) {
        if !self.state.first_play {
            return;
        }
        self.stop_and_show(now);
        self.resume(now);
    }

    /// Cancels the timer and fades in unless already shown or fading in.
    fn stop_and_show(&mut self, now: Instant) {
        self.timer.cancel();
        let fading_out = self.fade.direction() == Some(FadeDirection::Out);
        if !self.state.showing || fading_out {
            self.fade_in(now);
        }
    }

    /// Re-arms the timer unless the user is busy.
    fn resume(&mut self, now: Instant) {
        self.timer.cancel();
        if !self.is_busy() {
            self.timer.arm(now);
        }
    }

    fn fade_in(&mut self, now: Instant) {
        self.state.showing = true;
        self.state.buttons_enabled = false;
        self.fade.start(FadeDirection::In, now);
    }

    fn fade_out(&mut self, force: bool, now: Instant) {
        if !force && (self.is_busy() || !self.state.showing) {
            return;
        }
        self.timer.cancel();
        self.state.buttons_enabled = false;
        self.fade.start(FadeDirection::Out, now);
    }

    /// Buttons only stay disabled while a fade is running.
    fn complete_fade(&mut self, direction: FadeDirection) {
        match direction {
            FadeDirection::In => self.state.buttons_enabled = true,
            FadeDirection::Out => self.state.showing = false,
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        if snapshot == self.published {
            return;
        }
        if snapshot.phase != self.published.phase {
            self.diagnostics
                .log_transition(self.published.phase.as_str(), snapshot.phase.as_str());
        }
        self.observers.notify(&snapshot);
        self.published = snapshot;
    }
}

impl<P: PlayerEventSource> Drop for VisibilityController<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<P: PlayerEventSource> std::fmt::Debug for VisibilityController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityController")
            .field("lifecycle", &self.lifecycle)
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("fade", &self.fade)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cast::{CastState, CastTarget};
    use crate::player::{EventHub, PlayerStatus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const TIMEOUT_MS: u32 = 1000;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started(platform: Platform) -> (EventHub, VisibilityController<EventHub>, Instant) {
        let hub = EventHub::new();
        let now = Instant::now();
        let mut controller =
            VisibilityController::new(hub.clone(), platform, FadeTimeout::new(TIMEOUT_MS));
        controller.start(now);
        (hub, controller, now)
    }

    /// Emits on the hub and lets the controller drain it.
    fn emit(
        hub: &EventHub,
        controller: &mut VisibilityController<EventHub>,
        event: PlayerEvent,
        now: Instant,
    ) {
        hub.emit(event);
        controller.process_pending(now);
    }

    /// Plays, then lets the auto-hide timer and fade-out run to completion.
    fn play_until_hidden(
        hub: &EventHub,
        controller: &mut VisibilityController<EventHub>,
        now: Instant,
    ) -> Instant {
        emit(hub, controller, PlayerEvent::Play, now);
        let fired = now + ms(u64::from(TIMEOUT_MS));
        controller.tick(fired);
        let hidden = fired + FADE_DURATION;
        controller.tick(hidden);
        assert_eq!(controller.snapshot().phase, Phase::Hidden);
        hidden
    }

    #[test]
    fn start_attaches_one_listener_per_kind() {
        let (hub, controller, _) = started(Platform::Android);
        assert_eq!(hub.total_listener_count(), PlayerEventKind::ALL.len());
        assert!(controller.is_started());
    }

    #[test]
    fn start_twice_does_not_duplicate_listeners() {
        let (hub, mut controller, now) = started(Platform::Android);
        controller.start(now);
        assert_eq!(hub.total_listener_count(), PlayerEventKind::ALL.len());
    }

    #[test]
    fn stop_detaches_and_is_idempotent() {
        let (hub, mut controller, _) = started(Platform::Android);
        controller.stop();
        controller.stop();
        assert_eq!(hub.total_listener_count(), 0);
        assert!(!controller.is_started());
    }

    #[test]
    fn stop_without_start_never_fails() {
        let hub = EventHub::new();
        let mut controller =
            VisibilityController::new(hub.clone(), Platform::Android, FadeTimeout::default());
        controller.stop();
        assert_eq!(hub.total_listener_count(), 0);
    }

    #[test]
    fn drop_detaches_listeners() {
        let hub = EventHub::new();
        {
            let mut controller =
                VisibilityController::new(hub.clone(), Platform::Android, FadeTimeout::default());
            controller.start(Instant::now());
            assert!(hub.total_listener_count() > 0);
        }
        assert_eq!(hub.total_listener_count(), 0);
    }

    #[test]
    fn restart_after_stop_mid_fade_out_accepts_input() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        controller.tick(now + ms(1000));
        controller.tick(now + ms(1100));
        assert_eq!(controller.snapshot().phase, Phase::FadingOut);

        controller.stop();
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Hidden);
        assert!(snap.opacity.is_hidden());
        assert!(!controller.is_animating());

        controller.start(now + ms(1100));
        controller.handle_input(UserInput::TouchStart(TouchTarget::Control), now + ms(1100));
        assert_eq!(controller.snapshot().phase, Phase::FadingIn);

        controller.tick(now + ms(1100) + FADE_DURATION);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Showing);
        assert!(snap.buttons_enabled);
        assert!(snap.opacity.is_shown());
    }

    #[test]
    fn stop_mid_fade_in_leaves_buttons_enabled() {
        let (hub, mut controller, now) = started(Platform::Android);
        let hidden = play_until_hidden(&hub, &mut controller, now);
        controller.handle_input(UserInput::TouchStart(TouchTarget::Background), hidden);
        controller.tick(hidden + ms(50));
        assert_eq!(controller.snapshot().phase, Phase::FadingIn);

        controller.stop();
        controller.start(hidden + ms(50));
        emit(&hub, &mut controller, PlayerEvent::Pause, hidden + ms(50));
        controller.tick(hidden + ms(60_000));

        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Showing);
        assert!(snap.buttons_enabled);
        assert!(snap.opacity.is_shown());
    }

    #[test]
    fn timer_firing_while_hidden_starts_no_fade() {
        let (hub, mut controller, now) = started(Platform::Android);
        let mut collector = crate::diagnostics::DiagnosticsCollector::default();
        controller.diagnostics = collector.handle();
        let hidden = play_until_hidden(&hub, &mut controller, now);

        emit(&hub, &mut controller, PlayerEvent::Playing, hidden);
        assert!(controller.snapshot().timer_armed);
        collector.process_pending();
        collector.clear();

        controller.tick(hidden + ms(u64::from(TIMEOUT_MS)));
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Hidden);
        assert!(!snap.timer_armed);
        assert!(!controller.is_animating());

        collector.process_pending();
        assert!(!collector.iter().any(|event| matches!(
            event.kind,
            crate::diagnostics::DiagnosticEventKind::OverlayTransition { .. }
        )));
    }

    #[test]
    fn paused_tracks_latest_play_or_pause() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Playing, now);
        assert!(!controller.snapshot().paused);
        emit(&hub, &mut controller, PlayerEvent::Pause, now);
        assert!(controller.snapshot().paused);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        assert!(!controller.snapshot().paused);
    }

    #[test]
    fn play_arms_timer_which_fades_out() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        assert!(controller.snapshot().timer_armed);
        assert!(controller.snapshot().first_play);

        controller.tick(now + ms(999));
        assert_eq!(controller.snapshot().phase, Phase::Showing);

        controller.tick(now + ms(1000));
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::FadingOut);
        assert!(!snap.buttons_enabled);
        assert!(!snap.timer_armed);

        controller.tick(now + ms(1200));
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Hidden);
        assert!(!snap.showing);
        assert!(snap.opacity.is_hidden());
    }

    #[test]
    fn paused_user_is_never_auto_hidden() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Pause, now);
        assert!(!controller.snapshot().timer_armed);
        controller.tick(now + ms(60_000));
        assert_eq!(controller.snapshot().phase, Phase::Showing);
    }

    #[test]
    fn timer_rechecks_busy_when_it_fires() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::cast_state(CastTarget::Chromecast, CastState::Connected),
            now + ms(10),
        );
        assert!(controller.snapshot().timer_armed);

        controller.tick(now + ms(2000));
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Showing);
        assert!(snap.buttons_enabled);
    }

    #[test]
    fn menu_open_forces_show_and_disarms_timer() {
        let (hub, mut controller, now) = started(Platform::Android);
        let hidden = play_until_hidden(&hub, &mut controller, now);

        controller.open_menu(MenuDescriptor::Settings, hidden);
        let snap = controller.snapshot();
        assert!(snap.showing);
        assert_eq!(snap.phase, Phase::FadingIn);
        assert!(!snap.timer_armed);
        assert_eq!(snap.active_menu(), Some(MenuDescriptor::Settings));

        controller.tick(hidden + ms(10_000));
        assert_eq!(controller.snapshot().phase, Phase::Showing);
        assert!(controller.buttons_enabled());
    }

    #[test]
    fn closing_last_menu_rearms_only_when_not_busy() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);

        controller.open_menu(MenuDescriptor::Settings, now);
        controller.open_menu(MenuDescriptor::Quality, now);
        controller.close_menu(now);
        assert!(!controller.snapshot().timer_armed);
        assert_eq!(
            controller.snapshot().active_menu(),
            Some(MenuDescriptor::Settings)
        );

        controller.close_menu(now);
        assert!(controller.snapshot().timer_armed);

        emit(&hub, &mut controller, PlayerEvent::Pause, now);
        controller.open_menu(MenuDescriptor::Language, now);
        controller.close_menu(now);
        assert!(!controller.snapshot().timer_armed);
    }

    #[test]
    fn cast_connecting_after_play_arms_exactly_one_timer() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::LoadStart, now);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::cast_state(CastTarget::Chromecast, CastState::Connecting),
            now + ms(100),
        );

        let snap = controller.snapshot();
        assert!(snap.timer_armed);
        assert!(snap.casting);
        assert!(snap.first_play);
        assert_eq!(
            snap.cast_message.as_deref(),
            Some("Connecting to chromecast ...")
        );
        assert_eq!(controller.timer_deadline(), Some(now + ms(1100)));
    }

    #[test]
    fn cast_disconnect_clears_casting() {
        let (hub, mut controller, now) = started(Platform::Ios);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::cast_state(CastTarget::AirPlay, CastState::Connected),
            now,
        );
        assert!(controller.snapshot().casting);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::cast_state(CastTarget::AirPlay, CastState::Available),
            now,
        );
        let snap = controller.snapshot();
        assert!(!snap.casting);
        assert_eq!(snap.cast_message, None);
    }

    #[test]
    fn play_pause_play_leaves_timer_armed_and_no_animation() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(&hub, &mut controller, PlayerEvent::Pause, now + ms(10));
        emit(&hub, &mut controller, PlayerEvent::Play, now + ms(20));

        let snap = controller.snapshot();
        assert!(!snap.paused);
        assert!(snap.timer_armed);
        assert!(!controller.is_animating());
        assert_eq!(snap.phase, Phase::Showing);
    }

    #[test]
    fn pause_during_fade_out_fades_back_in() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        controller.tick(now + ms(1000));
        controller.tick(now + ms(1100));
        assert_eq!(controller.snapshot().phase, Phase::FadingOut);

        emit(&hub, &mut controller, PlayerEvent::Pause, now + ms(1100));
        assert_eq!(controller.snapshot().phase, Phase::FadingIn);

        controller.tick(now + ms(1300));
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::Showing);
        assert!(snap.opacity.is_shown());
        assert!(snap.buttons_enabled);
    }

    #[test]
    fn ended_and_error_disarm_timer() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(&hub, &mut controller, PlayerEvent::Ended, now);
        assert!(!controller.snapshot().timer_armed);

        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::Error(PlayerError::new("network timeout")),
            now,
        );
        let snap = controller.snapshot();
        assert!(!snap.timer_armed);
        assert!(matches!(snap.render_plan(), RenderPlan::Error(_)));

        emit(&hub, &mut controller, PlayerEvent::LoadStart, now);
        assert_eq!(controller.snapshot().error, None);
    }

    #[test]
    fn source_change_resyncs_paused_from_player() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        hub.update_status(|status| status.paused = true);
        emit(&hub, &mut controller, PlayerEvent::SourceChange, now);
        assert!(controller.snapshot().paused);
    }

    #[test]
    fn touch_before_first_play_is_ignored() {
        let (_hub, mut controller, now) = started(Platform::Android);
        controller.handle_input(UserInput::TouchStart(TouchTarget::Control), now);
        assert!(!controller.snapshot().timer_armed);
    }

    #[test]
    fn touch_on_hidden_overlay_fades_in_and_rearms() {
        let (hub, mut controller, now) = started(Platform::Android);
        let hidden = play_until_hidden(&hub, &mut controller, now);

        controller.handle_input(UserInput::TouchStart(TouchTarget::Background), hidden);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::FadingIn);
        assert!(snap.timer_armed);
    }

    #[test]
    fn background_touch_on_shown_overlay_forces_fade_out() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Pause, now);
        assert!(controller.is_busy());

        controller.handle_input(UserInput::TouchStart(TouchTarget::Background), now);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, Phase::FadingOut);
        assert!(!snap.timer_armed);
    }

    #[test]
    fn background_touch_while_casting_keeps_overlay() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(&hub, &mut controller, PlayerEvent::Play, now);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::cast_state(CastTarget::Chromecast, CastState::Connected),
            now,
        );
        controller.handle_input(UserInput::TouchStart(TouchTarget::Background), now);
        assert_eq!(controller.snapshot().phase, Phase::Showing);
    }

    #[test]
    fn pointer_move_only_counts_on_web() {
        let (hub, mut controller, now) = started(Platform::Android);
        let hidden = play_until_hidden(&hub, &mut controller, now);
        controller.handle_input(UserInput::PointerMove, hidden);
        assert_eq!(controller.snapshot().phase, Phase::Hidden);

        let (hub, mut controller, now) = started(Platform::Web);
        let hidden = play_until_hidden(&hub, &mut controller, now);
        controller.handle_input(UserInput::PointerMove, hidden);
        assert_eq!(controller.snapshot().phase, Phase::FadingIn);
    }

    #[test]
    fn presentation_change_updates_pip() {
        let (hub, mut controller, now) = started(Platform::Android);
        emit(
            &hub,
            &mut controller,
            PlayerEvent::PresentationModeChange(PresentationMode::PictureInPicture),
            now,
        );
        assert!(controller.snapshot().pip);
        assert_eq!(controller.render_plan(), RenderPlan::Nothing);

        emit(
            &hub,
            &mut controller,
            PlayerEvent::PresentationModeChange(PresentationMode::Fullscreen),
            now,
        );
        assert!(!controller.snapshot().pip);
    }

    #[test]
    fn start_resyncs_with_running_player() {
        let hub = EventHub::with_status(PlayerStatus {
            paused: false,
            has_source: true,
            current_time: 42.0,
            presentation_mode: PresentationMode::PictureInPicture,
            video_size: None,
        });
        let mut controller =
            VisibilityController::new(hub.clone(), Platform::Android, FadeTimeout::default());
        controller.start(Instant::now());

        let snap = controller.snapshot();
        assert!(snap.first_play);
        assert!(!snap.paused);
        assert!(snap.timer_armed);
        assert!(snap.pip);
    }

    #[test]
    fn events_before_start_and_after_stop_are_ignored() {
        let hub = EventHub::new();
        let now = Instant::now();
        let mut controller =
            VisibilityController::new(hub.clone(), Platform::Android, FadeTimeout::default());
        controller.handle_player_event(PlayerEvent::Play, now);
        assert!(!controller.snapshot().first_play);

        controller.start(now);
        controller.stop();
        hub.emit(PlayerEvent::Play);
        controller.tick(now);
        controller.handle_player_event(PlayerEvent::Play, now);
        let snap = controller.snapshot();
        assert!(!snap.first_play);
        assert!(!snap.timer_armed);
    }

    #[test]
    fn observers_receive_snapshots_on_change_only() {
        let (hub, mut controller, now) = started(Platform::Android);
        let seen: Rc<RefCell<Vec<Phase>>> = Rc::default();
        let sink = Rc::clone(&seen);
        controller.subscribe(move |snap| sink.borrow_mut().push(snap.phase));

        emit(&hub, &mut controller, PlayerEvent::Play, now);
        let after_play = seen.borrow().len();
        assert_eq!(after_play, 1);

        controller.tick(now + ms(1));
        assert_eq!(seen.borrow().len(), after_play);

        controller.tick(now + ms(1000));
        assert_eq!(seen.borrow().last(), Some(&Phase::FadingOut));
    }

    #[test]
    fn update_dispatches_messages() {
        let (hub, mut controller, now) = started(Platform::Android);
        hub.emit(PlayerEvent::Play);
        controller.update(Message::Tick, now);
        assert!(controller.snapshot().first_play);

        controller.update(Message::OpenMenu(MenuDescriptor::PlaybackRate), now);
        assert_eq!(
            controller.snapshot().active_menu(),
            Some(MenuDescriptor::PlaybackRate)
        );
        controller.update(Message::CloseMenu, now);
        assert!(controller.snapshot().menus.is_empty());

        controller.update(Message::RequestShow, now);
        controller.update(
            Message::Player(PlayerEvent::PresentationModeChange(
                PresentationMode::PictureInPicture,
            )),
            now,
        );
        assert!(controller.snapshot().pip);
    }
}
