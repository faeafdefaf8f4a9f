// SPDX-License-Identifier: MPL-2.0
//! Demo application wiring the overlay to a simulated player.
//!
//! The [`App`] owns a [`SimulatedPlayer`], the [`VisibilityController`]
//! listening to it, and a [`PresentationController`] backed by a
//! [`DemoHost`]. Every message is handled in the same order: apply the
//! action, drain host signals, drain player events, then refresh the render
//! plan and the window mode.
//!
//! Keyboard shortcuts (see [`Simulation`]) stand in for the native side:
//! `l` load, `space` play/pause, `c` cast, `e` error, `h` leave app,
//! `x` close picture-in-picture, `d` export diagnostics, `Escape` back.

pub mod message;
pub mod simulated;
mod subscription;

pub use message::{Flags, Message, Simulation};
pub use simulated::{DemoHost, SimulatedPlayer};

use crate::config::{self, Config};
use crate::diagnostics::DiagnosticsCollector;
use crate::domain::presentation::PresentationMode;
use crate::domain::ui::Platform;
use crate::overlay::{RenderPlan, TouchTarget, UserInput, VisibilityController};
use crate::player::EventHub;
use crate::presentation::{HostSignal, PresentationController, PresentationHost};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::overlay::{self, Control, ViewModel};
use iced::widget::{container, Column, Container, Stack, Text};
use iced::{window, Background, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

const WINDOW_WIDTH: f32 = 960.0;
const WINDOW_HEIGHT: f32 = 540.0;
const DIAGNOSTICS_FILE: &str = "diagnostics.json";
const SOURCE_TITLE: &str = "Big Buck Bunny";
const HINT: &str =
    "l load · space play/pause · c cast · e error · h leave app · x close PiP · d diagnostics";

/// Root state of the demo.
pub struct App {
    player: SimulatedPlayer,
    overlay: VisibilityController<EventHub>,
    presentation: PresentationController<DemoHost>,
    diagnostics: DiagnosticsCollector,
    config: Config,
    plan: RenderPlan,
    window_id: Option<window::Id>,
    /// Window mode last requested from the runtime.
    fullscreen: bool,
    last_tick: Option<Instant>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.presentation.mode())
            .field("plan", &self.plan)
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

/// Runs the demo with the given flags.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration and wires the controllers together.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        config::paths::init_cli_override(flags.config_dir);
        let (config, warning) = config::load();

        let mut diagnostics = DiagnosticsCollector::new(config.diagnostics.buffer_capacity());
        if let Some(key) = warning {
            diagnostics.handle().log_warning(key);
        }

        let platform = flags
            .platform
            .as_deref()
            .and_then(Platform::parse)
            .unwrap_or(config.overlay.platform);
        let auto_pip = flags.auto_pip || config.presentation.auto_enter_picture_in_picture();

        let app = Self::with_parts(config, platform, auto_pip, diagnostics, Instant::now());
        (app, Task::none())
    }

    fn with_parts(
        config: Config,
        platform: Platform,
        auto_pip: bool,
        mut diagnostics: DiagnosticsCollector,
        now: Instant,
    ) -> Self {
        let player = SimulatedPlayer::new(EventHub::new());

        let mut overlay = VisibilityController::new(
            player.hub().clone(),
            platform,
            config.overlay.fade_timeout(),
        )
        .with_diagnostics(diagnostics.handle());
        overlay.start(now);

        let host = DemoHost::new(!platform.is_web());
        let mut presentation = PresentationController::new(host, auto_pip, diagnostics.handle());
        presentation.subscribe(simulated::forward_presentation_changes(player.hub()));

        diagnostics.process_pending();
        let plan = overlay.render_plan();

        Self {
            player,
            overlay,
            presentation,
            diagnostics,
            config,
            plan,
            window_id: None,
            fullscreen: false,
            last_tick: None,
        }
    }

    fn title(&self) -> String {
        format!("Player overlay demo ({})", self.presentation.mode())
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(),
            subscription::create_event_subscription(),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        match message {
            Message::Overlay(message) => self.handle_overlay_message(message, now),
            Message::Tick(at) => self.handle_tick(at),
            Message::Simulate(simulation) => self.handle_simulation(simulation, now),
            Message::WindowOpened(id) => {
                if self.window_id.is_none() {
                    self.window_id = Some(id);
                }
            }
        }
        self.settle(now)
    }

    fn handle_overlay_message(&mut self, message: overlay::Message, now: Instant) {
        match message {
            overlay::Message::Input(input) => self.overlay.handle_input(input, now),
            overlay::Message::OpenMenu(menu) => self.overlay.open_menu(menu, now),
            overlay::Message::CloseMenu => self.overlay.close_menu(now),
            overlay::Message::Control(control) => {
                // A press on a control is also a touch on the overlay.
                self.overlay
                    .handle_input(UserInput::TouchStart(TouchTarget::Control), now);
                self.handle_control(control, now);
            }
        }
    }

    fn handle_control(&mut self, control: Control, now: Instant) {
        match control {
            Control::TogglePlayback => self.player.toggle_playback(),
            Control::ToggleFullscreen => {
                let target = if self.presentation.is_fullscreen() {
                    PresentationMode::Inline
                } else {
                    PresentationMode::Fullscreen
                };
                self.presentation.set_presentation_mode(target);
            }
            Control::EnterPictureInPicture => {
                self.presentation
                    .set_presentation_mode(PresentationMode::PictureInPicture);
            }
            Control::SelectOption(_, _) => self.overlay.close_menu(now),
        }
    }

    fn handle_simulation(&mut self, simulation: Simulation, now: Instant) {
        match simulation {
            Simulation::LoadSource => self.player.load(),
            Simulation::TogglePlayback => self.player.toggle_playback(),
            Simulation::CycleCast => self.player.cycle_cast(),
            Simulation::PlayerError => self.player.fail("Network request failed"),
            Simulation::UserLeaveHint => {
                self.presentation
                    .host_mut()
                    .signal(HostSignal::UserLeaveHint);
                self.presentation.process_host_signals();
                if self.presentation.should_suspend_on_host_pause() {
                    self.player.pause();
                }
            }
            Simulation::ExitPictureInPicture => {
                if self.presentation.host().is_in_picture_in_picture() {
                    self.presentation
                        .host_mut()
                        .signal(HostSignal::PictureInPictureModeChanged(false));
                }
            }
            Simulation::ExportDiagnostics => self.export_diagnostics(),
            Simulation::Back => {
                if self.overlay.snapshot().active_menu().is_some() {
                    self.overlay.close_menu(now);
                } else if self.presentation.is_fullscreen() {
                    self.presentation
                        .set_presentation_mode(PresentationMode::Inline);
                }
            }
        }
    }

    fn handle_tick(&mut self, at: Instant) {
        if let Some(last) = self.last_tick {
            self.player.advance(at.saturating_duration_since(last));
        }
        self.last_tick = Some(at);
    }

    /// Drains both controllers, then syncs the render plan and window mode.
    fn settle(&mut self, now: Instant) -> Task<Message> {
        self.presentation.process_host_signals();
        self.overlay.tick(now);
        self.diagnostics.process_pending();
        self.plan = self.overlay.render_plan();

        let immersive = self.presentation.host().is_immersive();
        match self.window_id {
            Some(id) if immersive != self.fullscreen => {
                self.fullscreen = immersive;
                let mode = if immersive {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::set_mode(id, mode)
            }
            _ => Task::none(),
        }
    }

    fn export_diagnostics(&mut self) {
        self.diagnostics.process_pending();
        let Some(dir) = config::paths::get_app_config_dir() else {
            self.diagnostics
                .handle()
                .log_warning("no config directory for diagnostics export");
            return;
        };
        let result = std::fs::create_dir_all(&dir)
            .map_err(crate::error::Error::from)
            .and_then(|()| self.diagnostics.export_to_file(dir.join(DIAGNOSTICS_FILE)));
        if let Err(err) = result {
            self.diagnostics
                .handle()
                .log_warning(format!("diagnostics export failed: {err}"));
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let status = self.player.status();
        let model = ViewModel {
            plan: &self.plan,
            paused: status.paused,
            mode: self.presentation.mode(),
            title: SOURCE_TITLE,
            position: self.player.position_label(),
        };

        let video = Container::new(Column::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(palette::GRAY_900)),
                ..Default::default()
            });

        let stage = Stack::new()
            .push(video)
            .push(overlay::view(model).map(Message::Overlay))
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layout = Column::new().push(stage);
        if !self.presentation.is_picture_in_picture() && !self.presentation.is_fullscreen() {
            layout = layout.push(
                Container::new(
                    Text::new(HINT)
                        .size(typography::CAPTION)
                        .color(palette::GRAY_400),
                )
                .padding(spacing::XS),
            );
        }
        layout.into()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
