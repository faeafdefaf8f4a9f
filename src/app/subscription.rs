// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the demo application.
//!
//! Keyboard shortcuts are mapped to [`Simulation`] messages so the overlay
//! can be driven without a native player. Shortcuts only fire when no widget
//! captured the key.

use super::message::{Message, Simulation};
use crate::config::DEFAULT_TICK_INTERVAL_MS;
use iced::keyboard::{self, key};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Creates the periodic tick driving playback and the overlay.
pub fn create_tick_subscription() -> Subscription<Message> {
    time::every(Duration::from_millis(DEFAULT_TICK_INTERVAL_MS)).map(Message::Tick)
}

/// Routes keyboard shortcuts and the window-opened event.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. }) => Some(Message::WindowOpened(window_id)),
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored && modifiers.is_empty() =>
        {
            shortcut(&key).map(Message::Simulate)
        }
        _ => None,
    })
}

/// Maps a pressed key to its simulation, if any.
fn shortcut(key: &keyboard::Key) -> Option<Simulation> {
    match key {
        keyboard::Key::Named(key::Named::Space) => Some(Simulation::TogglePlayback),
        keyboard::Key::Named(key::Named::Escape) => Some(Simulation::Back),
        keyboard::Key::Character(c) => match c.as_str() {
            "l" => Some(Simulation::LoadSource),
            "c" => Some(Simulation::CycleCast),
            "e" => Some(Simulation::PlayerError),
            "h" => Some(Simulation::UserLeaveHint),
            "x" => Some(Simulation::ExitPictureInPicture),
            "d" => Some(Simulation::ExportDiagnostics),
            _ => None,
        },
        _ => None,
    }
}
