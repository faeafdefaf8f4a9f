// SPDX-License-Identifier: MPL-2.0
//! `player_overlay` drives the auto-hiding control overlay of a video player
//! and switches the player between inline, fullscreen and picture-in-picture.
//!
//! The two state machines ([`overlay::VisibilityController`] and
//! [`presentation::PresentationController`]) are UI-toolkit agnostic: they
//! consume player events and host signals through channels, take the current
//! time as an argument, and publish snapshots to subscribers. The [`ui`] and
//! [`app`] modules render them with Iced.

#![doc(html_root_url = "https://docs.rs/player_overlay/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod observer;
pub mod overlay;
pub mod player;
pub mod presentation;
pub mod ui;
