// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate configuration, loaded from and saved to a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[overlay]` - Auto-hide timeout and host platform
//! - `[presentation]` - Picture-in-picture behavior
//! - `[diagnostics]` - Activity buffer size
//!
//! Both controllers only read the configuration; nothing in the core
//! writes it back.
//!
//! # Examples
//!
//! ```no_run
//! use player_overlay::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.presentation.auto_enter_picture_in_picture = Some(true);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::ui::{FadeTimeout, Platform};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Control overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Delay before the overlay auto-hides (milliseconds).
    #[serde(
        default = "default_fade_timeout_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub fade_timeout_ms: Option<u32>,

    /// Host platform (android, ios or web).
    #[serde(
        default,
        serialize_with = "serialize_platform",
        deserialize_with = "deserialize_platform"
    )]
    pub platform: Platform,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fade_timeout_ms: default_fade_timeout_ms(),
            platform: Platform::default(),
        }
    }
}

impl OverlayConfig {
    /// Validated auto-hide delay.
    #[must_use]
    pub fn fade_timeout(&self) -> FadeTimeout {
        FadeTimeout::new(self.fade_timeout_ms.unwrap_or(DEFAULT_FADE_TIMEOUT_MS))
    }
}

/// Presentation mode settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationConfig {
    /// Enter picture-in-picture when the app goes to the background.
    #[serde(
        default = "default_auto_enter_picture_in_picture",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_enter_picture_in_picture: Option<bool>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            auto_enter_picture_in_picture: default_auto_enter_picture_in_picture(),
        }
    }
}

impl PresentationConfig {
    #[must_use]
    pub fn auto_enter_picture_in_picture(&self) -> bool {
        self.auto_enter_picture_in_picture
            .unwrap_or(DEFAULT_AUTO_ENTER_PICTURE_IN_PICTURE)
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of activity events kept in memory.
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub presentation: PresentationConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_fade_timeout_ms() -> Option<u32> {
    Some(DEFAULT_FADE_TIMEOUT_MS)
}

fn default_auto_enter_picture_in_picture() -> Option<bool> {
    Some(DEFAULT_AUTO_ENTER_PICTURE_IN_PICTURE)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

fn serialize_platform<S>(platform: &Platform, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(platform.as_str())
}

fn deserialize_platform<'de, D>(deserializer: D) -> std::result::Result<Platform, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    Platform::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid platform: {}", raw)))
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
