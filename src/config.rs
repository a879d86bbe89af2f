// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Settings live in `config.json` under the platform config directory
//! (`~/.config/klick/config.json` on Linux). Missing keys take their
//! defaults, so older files keep loading after new settings are added.

use crate::constants::{confetti, gesture, storage, timing, ui, zoom};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const APP_NAME: &str = "klick";
const CONFIG_FILE: &str = "config.json";

/// Zoom range enforced by the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: zoom::MIN,
            max: zoom::MAX,
        }
    }
}

impl ZoomRange {
    /// Clamp a requested zoom factor into the range
    ///
    /// Never panics, even for a range that failed [`ZoomRange::validate`];
    /// `max` wins if the bounds are inverted.
    pub fn clamp(&self, factor: f64) -> f64 {
        factor.max(self.min).min(self.max)
    }

    /// Bounds must be finite, positive, and ordered
    pub fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(format!(
                "zoom_range bounds must be finite (min {}, max {})",
                self.min, self.max
            ));
        }
        if self.min <= 0.0 {
            return Err(format!("zoom_range.min must be positive, got {}", self.min));
        }
        if self.min > self.max {
            return Err(format!(
                "zoom_range.min ({}) is greater than zoom_range.max ({})",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long a filter/frame name stays visible after a swipe
    pub overlay_display_ms: u64,
    /// How long the capture button stays pressed in
    pub button_press_ms: u64,
    /// Capture button scale while pressed
    pub pressed_button_scale: f32,
    /// Minimum drag distance before a swipe counts
    pub min_swipe_distance: f64,
    /// Override for the photo directory (default: ~/Pictures/klick)
    pub photo_directory: Option<PathBuf>,
    /// Particles per confetti burst
    pub confetti_particles: usize,
    /// Spread radius of a confetti burst
    pub confetti_radius: f32,
    /// Length of a confetti burst
    pub confetti_duration_ms: u64,
    /// Zoom range of the camera
    pub zoom_range: ZoomRange,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_display_ms: timing::OVERLAY_DISPLAY_MS,
            button_press_ms: timing::BUTTON_PRESS_MS,
            pressed_button_scale: ui::BUTTON_SCALE_PRESSED,
            min_swipe_distance: gesture::MIN_SWIPE_DISTANCE,
            photo_directory: None,
            confetti_particles: confetti::PARTICLES,
            confetti_radius: confetti::RADIUS,
            confetti_duration_ms: timing::CONFETTI_DURATION_MS,
            zoom_range: ZoomRange::default(),
        }
    }
}

impl Config {
    pub fn overlay_display(&self) -> Duration {
        Duration::from_millis(self.overlay_display_ms)
    }

    pub fn button_press(&self) -> Duration {
        Duration::from_millis(self.button_press_ms)
    }

    pub fn confetti_duration(&self) -> Duration {
        Duration::from_millis(self.confetti_duration_ms)
    }

    /// Reject values the coordinator cannot work with
    pub fn validate(&self) -> Result<(), String> {
        self.zoom_range.validate()?;

        if !self.min_swipe_distance.is_finite() || self.min_swipe_distance < 0.0 {
            return Err(format!(
                "min_swipe_distance must be a non-negative number, got {}",
                self.min_swipe_distance
            ));
        }
        if !self.pressed_button_scale.is_finite() || self.pressed_button_scale <= 0.0 {
            return Err(format!(
                "pressed_button_scale must be positive, got {}",
                self.pressed_button_scale
            ));
        }
        if !self.confetti_radius.is_finite() || self.confetti_radius < 0.0 {
            return Err(format!(
                "confetti_radius must be a non-negative number, got {}",
                self.confetti_radius
            ));
        }
        Ok(())
    }

    /// Directory captured photos and the photo index are written to
    pub fn photo_dir(&self) -> PathBuf {
        self.photo_directory
            .clone()
            .unwrap_or_else(default_photo_directory)
    }
}

/// `~/Pictures/klick`, falling back to `$HOME/Pictures/klick`
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(storage::PHOTO_DIR_NAME)
}

/// Path of the user config file, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Load the user config, or defaults when no file exists yet
pub fn load() -> AppResult<Config> {
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Save the config to the user config file
pub fn save(config: &Config) -> AppResult<()> {
    match default_config_path() {
        Some(path) => save_to_path(config, &path),
        None => Err(AppError::Config("no config directory on this platform".into())),
    }
}

pub fn load_from_path(path: &Path) -> AppResult<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    let config: Config = serde_json::from_str(&contents)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    config
        .validate()
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Config(format!("{}: {}", parent.display(), e)))?;
    }
    let contents =
        serde_json::to_string_pretty(config).map_err(|e| AppError::Config(e.to_string()))?;
    std::fs::write(path, contents)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Saved config");
    Ok(())
}
