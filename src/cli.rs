// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands that run without the interactive screen
//!
//! - Listing stored photos
//! - Replaying a scripted gesture sequence through the coordinator
//! - Showing the effective configuration

use klick::app::{InputEvent, Renderer};
use klick::backends::virtual_camera::VirtualCamera;
use klick::config::{self, Config};
use klick::storage::{JsonPhotoStore, PhotoStore};
use klick::{AppError, AppModel, AppResult, Coordinator, ScreenView};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Time given to in-flight timers after the last scripted event
const DEFAULT_SETTLE_MS: u64 = 2500;

/// List stored photos, newest first
pub fn list_photos(config: &Config) -> AppResult<()> {
    let photo_dir = config.photo_dir();
    let store = JsonPhotoStore::open(&photo_dir)?;
    let photos = store.photos_newest_first();

    if photos.is_empty() {
        println!("No photos in {}", photo_dir.display());
        return Ok(());
    }

    println!("Photos in {}:", photo_dir.display());
    println!();
    for record in &photos {
        let missing = if record.file_path(&photo_dir).exists() {
            ""
        } else {
            "  (missing)"
        };
        println!(
            "  {}  {}{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.filename,
            missing
        );
    }
    println!();
    println!("{} photo(s)", photos.len());

    Ok(())
}

/// A gesture script: input events stamped with their offset from the start
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ScriptedEvent>,
    /// How long to keep running after the last event
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedEvent {
    pub at_ms: u64,
    pub event: InputEvent,
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

impl ReplayScript {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Replay(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents).map_err(|e| AppError::Replay(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let mut script: Self = serde_json::from_str(contents)?;
        script.events.sort_by_key(|event| event.at_ms);
        Ok(script)
    }
}

/// Prints each distinct screen state with its time offset
struct TextRenderer {
    start: Instant,
    last_line: Option<String>,
}

impl TextRenderer {
    fn new(start: Instant) -> Self {
        Self {
            start,
            last_line: None,
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &ScreenView) {
        let line = view.to_string();
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        println!("{:>6} ms  {}", self.start.elapsed().as_millis(), line);
        self.last_line = Some(line);
    }
}

/// Feed a scripted gesture sequence through the screen
pub fn replay(config: Config, script_path: &Path) -> AppResult<()> {
    let script = ReplayScript::load(script_path)?;
    info!(
        script = %script_path.display(),
        events = script.events.len(),
        "Replaying gestures"
    );

    let photo_dir = config.photo_dir();
    let store = JsonPhotoStore::open(&photo_dir)?;
    let camera = VirtualCamera::new(photo_dir, config.zoom_range);
    let model = AppModel::new(config, Box::new(camera), store);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Replay(format!("Failed to start runtime: {}", e)))?;

    let model = runtime.block_on(async move {
        let start = Instant::now();
        let coordinator = Coordinator::new(model, TextRenderer::new(start));
        let handle = coordinator.handle();
        let running = tokio::spawn(coordinator.run());

        for scripted in script.events {
            tokio::time::sleep_until(start + Duration::from_millis(scripted.at_ms)).await;
            if !handle.send(scripted.event) {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(script.settle_ms)).await;
        handle.shutdown();

        running
            .await
            .map_err(|e| AppError::Replay(format!("Coordinator failed: {}", e)))
    })?;

    println!();
    println!(
        "Final: zoom {:.2}x, filter {}, frame {}, {} photo(s) this session",
        model.camera.zoom_factor(),
        model.camera.current_filter(),
        model.camera.current_frame(),
        model.confetti_counter
    );

    Ok(())
}

/// Print the effective configuration, optionally writing it back
pub fn show_config(config: &Config, path: Option<&Path>, save: bool) -> AppResult<()> {
    let target = match path {
        Some(path) => Some(path.to_path_buf()),
        None => config::default_config_path(),
    };

    match &target {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none on this platform)"),
    }
    println!("Photo directory: {}", config.photo_dir().display());
    println!();

    let json = serde_json::to_string_pretty(config).map_err(|e| AppError::Config(e.to_string()))?;
    println!("{}", json);

    if save {
        match path {
            Some(path) => config::save_to_path(config, path)?,
            None => config::save(config)?,
        }
        if let Some(target) = &target {
            println!();
            println!("Saved to {}", target.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_parses_and_sorts_events() {
        let script = ReplayScript::parse(
            r#"{
                "events": [
                    { "at_ms": 400, "event": { "type": "capture_tap" } },
                    { "at_ms": 0, "event": { "type": "pinch_changed", "magnitude": 1.5 } },
                    { "at_ms": 200, "event": { "type": "swipe", "width": -80.0, "height": 5.0 } }
                ]
            }"#,
        )
        .unwrap();

        let offsets: Vec<u64> = script.events.iter().map(|e| e.at_ms).collect();
        assert_eq!(offsets, vec![0, 200, 400]);
        assert_eq!(script.settle_ms, DEFAULT_SETTLE_MS);
        assert_eq!(script.events[2].event, InputEvent::CaptureTap);
    }

    #[test]
    fn test_script_rejects_unknown_event() {
        let result = ReplayScript::parse(r#"{ "events": [ { "at_ms": 0, "event": { "type": "wave" } } ] }"#);
        assert!(result.is_err());
    }
}
