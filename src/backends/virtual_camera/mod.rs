// SPDX-License-Identifier: GPL-3.0-only

//! Simulated camera
//!
//! Implements [`CameraControl`] without capture hardware. Captures render a
//! gradient test pattern at the current zoom, run it through the selected
//! filter, and write a JPEG into the photo directory on a blocking worker.
//! The flash flag is raised for the duration of the write.

pub mod filters;

use crate::backends::camera::{CameraControl, FilterType, FrameStyle, PhotoCapturedCallback};
use crate::config::ZoomRange;
use crate::constants::storage;
use crate::errors::CameraError;
use image::{Rgb, RgbImage};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

pub struct VirtualCamera {
    zoom: f64,
    zoom_range: ZoomRange,
    filter: FilterType,
    frame: FrameStyle,
    photo_dir: PathBuf,
    flash_active: Arc<AtomicBool>,
    callback: Option<PhotoCapturedCallback>,
}

impl VirtualCamera {
    pub fn new(photo_dir: PathBuf, zoom_range: ZoomRange) -> Self {
        Self {
            zoom: zoom_range.min,
            zoom_range,
            filter: FilterType::default(),
            frame: FrameStyle::default(),
            photo_dir,
            flash_active: Arc::new(AtomicBool::new(false)),
            callback: None,
        }
    }
}

impl CameraControl for VirtualCamera {
    fn set_zoom(&mut self, factor: f64) {
        let clamped = self.zoom_range.clamp(factor);
        if (clamped - self.zoom).abs() > f64::EPSILON {
            debug!(requested = factor, zoom = clamped, "Zoom changed");
        }
        self.zoom = clamped;
    }

    fn capture_photo(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("Capture requested outside of a tokio runtime");
            return;
        };

        let photo_dir = self.photo_dir.clone();
        let filter = self.filter;
        let zoom = self.zoom;
        let flash = Arc::clone(&self.flash_active);
        let callback = self.callback.clone();

        info!(filter = %filter, zoom, "Capturing photo...");
        flash.store(true, Ordering::SeqCst);

        runtime.spawn_blocking(move || {
            let result = capture_and_save(&photo_dir, filter, zoom);
            flash.store(false, Ordering::SeqCst);

            match result {
                Ok(filename) => {
                    info!(filename = %filename, "Photo written");
                    match callback {
                        Some(callback) => callback(filename),
                        None => warn!("No capture callback registered"),
                    }
                }
                Err(e) => error!(error = %e, "Capture failed"),
            }
        });
    }

    fn next_filter(&mut self) {
        self.filter = self.filter.next();
        debug!(filter = %self.filter, "Next filter");
    }

    fn previous_filter(&mut self) {
        self.filter = self.filter.previous();
        debug!(filter = %self.filter, "Previous filter");
    }

    fn next_frame(&mut self) {
        self.frame = self.frame.next();
        debug!(frame = %self.frame, "Next frame");
    }

    fn previous_frame(&mut self) {
        self.frame = self.frame.previous();
        debug!(frame = %self.frame, "Previous frame");
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn current_filter(&self) -> FilterType {
        self.filter
    }

    fn current_frame(&self) -> FrameStyle {
        self.frame
    }

    fn flash_animation_active(&self) -> bool {
        self.flash_active.load(Ordering::SeqCst)
    }

    fn set_photo_captured_callback(&mut self, callback: PhotoCapturedCallback) {
        self.callback = Some(callback);
    }
}

/// Render, filter, and encode one synthetic capture. Returns the filename.
pub fn capture_and_save(
    photo_dir: &Path,
    filter: FilterType,
    zoom: f64,
) -> Result<String, CameraError> {
    std::fs::create_dir_all(photo_dir)
        .map_err(|e| CameraError::PhotoDirectory(format!("{}: {}", photo_dir.display(), e)))?;

    let mut image = render_test_pattern(storage::CAPTURE_WIDTH, storage::CAPTURE_HEIGHT, zoom);
    filters::apply_filter(&mut image, filter);

    let (filename, file) = reserve_photo_file(photo_dir, chrono::Local::now())?;
    let path = photo_dir.join(&filename);
    let mut writer = BufWriter::new(file);
    let written = image
        .write_to(&mut writer, image::ImageFormat::Jpeg)
        .map_err(CameraError::from)
        .and_then(|()| {
            writer
                .flush()
                .map_err(|e| CameraError::CaptureFailed(format!("{}: {}", path.display(), e)))
        });
    if let Err(e) = written {
        drop(writer);
        let _ = std::fs::remove_file(&path);
        return Err(e);
    }

    Ok(filename)
}

/// Upper bound on `_N` suffixes tried for one timestamp
const MAX_NAME_SEQUENCE: u32 = 1000;

/// Create a new, empty photo file named after `timestamp`
///
/// Never overwrites: if the name is taken (two captures in the same
/// millisecond), `_1`, `_2`, ... are appended until a free name is found.
pub fn reserve_photo_file(
    photo_dir: &Path,
    timestamp: chrono::DateTime<chrono::Local>,
) -> Result<(String, File), CameraError> {
    let base = photo_filename(timestamp);
    let stem = base.trim_end_matches(".jpg");

    for sequence in 0..MAX_NAME_SEQUENCE {
        let filename = if sequence == 0 {
            base.clone()
        } else {
            format!("{}_{}.jpg", stem, sequence)
        };
        let path = photo_dir.join(&filename);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((filename, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(CameraError::CaptureFailed(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }

    Err(CameraError::CaptureFailed(format!(
        "no free name for {} in {}",
        base,
        photo_dir.display()
    )))
}

/// `IMG_20260119_143015_042.jpg`
pub fn photo_filename(timestamp: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "{}{}.jpg",
        storage::PHOTO_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S_%3f")
    )
}

/// Diagonal color gradient with a grid, magnified around the center by `zoom`
pub fn render_test_pattern(width: u32, height: u32, zoom: f64) -> RgbImage {
    let zoom = zoom.max(1.0);
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);

    RgbImage::from_fn(width, height, |x, y| {
        let sx = cx + (x as f64 - cx) / zoom;
        let sy = cy + (y as f64 - cy) / zoom;

        let u = (sx / width as f64).clamp(0.0, 1.0);
        let v = (sy / height as f64).clamp(0.0, 1.0);

        let on_grid = (sx as u32) % 64 < 2 || (sy as u32) % 64 < 2;
        if on_grid {
            return Rgb([240, 240, 240]);
        }

        Rgb([
            (u * 255.0) as u8,
            (v * 255.0) as u8,
            ((1.0 - u * v) * 255.0) as u8,
        ])
    })
}
