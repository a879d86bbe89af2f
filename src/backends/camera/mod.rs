// SPDX-License-Identifier: GPL-3.0-only

//! Camera control contract
//!
//! The coordinator never talks to capture hardware directly. It issues
//! commands through [`CameraControl`] and reads back the session state
//! (zoom, filter, frame, flash) when rendering. Zoom clamping and
//! filter/frame enumeration belong to the implementation.

pub mod types;

use std::sync::Arc;
pub use types::{FilterType, FrameStyle};

/// Completion callback invoked with the captured file's name
pub type PhotoCapturedCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Commands and observable session state of a camera
pub trait CameraControl: Send {
    /// Request a zoom factor (the camera clamps it)
    fn set_zoom(&mut self, factor: f64);

    /// Start an asynchronous capture; completion is reported through the
    /// registered [`PhotoCapturedCallback`]
    fn capture_photo(&mut self);

    fn next_filter(&mut self);
    fn previous_filter(&mut self);
    fn next_frame(&mut self);
    fn previous_frame(&mut self);

    /// Current zoom factor
    fn zoom_factor(&self) -> f64;

    fn current_filter(&self) -> FilterType;
    fn current_frame(&self) -> FrameStyle;

    /// Whether the capture flash is currently showing
    fn flash_animation_active(&self) -> bool;

    /// Register the completion callback, replacing any previous one
    fn set_photo_captured_callback(&mut self, callback: PhotoCapturedCallback);
}
