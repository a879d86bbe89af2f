// SPDX-License-Identifier: GPL-3.0-only

//! Klick - a playful camera screen
//!
//! Pinch to zoom, swipe sideways for filters and up/down for corner frames,
//! tap to capture, and get a burst of confetti for every photo.
//!
//! # Architecture
//!
//! - [`app`]: gesture & overlay coordinator (state, handlers, event loop)
//! - [`backends`]: camera control contract and the simulated camera
//! - [`storage`]: photo records, the JSON photo store, thumbnails
//! - [`confetti`]: the celebration effect
//! - [`config`]: user configuration
//! - [`terminal`]: interactive terminal front-end

pub mod app;
pub mod backends;
pub mod config;
pub mod confetti;
pub mod constants;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{AppModel, Coordinator, CoordinatorHandle, InputEvent, Message, ScreenView};
pub use backends::camera::{CameraControl, FilterType, FrameStyle};
pub use config::Config;
pub use errors::{AppError, AppResult};
