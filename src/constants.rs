// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Gesture recognition and overlay timing
pub mod timing {
    use super::Duration;

    /// How long a filter or frame name stays on screen after a swipe
    pub const OVERLAY_DISPLAY_MS: u64 = 1500;

    /// How long the capture button stays pressed in
    pub const BUTTON_PRESS_MS: u64 = 100;

    /// Length of one confetti burst
    pub const CONFETTI_DURATION_MS: u64 = 2000;

    /// Interval between animation frames in the terminal front-end
    pub const ANIMATION_FRAME: Duration = Duration::from_millis(33);
}

/// Gesture thresholds
pub mod gesture {
    /// Minimum drag distance before a swipe is recognized
    pub const MIN_SWIPE_DISTANCE: f64 = 30.0;

    /// Baseline magnification at the start of every pinch
    pub const PINCH_BASELINE: f64 = 1.0;
}

/// Zoom limits applied by the camera (not by the coordinator)
pub mod zoom {
    /// Minimum zoom factor (no magnification)
    pub const MIN: f64 = 1.0;

    /// Maximum zoom factor
    pub const MAX: f64 = 10.0;
}

/// UI constants
pub mod ui {
    /// Capture button size (outer ring)
    pub const CAPTURE_BUTTON_OUTER: f32 = 100.0;

    /// Capture button size (inner circle)
    pub const CAPTURE_BUTTON_INNER: f32 = 85.0;

    /// Capture button scale at rest
    pub const BUTTON_SCALE_REST: f32 = 1.0;

    /// Capture button scale while pressed
    pub const BUTTON_SCALE_PRESSED: f32 = 0.85;

    /// Frame corner glyph size
    pub const FRAME_GLYPH_SIZE: f32 = 60.0;

    /// Inset of frame glyphs from the left/right edges
    pub const FRAME_GLYPH_INSET_X: f32 = 20.0;

    /// Inset of the top frame glyphs from the top edge
    pub const FRAME_GLYPH_INSET_TOP: f32 = 60.0;

    /// Inset of the bottom frame glyphs from the bottom edge
    pub const FRAME_GLYPH_INSET_BOTTOM: f32 = 120.0;
}

/// Celebration effect parameters
pub mod confetti {
    /// Particles per burst
    pub const PARTICLES: usize = 40;

    /// Spread radius of a burst
    pub const RADIUS: f32 = 500.0;

    /// Glyphs a burst draws from
    pub const GLYPHS: [&str; 37] = [
        "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵",
        "🐔", "🐧", "🐦", "🐤", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗", "🐴", "🦄", "🐝", "🐛", "🦋",
        "🐌", "🐞", "🐢", "🐍", "🦎", "🦖", "🦕",
    ];
}

/// Storage layout
pub mod storage {
    /// Directory name under the user's pictures folder
    pub const PHOTO_DIR_NAME: &str = "klick";

    /// Photo index file inside the photo directory
    pub const INDEX_FILE: &str = "photos.json";

    /// Filename prefix for captured photos
    pub const PHOTO_PREFIX: &str = "IMG_";

    /// Synthetic capture resolution of the virtual camera
    pub const CAPTURE_WIDTH: u32 = 640;
    pub const CAPTURE_HEIGHT: u32 = 480;
}
