// SPDX-License-Identifier: GPL-3.0-only

//! Screen rendering model
//!
//! [`AppModel::view`] turns the coordinator state plus the camera's session
//! state into a [`ScreenView`]: a plain snapshot a renderer can draw without
//! touching the coordinator. Renderers get a fresh snapshot after every
//! transition.

use crate::app::state::AppModel;
use crate::backends::camera::FilterType;
use crate::confetti::Particle;
use crate::constants::ui;
use crate::storage::{PhotoRecord, Thumbnail};
use std::fmt;

/// Everything needed to draw the camera screen once
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub zoom_factor: f64,
    pub filter: FilterType,
    /// Glyph drawn in each corner of the preview, if a frame is selected
    pub frame_glyph: Option<&'static str>,
    /// Filter or frame name currently flashed at the top of the screen
    pub name_overlay: Option<&'static str>,
    pub button_scale: f32,
    /// Latest loadable photo for the gallery button
    pub thumbnail: Option<Thumbnail>,
    pub flash: bool,
    pub show_gallery: bool,
    /// Photos listed in the gallery (only filled while it is shown)
    pub gallery_photos: Vec<PhotoRecord>,
    pub confetti_counter: u64,
    pub confetti: Vec<Particle>,
}

impl Default for ScreenView {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            filter: FilterType::default(),
            frame_glyph: None,
            name_overlay: None,
            button_scale: ui::BUTTON_SCALE_REST,
            thumbnail: None,
            flash: false,
            show_gallery: false,
            gallery_photos: Vec::new(),
            confetti_counter: 0,
            confetti: Vec::new(),
        }
    }
}

impl ScreenView {
    /// Outer and inner capture button diameters at the current scale
    pub fn capture_button_size(&self) -> (f32, f32) {
        (
            ui::CAPTURE_BUTTON_OUTER * self.button_scale,
            ui::CAPTURE_BUTTON_INNER * self.button_scale,
        )
    }

    pub fn is_button_pressed(&self) -> bool {
        self.button_scale < ui::BUTTON_SCALE_REST
    }
}

/// Centers of the four frame glyphs on a `width` x `height` screen:
/// top-left, top-right, bottom-left, bottom-right
pub fn frame_glyph_positions(width: f32, height: f32) -> [(f32, f32); 4] {
    let half = ui::FRAME_GLYPH_SIZE / 2.0;
    let left = half + ui::FRAME_GLYPH_INSET_X;
    let right = width - half - ui::FRAME_GLYPH_INSET_X;
    let top = half + ui::FRAME_GLYPH_INSET_TOP;
    let bottom = height - half - ui::FRAME_GLYPH_INSET_BOTTOM;

    [(left, top), (right, top), (left, bottom), (right, bottom)]
}

impl fmt::Display for ScreenView {
    /// One-line text rendering, used by the replay command
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zoom {:.2}x | filter {}", self.zoom_factor, self.filter)?;
        if let Some(glyph) = self.frame_glyph {
            write!(f, " | frame {}", glyph)?;
        }
        if let Some(name) = self.name_overlay {
            write!(f, " | [{}]", name)?;
        }
        write!(f, " | button {:.2}", self.button_scale)?;
        if self.flash {
            write!(f, " | FLASH")?;
        }
        match &self.thumbnail {
            Some(thumb) => match thumb.path.file_name() {
                Some(name) => write!(f, " | thumb {}", name.to_string_lossy())?,
                None => write!(f, " | thumb")?,
            },
            None => write!(f, " | no photos")?,
        }
        if self.confetti_counter > 0 {
            write!(f, " | confetti #{}", self.confetti_counter)?;
        }
        if self.show_gallery {
            write!(f, " | gallery ({} photos)", self.gallery_photos.len())?;
        }
        Ok(())
    }
}

impl AppModel {
    /// Snapshot of the screen for the current state
    pub fn view(&self) -> ScreenView {
        let filter = self.camera.current_filter();
        let frame = self.camera.current_frame();

        // Filter name wins if both overlays happen to be up
        let name_overlay = if self.show_filter_name() {
            Some(filter.display_name())
        } else if self.show_frame_name() {
            Some(frame.display_name())
        } else {
            None
        };

        let gallery_photos = if self.show_gallery {
            self.store().photos_newest_first()
        } else {
            Vec::new()
        };

        ScreenView {
            zoom_factor: self.camera.zoom_factor(),
            filter,
            frame_glyph: frame.glyph(),
            name_overlay,
            button_scale: self.button_scale,
            thumbnail: self.gallery_thumbnail.clone(),
            flash: self.camera.flash_animation_active(),
            show_gallery: self.show_gallery,
            gallery_photos,
            confetti_counter: self.confetti_counter,
            confetti: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_glyph_positions() {
        let [tl, tr, bl, br] = frame_glyph_positions(400.0, 800.0);
        assert_eq!(tl, (50.0, 90.0));
        assert_eq!(tr, (350.0, 90.0));
        assert_eq!(bl, (50.0, 650.0));
        assert_eq!(br, (350.0, 650.0));
    }

    #[test]
    fn test_capture_button_size_follows_scale() {
        let mut view = ScreenView::default();
        assert_eq!(view.capture_button_size(), (100.0, 85.0));
        assert!(!view.is_button_pressed());

        view.button_scale = 0.85;
        let (outer, _) = view.capture_button_size();
        assert!((outer - 85.0).abs() < 1e-4);
        assert!(view.is_button_pressed());
    }

    #[test]
    fn test_display_mentions_overlay() {
        let view = ScreenView {
            name_overlay: Some("Sepia"),
            ..Default::default()
        };
        let text = view.to_string();
        assert!(text.contains("[Sepia]"));
        assert!(text.contains("no photos"));
    }
}
