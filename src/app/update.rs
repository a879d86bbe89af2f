// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` is a dispatcher; the handling code lives in the `handlers`
//! submodules, grouped by functional domain:
//!
//! - `handlers::gesture`: pinch zoom, swipe navigation, name overlays
//! - `handlers::capture`: capture button and capture completion
//! - `handlers::gallery`: gallery presentation and thumbnail

use crate::app::state::{AppModel, Message, Task};

impl AppModel {
    /// Apply one message to the state and return the follow-up work
    pub fn update(&mut self, message: Message) -> Task {
        match message {
            // ===== Gestures =====
            Message::PinchChanged(magnitude) => self.handle_pinch_changed(magnitude),
            Message::PinchEnded => self.handle_pinch_ended(),
            Message::SwipeEnded(translation) => self.handle_swipe_ended(translation),
            Message::CaptureTap => self.handle_capture_tap(),

            // ===== Camera =====
            Message::PhotoCaptured(filename) => self.handle_photo_captured(filename),
            Message::PhotoRecordSaved(filename, result) => {
                self.handle_photo_record_saved(filename, result)
            }

            // ===== Gallery =====
            Message::PresentGallery => self.handle_present_gallery(),
            Message::DismissGallery => self.handle_dismiss_gallery(),
            Message::OpenLatestPhoto => self.handle_open_latest_photo(),
            Message::RefreshGalleryThumbnail => self.handle_refresh_gallery_thumbnail(),
            Message::GalleryThumbnailLoaded(generation, thumbnail) => {
                self.handle_gallery_thumbnail_loaded(generation, thumbnail)
            }

            // ===== Timers =====
            Message::HideFilterName(generation) => self.handle_hide_filter_name(generation),
            Message::HideFrameName(generation) => self.handle_hide_frame_name(generation),
            Message::ReleaseCaptureButton(generation) => {
                self.handle_release_capture_button(generation)
            }

            Message::AnimationFrame | Message::Shutdown => Task::none(),
        }
    }
}
