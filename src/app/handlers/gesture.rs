// SPDX-License-Identifier: GPL-3.0-only

//! Gesture handlers
//!
//! Pinch samples are turned into zoom requests relative to the previous
//! sample of the same gesture. Swipes navigate filters or frames and flash
//! the new name on screen for a short time.

use crate::app::gesture::{SwipeAction, SwipeAxis, Translation, classify_swipe};
use crate::app::state::{AppModel, Message, Task, TimerSlot};
use crate::constants::gesture;
use tracing::debug;

impl AppModel {
    // =========================================================================
    // Pinch Zoom
    // =========================================================================

    pub(crate) fn handle_pinch_changed(&mut self, magnitude: f64) -> Task {
        if !magnitude.is_finite() || magnitude <= 0.0 {
            debug!(magnitude, "Ignoring invalid pinch sample");
            return Task::none();
        }

        let delta = magnitude / self.last_zoom_factor;
        self.last_zoom_factor = magnitude;

        let requested = self.camera.zoom_factor() * delta;
        self.camera.set_zoom(requested);

        debug!(
            magnitude,
            delta,
            requested,
            zoom = self.camera.zoom_factor(),
            "Pinch zoom"
        );
        Task::none()
    }

    pub(crate) fn handle_pinch_ended(&mut self) -> Task {
        self.last_zoom_factor = gesture::PINCH_BASELINE;
        Task::none()
    }

    // =========================================================================
    // Swipe Navigation
    // =========================================================================

    pub(crate) fn handle_swipe_ended(&mut self, translation: Translation) -> Task {
        let Some(action) = classify_swipe(translation, self.config.min_swipe_distance) else {
            debug!(?translation, "Drag too short for a swipe");
            return Task::none();
        };

        match action {
            SwipeAction::PreviousFilter => self.camera.previous_filter(),
            SwipeAction::NextFilter => self.camera.next_filter(),
            SwipeAction::PreviousFrame => self.camera.previous_frame(),
            SwipeAction::NextFrame => self.camera.next_frame(),
        }

        let after = self.config.overlay_display();
        match action.axis() {
            SwipeAxis::Horizontal => {
                let generation = self.filter_name.show();
                debug!(?action, filter = %self.camera.current_filter(), "Filter swipe");
                Task::delay(
                    TimerSlot::FilterName,
                    after,
                    Message::HideFilterName(generation),
                )
            }
            SwipeAxis::Vertical => {
                let generation = self.frame_name.show();
                debug!(?action, frame = %self.camera.current_frame(), "Frame swipe");
                Task::delay(
                    TimerSlot::FrameName,
                    after,
                    Message::HideFrameName(generation),
                )
            }
        }
    }

    pub(crate) fn handle_hide_filter_name(&mut self, generation: u64) -> Task {
        if self.filter_name.expire(generation) {
            debug!("Filter name hidden");
        }
        Task::none()
    }

    pub(crate) fn handle_hide_frame_name(&mut self, generation: u64) -> Task {
        if self.frame_name.expire(generation) {
            debug!("Frame name hidden");
        }
        Task::none()
    }
}
