// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! The press animation and the capture itself are independent: the button
//! always springs back, whatever happens to the capture. The photo record is
//! written on a blocking worker; confetti does not wait for it.

use crate::app::state::{AppModel, Message, Task, TimerSlot, lock_store};
use crate::constants::ui;
use crate::errors::StorageError;
use crate::storage::PhotoRecord;
use std::sync::Arc;
use tracing::{debug, error, info};

impl AppModel {
    pub(crate) fn handle_capture_tap(&mut self) -> Task {
        self.button_scale = self.config.pressed_button_scale;
        self.button_generation += 1;

        self.camera.capture_photo();

        Task::delay(
            TimerSlot::CaptureButton,
            self.config.button_press(),
            Message::ReleaseCaptureButton(self.button_generation),
        )
    }

    pub(crate) fn handle_release_capture_button(&mut self, generation: u64) -> Task {
        if generation == self.button_generation {
            self.button_scale = ui::BUTTON_SCALE_REST;
            debug!("Capture button released");
        }
        Task::none()
    }

    /// Celebrate the photo and record it, even if the record cannot be stored
    pub(crate) fn handle_photo_captured(&mut self, filename: String) -> Task {
        self.confetti_counter += 1;

        let store = Arc::clone(&self.store);
        let record = PhotoRecord::new(filename.clone());

        Task::perform(async move {
            let result = tokio::task::spawn_blocking(move || lock_store(&store).save(record))
                .await
                .unwrap_or_else(|e| Err(StorageError::WriteFailed(format!("Task join error: {}", e))));
            Message::PhotoRecordSaved(filename, result)
        })
    }

    pub(crate) fn handle_photo_record_saved(
        &mut self,
        filename: String,
        result: Result<(), StorageError>,
    ) -> Task {
        match result {
            Ok(()) => info!(filename = %filename, "Photo saved"),
            Err(err) => {
                error!(filename = %filename, error = %err, "Failed to save photo record")
            }
        }

        self.handle_refresh_gallery_thumbnail()
    }
}
