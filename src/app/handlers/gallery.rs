// SPDX-License-Identifier: GPL-3.0-only

//! Gallery handlers

use crate::app::state::{AppModel, Message, Task};
use crate::storage::{Thumbnail, load_latest_thumbnail};
use tracing::{debug, error, info};

impl AppModel {
    pub(crate) fn handle_present_gallery(&mut self) -> Task {
        self.show_gallery = true;
        info!("Gallery opened");
        Task::none()
    }

    pub(crate) fn handle_dismiss_gallery(&mut self) -> Task {
        self.show_gallery = false;
        Task::none()
    }

    pub(crate) fn handle_open_latest_photo(&self) -> Task {
        let path = {
            let store = self.store();
            let Some(record) = store.latest() else {
                debug!("No photos to open");
                return Task::none();
            };
            record.file_path(store.photo_dir())
        };

        if let Err(err) = open::that_detached(&path) {
            error!(path = %path.display(), error = %err, "Failed to open photo");
        }
        Task::none()
    }

    pub(crate) fn handle_refresh_gallery_thumbnail(&mut self) -> Task {
        self.thumbnail_generation += 1;
        let generation = self.thumbnail_generation;

        let (latest, photo_dir) = {
            let store = self.store();
            (store.latest(), store.photo_dir().to_path_buf())
        };

        Task::perform(async move {
            let thumbnail = load_latest_thumbnail(latest, photo_dir).await;
            Message::GalleryThumbnailLoaded(generation, thumbnail)
        })
    }

    /// Install a loaded thumbnail unless a newer load has started since
    pub(crate) fn handle_gallery_thumbnail_loaded(
        &mut self,
        generation: u64,
        thumbnail: Option<Thumbnail>,
    ) -> Task {
        if generation != self.thumbnail_generation {
            debug!(
                generation,
                current = self.thumbnail_generation,
                "Dropping stale thumbnail"
            );
            return Task::none();
        }

        debug!(thumbnail = ?thumbnail.as_ref().map(|t| &t.path), "Gallery thumbnail loaded");
        self.gallery_thumbnail = thumbnail;
        Task::none()
    }
}
