// SPDX-License-Identifier: GPL-3.0-only

//! Photo records and their persistence
//!
//! Every capture produces a [`PhotoRecord`] that is handed to a
//! [`PhotoStore`]. The default store keeps a JSON index (`photos.json`)
//! next to the image files. The gallery button only shows a thumbnail when
//! the newest record still points at a file that exists and decodes.

use crate::constants::storage;
use crate::errors::StorageError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A captured photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub filename: String,
    pub timestamp: DateTime<Local>,
}

impl PhotoRecord {
    /// Record for a capture that completed now
    pub fn new(filename: impl Into<String>) -> Self {
        Self::with_timestamp(filename, Local::now())
    }

    pub fn with_timestamp(filename: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            filename: filename.into(),
            timestamp,
        }
    }

    /// Location of the image file inside the photo directory
    pub fn file_path(&self, photo_dir: &Path) -> PathBuf {
        photo_dir.join(&self.filename)
    }
}

/// Durable storage for photo records
pub trait PhotoStore: Send {
    /// Persist a new record
    fn save(&mut self, record: PhotoRecord) -> Result<(), StorageError>;

    /// All stored records, newest first
    fn photos_newest_first(&self) -> Vec<PhotoRecord>;

    /// Directory the image files live in
    fn photo_dir(&self) -> &Path;

    fn latest(&self) -> Option<PhotoRecord> {
        self.photos_newest_first().into_iter().next()
    }
}

/// Photo store backed by a JSON index file
#[derive(Debug)]
pub struct JsonPhotoStore {
    photo_dir: PathBuf,
    records: Vec<PhotoRecord>,
}

impl JsonPhotoStore {
    /// Open the store in `photo_dir`, reading the existing index if present
    pub fn open(photo_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let photo_dir = photo_dir.into();
        let index_path = photo_dir.join(storage::INDEX_FILE);

        let records = if index_path.exists() {
            let contents = std::fs::read_to_string(&index_path)
                .map_err(|e| StorageError::ReadFailed(format!("{}: {}", index_path.display(), e)))?;
            serde_json::from_str(&contents)?
        } else {
            debug!(path = %index_path.display(), "No photo index yet");
            Vec::new()
        };

        info!(
            path = %photo_dir.display(),
            count = records.len(),
            "Photo store opened"
        );

        Ok(Self { photo_dir, records })
    }

    fn index_path(&self) -> PathBuf {
        self.photo_dir.join(storage::INDEX_FILE)
    }

    fn write_index(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.photo_dir)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.photo_dir.display(), e)))?;

        let index_path = self.index_path();
        let tmp_path = index_path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(&self.records)?;

        std::fs::write(&tmp_path, contents)
            .and_then(|_| std::fs::rename(&tmp_path, &index_path))
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", index_path.display(), e)))
    }
}

impl PhotoStore for JsonPhotoStore {
    fn save(&mut self, record: PhotoRecord) -> Result<(), StorageError> {
        self.records.push(record);
        if let Err(e) = self.write_index() {
            // Keep memory consistent with what is on disk
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    fn photos_newest_first(&self) -> Vec<PhotoRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    fn photo_dir(&self) -> &Path {
        &self.photo_dir
    }
}

/// Gallery button thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Resolve a record to a loadable image
///
/// Returns `None` when the file is gone or cannot be decoded; the gallery
/// button then behaves as if there were no photos.
pub fn resolve_thumbnail(record: &PhotoRecord, photo_dir: &Path) -> Option<Thumbnail> {
    let path = record.file_path(photo_dir);
    if !path.exists() {
        debug!(path = %path.display(), "Latest photo missing, no thumbnail");
        return None;
    }

    match image::image_dimensions(&path) {
        Ok((width, height)) => Some(Thumbnail {
            path,
            width,
            height,
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Latest photo is not a loadable image");
            None
        }
    }
}

/// Load the thumbnail for the newest record off the event loop
pub async fn load_latest_thumbnail(
    latest: Option<PhotoRecord>,
    photo_dir: PathBuf,
) -> Option<Thumbnail> {
    let record = latest?;
    tokio::task::spawn_blocking(move || resolve_thumbnail(&record, &photo_dir))
        .await
        .ok()
        .flatten()
}
