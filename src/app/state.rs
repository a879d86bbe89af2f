// SPDX-License-Identifier: GPL-3.0-only

//! Coordinator state, messages, and tasks

use crate::app::gesture::Translation;
use crate::backends::camera::CameraControl;
use crate::config::Config;
use crate::constants::{gesture, ui};
use crate::errors::StorageError;
use crate::storage::{PhotoStore, Thumbnail};
use futures::future::BoxFuture;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Photo store shared between the coordinator and the blocking writer
pub type SharedPhotoStore = Arc<Mutex<dyn PhotoStore>>;

/// Lock the store; a panicked writer does not make the records unusable
pub(crate) fn lock_store(store: &SharedPhotoStore) -> MutexGuard<'_, dyn PhotoStore + 'static> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timer slots; arming a slot replaces whatever was pending in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Auto-hide of the filter name overlay
    FilterName,
    /// Auto-hide of the frame name overlay
    FrameName,
    /// Release of the pressed capture button
    CaptureButton,
}

/// Boolean flag that is shown now and hidden by a later timer
///
/// Each `show` bumps the generation. An expiry only hides the flag if it
/// carries the current generation, so an expiry scheduled for an earlier
/// show can never hide a later one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimedFlag {
    visible: bool,
    generation: u64,
}

impl TimedFlag {
    /// Show the flag, returning the generation its expiry must carry
    pub fn show(&mut self) -> u64 {
        self.visible = true;
        self.generation += 1;
        self.generation
    }

    /// Hide the flag if `generation` is still current. Returns true if hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.visible && generation == self.generation {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Messages handled by the coordinator
///
/// - **Gestures**: pinch samples, swipe releases, capture taps
/// - **Camera**: capture completion reported by the camera
/// - **Gallery**: presentation and thumbnail loading
/// - **Timers**: expiries carrying the generation they were armed for
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ===== Gestures =====
    /// Pinch sample (cumulative magnification of the current gesture)
    PinchChanged(f64),
    /// Pinch gesture finished
    PinchEnded,
    /// Drag released with this translation
    SwipeEnded(Translation),
    /// Capture button tapped
    CaptureTap,

    // ===== Camera =====
    /// Camera finished writing a photo with this filename
    PhotoCaptured(String),
    /// The photo's record was written to the store (or failed to be)
    PhotoRecordSaved(String, Result<(), StorageError>),

    // ===== Gallery =====
    PresentGallery,
    DismissGallery,
    /// Open the newest photo in the system image viewer
    OpenLatestPhoto,
    RefreshGalleryThumbnail,
    /// Result of the thumbnail load started with this generation
    GalleryThumbnailLoaded(u64, Option<Thumbnail>),

    // ===== Timers =====
    HideFilterName(u64),
    HideFrameName(u64),
    ReleaseCaptureButton(u64),

    /// Redraw without a state change (animations)
    AnimationFrame,
    /// Stop the coordinator
    Shutdown,
}

/// Side effects requested by a state transition
pub enum Task {
    None,
    /// Deliver `message` after `after`, cancelling anything pending in `slot`
    Schedule {
        slot: TimerSlot,
        after: Duration,
        message: Message,
    },
    /// Run a future and deliver its output
    Perform(BoxFuture<'static, Message>),
    Batch(Vec<Task>),
}

impl Task {
    pub fn none() -> Self {
        Task::None
    }

    pub fn delay(slot: TimerSlot, after: Duration, message: Message) -> Self {
        Task::Schedule {
            slot,
            after,
            message,
        }
    }

    pub fn perform<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        Task::Perform(Box::pin(future))
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task>) -> Self {
        Task::Batch(tasks.into_iter().collect())
    }

    /// Scheduled timers in this task, flattened
    pub fn scheduled(&self) -> Vec<(TimerSlot, Duration, &Message)> {
        match self {
            Task::None | Task::Perform(_) => Vec::new(),
            Task::Schedule {
                slot,
                after,
                message,
            } => vec![(*slot, *after, message)],
            Task::Batch(tasks) => tasks.iter().flat_map(Task::scheduled).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Task::None => true,
            Task::Batch(tasks) => tasks.iter().all(Task::is_none),
            _ => false,
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::None => write!(f, "None"),
            Task::Schedule {
                slot,
                after,
                message,
            } => write!(f, "Schedule({:?} after {:?}: {:?})", slot, after, message),
            Task::Perform(_) => write!(f, "Perform(..)"),
            Task::Batch(tasks) => f.debug_list().entries(tasks).finish(),
        }
    }
}

/// Coordinator state
///
/// Owns the transient UI state of the camera screen. Session state (zoom,
/// filter, frame, flash) stays with the camera and is read through it.
pub struct AppModel {
    pub config: Config,
    pub camera: Box<dyn CameraControl>,
    pub(crate) store: SharedPhotoStore,
    /// Magnification of the previous sample in the current pinch
    pub last_zoom_factor: f64,
    /// Cosmetic scale of the capture button
    pub button_scale: f32,
    pub(crate) button_generation: u64,
    pub filter_name: TimedFlag,
    pub frame_name: TimedFlag,
    /// Each increment fires one confetti burst
    pub confetti_counter: u64,
    pub show_gallery: bool,
    pub gallery_thumbnail: Option<Thumbnail>,
    /// Only the most recently started thumbnail load may install its result
    pub(crate) thumbnail_generation: u64,
}

impl AppModel {
    pub fn new(
        config: Config,
        camera: Box<dyn CameraControl>,
        store: impl PhotoStore + 'static,
    ) -> Self {
        Self {
            config,
            camera,
            store: Arc::new(Mutex::new(store)),
            last_zoom_factor: gesture::PINCH_BASELINE,
            button_scale: ui::BUTTON_SCALE_REST,
            button_generation: 0,
            filter_name: TimedFlag::default(),
            frame_name: TimedFlag::default(),
            confetti_counter: 0,
            show_gallery: false,
            gallery_thumbnail: None,
            thumbnail_generation: 0,
        }
    }

    /// Lock the photo store for reading
    pub fn store(&self) -> MutexGuard<'_, dyn PhotoStore + 'static> {
        lock_store(&self.store)
    }

    /// Work to run when the screen appears
    pub fn init(&mut self) -> Task {
        self.handle_refresh_gallery_thumbnail()
    }

    pub fn show_filter_name(&self) -> bool {
        self.filter_name.is_visible()
    }

    pub fn show_frame_name(&self) -> bool {
        self.frame_name.is_visible()
    }
}
