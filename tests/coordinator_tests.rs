// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the gesture & overlay coordinator
//!
//! The camera and photo store are replaced with recording doubles; timing
//! tests run on tokio's paused clock.

use klick::app::{InputEvent, Task, Translation};
use klick::backends::camera::PhotoCapturedCallback;
use klick::errors::StorageError;
use klick::storage::{PhotoRecord, PhotoStore};
use klick::{AppModel, CameraControl, Config, Coordinator, FilterType, FrameStyle, Message, ScreenView};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetZoom(f64),
    Capture,
    NextFilter,
    PreviousFilter,
    NextFrame,
    PreviousFrame,
}

/// Camera double: unclamped zoom, records every command
struct MockCamera {
    calls: Arc<Mutex<Vec<Call>>>,
    zoom: f64,
    filter: FilterType,
    frame: FrameStyle,
    callback: Option<PhotoCapturedCallback>,
    /// Report a finished capture straight from `capture_photo`
    complete_captures: bool,
}

impl MockCamera {
    fn new(calls: Arc<Mutex<Vec<Call>>>) -> Self {
        Self {
            calls,
            zoom: 1.0,
            filter: FilterType::default(),
            frame: FrameStyle::default(),
            callback: None,
            complete_captures: false,
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CameraControl for MockCamera {
    fn set_zoom(&mut self, factor: f64) {
        self.record(Call::SetZoom(factor));
        self.zoom = factor;
    }

    fn capture_photo(&mut self) {
        self.record(Call::Capture);
        if self.complete_captures
            && let Some(callback) = &self.callback
        {
            callback("IMG_test.jpg".to_string());
        }
    }

    fn next_filter(&mut self) {
        self.record(Call::NextFilter);
        self.filter = self.filter.next();
    }

    fn previous_filter(&mut self) {
        self.record(Call::PreviousFilter);
        self.filter = self.filter.previous();
    }

    fn next_frame(&mut self) {
        self.record(Call::NextFrame);
        self.frame = self.frame.next();
    }

    fn previous_frame(&mut self) {
        self.record(Call::PreviousFrame);
        self.frame = self.frame.previous();
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn current_filter(&self) -> FilterType {
        self.filter
    }

    fn current_frame(&self) -> FrameStyle {
        self.frame
    }

    fn flash_animation_active(&self) -> bool {
        false
    }

    fn set_photo_captured_callback(&mut self, callback: PhotoCapturedCallback) {
        self.callback = Some(callback);
    }
}

/// In-memory store; records every save attempt and optionally fails them
struct MemoryStore {
    records: Vec<PhotoRecord>,
    photo_dir: PathBuf,
    attempts: Arc<Mutex<Vec<PhotoRecord>>>,
    fail: bool,
}

impl MemoryStore {
    fn new(attempts: Arc<Mutex<Vec<PhotoRecord>>>, fail: bool) -> Self {
        Self {
            records: Vec::new(),
            photo_dir: PathBuf::from("/nonexistent/klick"),
            attempts,
            fail,
        }
    }
}

impl PhotoStore for MemoryStore {
    fn save(&mut self, record: PhotoRecord) -> Result<(), StorageError> {
        self.attempts.lock().unwrap().push(record.clone());
        if self.fail {
            return Err(StorageError::WriteFailed("disk full".into()));
        }
        self.records.push(record);
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

struct Fixture {
    model: AppModel,
    calls: Arc<Mutex<Vec<Call>>>,
    save_attempts: Arc<Mutex<Vec<PhotoRecord>>>,
}

fn fixture_with(fail_saves: bool, complete_captures: bool) -> Fixture {
    fixture_with_store(complete_captures, |attempts| {
        MemoryStore::new(attempts, fail_saves)
    })
}

fn fixture_with_store(
    complete_captures: bool,
    store: impl FnOnce(Arc<Mutex<Vec<PhotoRecord>>>) -> MemoryStore,
) -> Fixture {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let save_attempts = Arc::new(Mutex::new(Vec::new()));

    let mut camera = MockCamera::new(calls.clone());
    camera.complete_captures = complete_captures;
    let store = store(save_attempts.clone());

    Fixture {
        model: AppModel::new(Config::default(), Box::new(camera), store),
        calls,
        save_attempts,
    }
}

fn fixture() -> Fixture {
    fixture_with(false, false)
}

fn calls(fixture: &Fixture) -> Vec<Call> {
    fixture.calls.lock().unwrap().clone()
}

fn attempted_filenames(fixture: &Fixture) -> Vec<String> {
    fixture
        .save_attempts
        .lock()
        .unwrap()
        .iter()
        .map(|record| record.filename.clone())
        .collect()
}

fn swipe(width: f64, height: f64) -> Message {
    Message::SwipeEnded(Translation::new(width, height))
}

/// Apply a message, then run its follow-up work to completion and feed the
/// results back in. Timers are not fired.
async fn apply(model: &mut AppModel, message: Message) {
    let mut pending = vec![model.update(message)];
    while let Some(task) = pending.pop() {
        match task {
            Task::Perform(future) => {
                let next = future.await;
                pending.push(model.update(next));
            }
            Task::Batch(tasks) => pending.extend(tasks),
            Task::None | Task::Schedule { .. } => {}
        }
    }
}

/// Await the single piece of follow-up work in `task`
async fn perform(task: Task) -> Message {
    match task {
        Task::Perform(future) => future.await,
        other => panic!("expected follow-up work, got {:?}", other),
    }
}

// =============================================================================
// Pinch zoom
// =============================================================================

#[test]
fn test_pinch_samples_telescope_to_cumulative_magnification() {
    let mut f = fixture();
    let samples = [1.2, 1.5, 0.9, 2.0];

    for magnitude in samples {
        f.model.update(Message::PinchChanged(magnitude));
    }

    // zoom0 * (m1/1) * (m2/m1) * ... = zoom0 * m_last
    assert!((f.model.camera.zoom_factor() - 2.0).abs() < 1e-9);
    assert_eq!(f.model.last_zoom_factor, 2.0);
    assert_eq!(
        calls(&f)
            .iter()
            .filter(|call| matches!(call, Call::SetZoom(_)))
            .count(),
        samples.len()
    );
}

#[test]
fn test_pinch_end_resets_baseline() {
    let mut f = fixture();
    f.model.update(Message::PinchChanged(2.0));
    f.model.update(Message::PinchEnded);
    assert_eq!(f.model.last_zoom_factor, 1.0);

    // A second gesture starts from the zoom the first one left behind
    f.model.update(Message::PinchChanged(1.5));
    assert!((f.model.camera.zoom_factor() - 3.0).abs() < 1e-9);
}

#[test]
fn test_pinch_zoom_is_not_clamped_by_coordinator() {
    let mut f = fixture();
    f.model.update(Message::PinchChanged(50.0));
    assert_eq!(calls(&f), vec![Call::SetZoom(50.0)]);
}

#[test]
fn test_invalid_pinch_samples_ignored() {
    let mut f = fixture();
    f.model.update(Message::PinchChanged(0.0));
    f.model.update(Message::PinchChanged(-1.0));
    f.model.update(Message::PinchChanged(f64::NAN));

    assert!(calls(&f).is_empty());
    assert_eq!(f.model.last_zoom_factor, 1.0);
}

// =============================================================================
// Swipes
// =============================================================================

#[test]
fn test_swipe_directions() {
    let cases = [
        (swipe(80.0, 10.0), Call::PreviousFilter),
        (swipe(-80.0, 10.0), Call::NextFilter),
        (swipe(5.0, 80.0), Call::PreviousFrame),
        (swipe(5.0, -80.0), Call::NextFrame),
    ];

    for (message, expected) in cases {
        let mut f = fixture();
        f.model.update(message);
        assert_eq!(calls(&f), vec![expected]);
    }
}

#[test]
fn test_diagonal_swipe_is_vertical() {
    let mut f = fixture();
    let task = f.model.update(swipe(40.0, -40.0));

    assert_eq!(calls(&f), vec![Call::NextFrame]);
    assert!(f.model.show_frame_name());
    assert!(!f.model.show_filter_name());
    assert_eq!(task.scheduled().len(), 1);
}

#[test]
fn test_short_swipe_does_nothing() {
    let mut f = fixture();
    let task = f.model.update(swipe(20.0, 20.0));

    assert!(calls(&f).is_empty());
    assert!(!f.model.show_filter_name());
    assert!(!f.model.show_frame_name());
    assert!(task.is_none());
}

#[test]
fn test_swipe_exactly_at_threshold_counts() {
    let mut f = fixture();
    f.model.update(swipe(-30.0, 0.0));
    assert_eq!(calls(&f), vec![Call::NextFilter]);
}

#[test]
fn test_overlay_flags_hide_independently() {
    // Hide the filter name first, then the other way round
    for filter_first in [true, false] {
        let mut f = fixture();
        let filter_task = f.model.update(swipe(-80.0, 0.0));
        let frame_task = f.model.update(swipe(0.0, -80.0));

        // Showing one overlay does not clear the other
        assert!(f.model.show_filter_name());
        assert!(f.model.show_frame_name());

        let hide_filter = filter_task.scheduled()[0].2.clone();
        let hide_frame = frame_task.scheduled()[0].2.clone();
        assert!(matches!(hide_filter, Message::HideFilterName(_)));
        assert!(matches!(hide_frame, Message::HideFrameName(_)));

        if filter_first {
            f.model.update(hide_filter);
            assert!(!f.model.show_filter_name());
            assert!(f.model.show_frame_name());
            f.model.update(hide_frame);
        } else {
            f.model.update(hide_frame);
            assert!(f.model.show_filter_name());
            assert!(!f.model.show_frame_name());
            f.model.update(hide_filter);
        }

        assert!(!f.model.show_filter_name());
        assert!(!f.model.show_frame_name());
    }
}

#[test]
fn test_filter_swipe_shows_new_filter_name() {
    let mut f = fixture();
    f.model.update(swipe(-80.0, 0.0));

    let view = f.model.view();
    assert_eq!(
        view.name_overlay,
        Some(FilterType::default().next().display_name())
    );
}

// =============================================================================
// Capture
// =============================================================================

#[test]
fn test_capture_tap_presses_button_and_captures_once() {
    let mut f = fixture();
    let task = f.model.update(Message::CaptureTap);

    assert_eq!(calls(&f), vec![Call::Capture]);
    assert_eq!(f.model.button_scale, 0.85);
    let scheduled = task.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].1, Duration::from_millis(100));
}

#[tokio::test]
async fn test_photo_captured_with_failing_store_still_celebrates() {
    let mut f = fixture_with(true, false);
    apply(&mut f.model, Message::PhotoCaptured("x.jpg".into())).await;

    assert_eq!(attempted_filenames(&f), vec!["x.jpg".to_string()]);
    assert!(f.model.store().photos_newest_first().is_empty());
    assert_eq!(f.model.confetti_counter, 1);
}

#[tokio::test]
async fn test_photo_captured_stores_record() {
    let mut f = fixture();
    apply(&mut f.model, Message::PhotoCaptured("x.jpg".into())).await;

    assert_eq!(attempted_filenames(&f), vec!["x.jpg".to_string()]);
    let stored: Vec<String> = f
        .model
        .store()
        .photos_newest_first()
        .into_iter()
        .map(|record| record.filename)
        .collect();
    assert_eq!(stored, vec!["x.jpg".to_string()]);
    assert_eq!(f.model.confetti_counter, 1);
}

#[test]
fn test_confetti_does_not_wait_for_record_save() {
    let mut f = fixture();
    let task = f.model.update(Message::PhotoCaptured("x.jpg".into()));

    // The save is follow-up work; nothing is written inside update
    assert_eq!(f.model.confetti_counter, 1);
    assert!(attempted_filenames(&f).is_empty());
    assert!(matches!(task, Task::Perform(_)));
}

// =============================================================================
// Gallery
// =============================================================================

#[tokio::test]
async fn test_gallery_present_and_dismiss() {
    let mut f = fixture();
    apply(&mut f.model, Message::PhotoCaptured("IMG_a.jpg".into())).await;

    f.model.update(Message::PresentGallery);
    let view = f.model.view();
    assert!(view.show_gallery);
    assert_eq!(view.gallery_photos.len(), 1);

    f.model.update(Message::DismissGallery);
    assert!(!f.model.view().show_gallery);
}

#[tokio::test]
async fn test_thumbnail_missing_file_behaves_like_no_photos() {
    let mut f = fixture();
    let task = f.model.update(Message::RefreshGalleryThumbnail);
    let Message::GalleryThumbnailLoaded(generation, thumbnail) = perform(task).await else {
        panic!("expected a thumbnail result");
    };
    assert_eq!(thumbnail, None);

    f.model
        .update(Message::GalleryThumbnailLoaded(generation, thumbnail));
    assert_eq!(f.model.view().thumbnail, None);
}

#[tokio::test]
async fn test_older_thumbnail_load_cannot_replace_newer() {
    use chrono::TimeZone;

    let dir = tempfile::tempdir().unwrap();
    image::RgbImage::new(4, 4)
        .save(dir.path().join("old.png"))
        .unwrap();
    image::RgbImage::new(8, 8)
        .save(dir.path().join("new.png"))
        .unwrap();

    let photo_dir = dir.path().to_path_buf();
    let mut f = fixture_with_store(false, |attempts| {
        let mut store = MemoryStore::new(attempts, false);
        store.photo_dir = photo_dir;
        store
    });
    let at = |minute| {
        chrono::Local
            .with_ymd_and_hms(2026, 1, 16, 9, minute, 0)
            .single()
            .unwrap()
    };

    f.model
        .store()
        .save(PhotoRecord::with_timestamp("old.png", at(0)))
        .unwrap();
    let older_load = f.model.update(Message::RefreshGalleryThumbnail);

    f.model
        .store()
        .save(PhotoRecord::with_timestamp("new.png", at(1)))
        .unwrap();
    let newer_load = f.model.update(Message::RefreshGalleryThumbnail);

    // The newer load finishes first; the older one arrives late
    let newer = perform(newer_load).await;
    f.model.update(newer);
    let older = perform(older_load).await;
    f.model.update(older);

    let thumbnail = f.model.view().thumbnail.unwrap();
    assert_eq!(thumbnail.path, dir.path().join("new.png"));
    assert_eq!((thumbnail.width, thumbnail.height), (8, 8));
}

// =============================================================================
// Event loop timing
// =============================================================================

fn spawn_coordinator(
    model: AppModel,
) -> (
    klick::CoordinatorHandle,
    watch::Receiver<ScreenView>,
    tokio::task::JoinHandle<AppModel>,
) {
    let (tx, rx) = watch::channel(ScreenView::default());
    let coordinator = Coordinator::new(model, tx);
    let handle = coordinator.handle();
    let running = tokio::spawn(coordinator.run());
    (handle, rx, running)
}

#[tokio::test(start_paused = true)]
async fn test_capture_button_springs_back() {
    let f = fixture();
    let calls = f.calls.clone();
    let (handle, rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();

    handle.send(InputEvent::CaptureTap);

    sleep_until(start + Duration::from_millis(50)).await;
    assert!(rx.borrow().is_button_pressed());
    assert_eq!(
        calls.lock().unwrap().iter().filter(|c| **c == Call::Capture).count(),
        1
    );

    sleep_until(start + Duration::from_millis(150)).await;
    assert_eq!(rx.borrow().button_scale, 1.0);

    handle.shutdown();
    running.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_filter_name_hides_after_display_period() {
    let f = fixture();
    let (handle, rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();

    handle.send(InputEvent::Swipe {
        width: -100.0,
        height: 0.0,
    });

    sleep_until(start + Duration::from_millis(1400)).await;
    assert!(rx.borrow().name_overlay.is_some());

    sleep_until(start + Duration::from_millis(1600)).await;
    assert!(rx.borrow().name_overlay.is_none());

    handle.shutdown();
    running.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_repeated_swipe_restarts_display_period() {
    let f = fixture();
    let (handle, rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();

    handle.send(InputEvent::Swipe {
        width: -100.0,
        height: 0.0,
    });

    sleep_until(start + Duration::from_millis(1000)).await;
    handle.send(InputEvent::Swipe {
        width: -100.0,
        height: 0.0,
    });

    // The first timer would have fired at 1.5s
    sleep_until(start + Duration::from_millis(1600)).await;
    assert!(rx.borrow().name_overlay.is_some());

    sleep_until(start + Duration::from_millis(2400)).await;
    assert!(rx.borrow().name_overlay.is_some());

    sleep_until(start + Duration::from_millis(2600)).await;
    assert!(rx.borrow().name_overlay.is_none());

    handle.shutdown();
    running.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_filter_and_frame_names_expire_on_their_own_schedules() {
    let f = fixture();
    let (handle, rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();
    let filter = FilterType::default().next().display_name();
    let frame = FrameStyle::default().next().display_name();

    handle.send(InputEvent::Swipe {
        width: -100.0,
        height: 0.0,
    });
    sleep_until(start + Duration::from_millis(1000)).await;
    handle.send(InputEvent::Swipe {
        width: 0.0,
        height: -100.0,
    });

    // Both up; the filter name is shown
    sleep_until(start + Duration::from_millis(1400)).await;
    assert_eq!(rx.borrow().name_overlay, Some(filter));

    // Filter name gone at 1.5s, frame name stays until 2.5s
    sleep_until(start + Duration::from_millis(1600)).await;
    assert_eq!(rx.borrow().name_overlay, Some(frame));

    sleep_until(start + Duration::from_millis(2600)).await;
    assert_eq!(rx.borrow().name_overlay, None);

    handle.shutdown();
    running.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_capture_completion_fires_confetti() {
    let f = fixture_with(false, true);
    let save_attempts = f.save_attempts.clone();
    let (handle, rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();

    handle.send(InputEvent::CaptureTap);

    sleep_until(start + Duration::from_millis(10)).await;
    {
        let view = rx.borrow();
        assert_eq!(view.confetti_counter, 1);
        assert!(!view.confetti.is_empty());
    }
    assert_eq!(save_attempts.lock().unwrap().len(), 1);

    // The burst is over after its duration
    sleep_until(start + Duration::from_millis(2100)).await;
    handle.send(Message::AnimationFrame);
    sleep_until(start + Duration::from_millis(2110)).await;
    assert!(rx.borrow().confetti.is_empty());

    handle.shutdown();
    running.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_timers() {
    let f = fixture();
    let (handle, _rx, running) = spawn_coordinator(f.model);
    let start = Instant::now();

    handle.send(InputEvent::Swipe {
        width: 0.0,
        height: 100.0,
    });
    handle.send(InputEvent::CaptureTap);
    sleep_until(start + Duration::from_millis(10)).await;

    handle.shutdown();
    let model = running.await.unwrap();

    // Nothing fired after teardown
    sleep_until(start + Duration::from_millis(3000)).await;
    assert!(model.show_frame_name());
    assert_eq!(model.button_scale, 0.85);
    assert!(!handle.send(Message::AnimationFrame));
}
