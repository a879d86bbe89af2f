// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen coordinator
//!
//! Translates gestures and taps into camera commands and drives the
//! short-lived UI state around them (name overlays, button press, confetti,
//! gallery). Organized like an Elm application:
//!
//! - [`state`]: the model, messages, and tasks
//! - [`update`](AppModel::update): message dispatch into `handlers`
//! - [`view`]: screen snapshots for renderers
//! - [`runtime`]: the single-task event loop that owns the model
//! - [`timers`]: cancelable deferred messages

pub mod gesture;
mod handlers;
pub mod runtime;
pub mod state;
pub mod timers;
mod update;
pub mod view;

pub use gesture::{InputEvent, SwipeAction, Translation};
pub use runtime::{Coordinator, CoordinatorHandle, Renderer};
pub use state::{AppModel, Message, Task, TimedFlag, TimerSlot};
pub use view::ScreenView;
