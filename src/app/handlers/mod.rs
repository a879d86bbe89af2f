// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain:
//!
//! - `gesture`: pinch zoom and swipe navigation with name overlays
//! - `capture`: capture button, capture completion, confetti
//! - `gallery`: gallery presentation and thumbnail loading

pub mod capture;
pub mod gallery;
pub mod gesture;
