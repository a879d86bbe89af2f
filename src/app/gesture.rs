// SPDX-License-Identifier: GPL-3.0-only

//! Gesture classification
//!
//! Swipes are evaluated once, at release. A drag shorter than the minimum
//! distance is not a swipe at all. Otherwise the dominant axis decides
//! between filter (horizontal) and frame (vertical) navigation; a perfectly
//! diagonal drag counts as vertical because horizontal needs a strictly
//! larger width.

use crate::app::state::Message;
use serde::{Deserialize, Serialize};

/// Drag translation at release, in screen units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub width: f64,
    pub height: f64,
}

impl Translation {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Straight-line drag distance
    pub fn distance(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

/// Camera navigation triggered by a recognized swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    PreviousFilter,
    NextFilter,
    PreviousFrame,
    NextFrame,
}

impl SwipeAction {
    pub fn axis(&self) -> SwipeAxis {
        match self {
            SwipeAction::PreviousFilter | SwipeAction::NextFilter => SwipeAxis::Horizontal,
            SwipeAction::PreviousFrame | SwipeAction::NextFrame => SwipeAxis::Vertical,
        }
    }
}

/// Classify a released drag, or `None` if it never became a swipe
pub fn classify_swipe(translation: Translation, min_distance: f64) -> Option<SwipeAction> {
    // Also rejects NaN translations
    if !(translation.distance() >= min_distance) {
        return None;
    }

    let action = if translation.width.abs() > translation.height.abs() {
        if translation.width > 0.0 {
            SwipeAction::PreviousFilter
        } else {
            SwipeAction::NextFilter
        }
    } else if translation.height > 0.0 {
        SwipeAction::PreviousFrame
    } else {
        SwipeAction::NextFrame
    };

    Some(action)
}

/// Input accepted from front-ends and replay scripts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pinch sample with the gesture's cumulative magnification
    PinchChanged { magnitude: f64 },
    PinchEnded,
    /// Drag released with the given translation
    Swipe { width: f64, height: f64 },
    CaptureTap,
    OpenGallery,
    CloseGallery,
}

impl From<InputEvent> for Message {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::PinchChanged { magnitude } => Message::PinchChanged(magnitude),
            InputEvent::PinchEnded => Message::PinchEnded,
            InputEvent::Swipe { width, height } => {
                Message::SwipeEnded(Translation::new(width, height))
            }
            InputEvent::CaptureTap => Message::CaptureTap,
            InputEvent::OpenGallery => Message::PresentGallery,
            InputEvent::CloseGallery => Message::DismissGallery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 30.0;

    #[test]
    fn test_horizontal_swipes() {
        assert_eq!(
            classify_swipe(Translation::new(80.0, 10.0), MIN),
            Some(SwipeAction::PreviousFilter)
        );
        assert_eq!(
            classify_swipe(Translation::new(-80.0, -10.0), MIN),
            Some(SwipeAction::NextFilter)
        );
    }

    #[test]
    fn test_vertical_swipes() {
        assert_eq!(
            classify_swipe(Translation::new(5.0, 60.0), MIN),
            Some(SwipeAction::PreviousFrame)
        );
        assert_eq!(
            classify_swipe(Translation::new(5.0, -60.0), MIN),
            Some(SwipeAction::NextFrame)
        );
    }

    #[test]
    fn test_diagonal_is_vertical() {
        assert_eq!(
            classify_swipe(Translation::new(50.0, 50.0), MIN),
            Some(SwipeAction::PreviousFrame)
        );
        assert_eq!(
            classify_swipe(Translation::new(50.0, -50.0), MIN),
            Some(SwipeAction::NextFrame)
        );
    }

    #[test]
    fn test_short_drag_is_ignored() {
        assert_eq!(classify_swipe(Translation::new(29.0, 0.0), MIN), None);
        assert_eq!(classify_swipe(Translation::new(0.0, -12.0), MIN), None);
        assert_eq!(classify_swipe(Translation::new(f64::NAN, 100.0), MIN), None);
        assert!(classify_swipe(Translation::new(30.0, 0.0), MIN).is_some());
    }

    #[test]
    fn test_input_event_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"swipe","width":-90.0,"height":4.0}"#).unwrap();
        assert_eq!(
            Message::from(event),
            Message::SwipeEnded(Translation::new(-90.0, 4.0))
        );
    }
}
