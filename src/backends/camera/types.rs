// SPDX-License-Identifier: GPL-3.0-only

//! Filter and frame catalogues shared by camera backends and the UI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter types applied to the preview and to captured photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// No filter applied
    #[default]
    Standard,
    /// Black & white / monochrome filter
    Mono,
    /// Sepia tone filter (warm brownish tint)
    Sepia,
    /// Noir filter (high contrast black & white)
    Noir,
    /// Vivid - boosted saturation and contrast
    Vivid,
    /// Cool - blue color temperature shift
    Cool,
    /// Warm - orange/amber color temperature
    Warm,
    /// Fade - lifted blacks with muted colors
    Fade,
    /// Duotone - two-color gradient mapping
    Duotone,
    /// Vignette - darkened edges
    Vignette,
    /// Negative - inverted colors
    Negative,
    /// Posterize - reduced color levels (pop-art)
    Posterize,
    /// Solarize - partially inverted tones
    Solarize,
}

impl FilterType {
    /// All filters in swipe order
    pub const ALL: [FilterType; 13] = [
        FilterType::Standard,
        FilterType::Mono,
        FilterType::Sepia,
        FilterType::Noir,
        FilterType::Vivid,
        FilterType::Cool,
        FilterType::Warm,
        FilterType::Fade,
        FilterType::Duotone,
        FilterType::Vignette,
        FilterType::Negative,
        FilterType::Posterize,
        FilterType::Solarize,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Standard => "Original",
            FilterType::Mono => "Mono",
            FilterType::Sepia => "Sepia",
            FilterType::Noir => "Noir",
            FilterType::Vivid => "Vivid",
            FilterType::Cool => "Cool",
            FilterType::Warm => "Warm",
            FilterType::Fade => "Fade",
            FilterType::Duotone => "Duotone",
            FilterType::Vignette => "Vignette",
            FilterType::Negative => "Negative",
            FilterType::Posterize => "Posterize",
            FilterType::Solarize => "Solarize",
        }
    }

    /// Next filter, wrapping around at the end
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Previous filter, wrapping around at the start
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Decorative frames drawn as a glyph in each corner of the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameStyle {
    /// No frame
    #[default]
    None,
    Dog,
    Cat,
    Bunny,
    Fox,
    Panda,
    Frog,
    Unicorn,
}

impl FrameStyle {
    /// All frames in swipe order
    pub const ALL: [FrameStyle; 8] = [
        FrameStyle::None,
        FrameStyle::Dog,
        FrameStyle::Cat,
        FrameStyle::Bunny,
        FrameStyle::Fox,
        FrameStyle::Panda,
        FrameStyle::Frog,
        FrameStyle::Unicorn,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FrameStyle::None => "No Frame",
            FrameStyle::Dog => "Dog",
            FrameStyle::Cat => "Cat",
            FrameStyle::Bunny => "Bunny",
            FrameStyle::Fox => "Fox",
            FrameStyle::Panda => "Panda",
            FrameStyle::Frog => "Frog",
            FrameStyle::Unicorn => "Unicorn",
        }
    }

    /// Corner glyph, or `None` for the empty frame
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            FrameStyle::None => None,
            FrameStyle::Dog => Some("🐶"),
            FrameStyle::Cat => Some("🐱"),
            FrameStyle::Bunny => Some("🐰"),
            FrameStyle::Fox => Some("🦊"),
            FrameStyle::Panda => Some("🐼"),
            FrameStyle::Frog => Some("🐸"),
            FrameStyle::Unicorn => Some("🦄"),
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|item| *item == current).unwrap_or(0) as isize;
    all[(index + step).rem_euclid(len) as usize]
}
