// SPDX-License-Identifier: GPL-3.0-only

//! CPU filter implementations for synthetic captures
//!
//! Filters operate on normalized RGB values in place. Position-dependent
//! filters (vignette) receive the pixel coordinates and image size.

use crate::backends::camera::FilterType;
use image::RgbImage;

/// Apply a filter to every pixel of an RGB image
pub fn apply_filter(image: &mut RgbImage, filter: FilterType) {
    if filter == FilterType::Standard {
        return;
    }

    let (width, height) = image.dimensions();
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let mut r = pixel[0] as f32 / 255.0;
        let mut g = pixel[1] as f32 / 255.0;
        let mut b = pixel[2] as f32 / 255.0;

        apply_filter_rgb(
            &mut r,
            &mut g,
            &mut b,
            filter,
            x as usize,
            y as usize,
            width as usize,
            height as usize,
        );

        pixel[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Apply filter effect to RGB values in-place
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn apply_filter_rgb(
    r: &mut f32,
    g: &mut f32,
    b: &mut f32,
    filter: FilterType,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) {
    match filter {
        FilterType::Standard => {}

        FilterType::Mono => {
            let gray = luminance(*r, *g, *b);
            *r = gray;
            *g = gray;
            *b = gray;
        }

        FilterType::Sepia => {
            let lum = luminance(*r, *g, *b);
            *r = (lum * 1.2 + 0.1).clamp(0.0, 1.0);
            *g = (lum * 0.9 + 0.05).clamp(0.0, 1.0);
            *b = (lum * 0.7).clamp(0.0, 1.0);
        }

        FilterType::Noir => {
            let lum = luminance(*r, *g, *b);
            let adjusted = ((lum - 0.5) * 2.0 + 0.5).clamp(0.0, 1.0);
            *r = adjusted;
            *g = adjusted;
            *b = adjusted;
        }

        FilterType::Vivid => {
            let lum = luminance(*r, *g, *b);
            for channel in [&mut *r, &mut *g, &mut *b] {
                let saturated = (lum + (*channel - lum) * 1.4).clamp(0.0, 1.0);
                *channel = ((saturated - 0.5) * 1.15 + 0.5).clamp(0.0, 1.0);
            }
        }

        FilterType::Cool => {
            *r = (*r * 0.9).clamp(0.0, 1.0);
            *g = (*g * 0.95).clamp(0.0, 1.0);
            *b = (*b * 1.1).clamp(0.0, 1.0);
        }

        FilterType::Warm => {
            *r = (*r * 1.1).clamp(0.0, 1.0);
            *b = (*b * 0.85).clamp(0.0, 1.0);
        }

        FilterType::Fade => {
            for channel in [&mut *r, &mut *g, &mut *b] {
                *channel = (*channel * 0.85 + 0.1).clamp(0.0, 1.0);
            }
            let lum = luminance(*r, *g, *b);
            for channel in [&mut *r, &mut *g, &mut *b] {
                *channel = (lum + (*channel - lum) * 0.7).clamp(0.0, 1.0);
            }
        }

        FilterType::Duotone => {
            let lum = luminance(*r, *g, *b);
            let dark = (0.1, 0.1, 0.4);
            let light = (1.0, 0.9, 0.5);
            *r = dark.0 + lum * (light.0 - dark.0);
            *g = dark.1 + lum * (light.1 - dark.1);
            *b = dark.2 + lum * (light.2 - dark.2);
        }

        FilterType::Vignette => {
            let dx = x as f32 / width.max(1) as f32 - 0.5;
            let dy = y as f32 / height.max(1) as f32 - 0.5;
            let dist = (dx * dx + dy * dy).sqrt();
            let vignette = 1.0 - smoothstep(0.3, 0.9, dist);
            *r *= vignette;
            *g *= vignette;
            *b *= vignette;
        }

        FilterType::Negative => {
            *r = 1.0 - *r;
            *g = 1.0 - *g;
            *b = 1.0 - *b;
        }

        FilterType::Posterize => {
            let levels = 4.0;
            *r = (*r * levels).floor() / levels;
            *g = (*g * levels).floor() / levels;
            *b = (*b * levels).floor() / levels;
        }

        FilterType::Solarize => {
            for channel in [&mut *r, &mut *g, &mut *b] {
                if *channel > 0.5 {
                    *channel = 1.0 - *channel;
                }
            }
        }
    }
}

/// Representative tint of a filter, used to color the terminal preview
pub fn preview_tint(filter: FilterType) -> (u8, u8, u8) {
    let (mut r, mut g, mut b) = (0.55, 0.65, 0.8);
    apply_filter_rgb(&mut r, &mut g, &mut b, filter, 0, 0, 1, 1);
    (
        (r.clamp(0.0, 1.0) * 255.0) as u8,
        (g.clamp(0.0, 1.0) * 255.0) as u8,
        (b.clamp(0.0, 1.0) * 255.0) as u8,
    )
}
