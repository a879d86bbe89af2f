// SPDX-License-Identifier: GPL-3.0-only

//! Confetti celebration effect
//!
//! The cannon watches a counter and fires one burst per increment. It does
//! not care about the counter's absolute value, only that it went up. Each
//! burst scatters a fixed number of animal glyphs outward from the center,
//! at most `radius` points away, and fades them out over a fixed duration.

use crate::constants::confetti;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// One glyph of a burst, positioned relative to the burst origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub glyph: &'static str,
    /// Horizontal offset in points (-radius ..= radius)
    pub x: f32,
    /// Vertical offset in points, positive is down (-radius ..= radius)
    pub y: f32,
    /// 1.0 at launch, 0.0 when the burst ends
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy)]
struct Burst {
    started: Instant,
    seed: u64,
}

#[derive(Debug)]
pub struct ConfettiCannon {
    particles_per_burst: usize,
    radius: f32,
    duration: Duration,
    last_counter: u64,
    bursts: Vec<Burst>,
}

impl ConfettiCannon {
    pub fn new(particles_per_burst: usize, radius: f32, duration: Duration) -> Self {
        Self {
            particles_per_burst,
            radius,
            duration,
            last_counter: 0,
            bursts: Vec::new(),
        }
    }

    /// Fire a burst for every increment since the last observation.
    /// Returns the number of bursts fired.
    pub fn observe(&mut self, counter: u64, now: Instant) -> usize {
        if counter <= self.last_counter {
            self.last_counter = counter;
            return 0;
        }

        let fired = (counter - self.last_counter) as usize;
        for n in self.last_counter + 1..=counter {
            self.bursts.push(Burst {
                started: now,
                seed: n,
            });
        }
        self.last_counter = counter;

        debug!(fired, counter, "Confetti burst");
        fired
    }

    /// Particles of all live bursts at `now`; finished bursts are dropped
    pub fn particles(&mut self, now: Instant) -> Vec<Particle> {
        let (duration, radius) = (self.duration, self.radius);
        self.bursts
            .retain(|burst| now.saturating_duration_since(burst.started) < duration);

        let mut particles = Vec::with_capacity(self.bursts.len() * self.particles_per_burst);
        for burst in &self.bursts {
            let progress = now.saturating_duration_since(burst.started).as_secs_f32()
                / duration.as_secs_f32().max(f32::EPSILON);
            particles.extend(
                (0..self.particles_per_burst)
                    .map(|i| burst_particle(burst.seed, i, progress, radius)),
            );
        }
        particles
    }
}

fn burst_particle(seed: u64, index: usize, progress: f32, radius: f32) -> Particle {
    let mut rng = XorShift::new(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ index as u64);

    let angle = rng.next_f32() * std::f32::consts::TAU;
    let speed = 0.35 + rng.next_f32() * 0.65;
    let glyph = confetti::GLYPHS[rng.next_u64() as usize % confetti::GLYPHS.len()];

    // Fast launch that slows down, then gravity pulls glyphs down
    let eased = 1.0 - (1.0 - progress).powi(3);
    let gravity = 0.6 * progress * progress;

    Particle {
        glyph,
        x: (angle.cos() * speed * eased).clamp(-1.0, 1.0) * radius,
        y: (angle.sin() * speed * eased + gravity).clamp(-1.0, 1.0) * radius,
        opacity: (1.0 - progress).clamp(0.0, 1.0),
    }
}

/// Small deterministic generator so bursts look the same on every redraw
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}
