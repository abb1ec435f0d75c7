//! Timed tweens
//!
//! A [`Tween`] is a millisecond clock with an easing policy. It carries no
//! values of its own: callers ask it for eased progress and blend whatever
//! they are animating.
//!
//! # Example
//!
//! ```
//! use flypath_animation::{Easing, Tween};
//!
//! let mut tween = Tween::new(1000.0, Easing::QuadraticIn);
//! tween.tick(500.0);
//! assert!((tween.eased() - 0.25).abs() < 1e-6);
//! ```

use crate::easing::Easing;
use crate::values::Interpolate;

/// Eased progress over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Duration in milliseconds
    duration_ms: f32,
    /// Elapsed time in milliseconds
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a tween; negative or non-finite durations are treated as zero
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advance the clock by `dt_ms`; returns true once complete
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
        self.is_complete()
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Progress after easing
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    /// Discrete step due now (see [`Easing::step_index`])
    pub fn step_index(&self) -> u32 {
        self.easing.step_index(self.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Blend `from` → `to` at the current eased progress
    pub fn sample<T: Interpolate>(&self, from: &T, to: &T) -> T {
        from.lerp(to, self.eased())
    }
}
