//! Easing functions
//!
//! Maps linear progress `t` in `[0, 1]` to eased progress.

use serde::{Deserialize, Serialize};

/// Easing policy for a timed transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, accelerates (`t²`)
    QuadraticIn,
    /// Starts fast, decelerates (`t·(2 − t)`)
    QuadraticOut,
    /// Floor-quantized into `steps` discrete jumps
    Stepped { steps: u32 },
}

impl Easing {
    /// Apply the easing to linear progress; input is clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::Stepped { steps } => {
                if steps == 0 || t >= 1.0 {
                    return 1.0;
                }
                let steps = steps as f32;
                (t * steps).floor() / steps
            }
        }
    }

    /// Index of the discrete step due at linear progress `t`
    ///
    /// Computed in integers so `floor(k·n)/n·n` rounding can never land one
    /// step short. Non-stepped easings report 0 until complete, then 1.
    pub fn step_index(&self, t: f32) -> u32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Stepped { steps } => ((t * steps as f32).floor() as u32).min(steps),
            _ => u32::from(t >= 1.0),
        }
    }
}
