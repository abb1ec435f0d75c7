//! Path sampling
//!
//! Resamples a fitted [`Curve`] into dense waypoints. The parameter step of
//! each segment is `spacing / segment_length`, so short segments get finer
//! parameter steps and waypoints end up roughly `spacing` world units apart
//! regardless of how far apart the control points were placed.

use crate::curve::Curve;
use crate::error::{PathError, Result};
use flypath_core::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Upper bound on waypoints emitted for one segment
///
/// Segments longer than `spacing * MAX_SAMPLES_PER_SEGMENT` are sampled more
/// coarsely instead of being rejected.
pub const MAX_SAMPLES_PER_SEGMENT: u32 = 10_000;

/// A resampled point on a curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Curve parameter the point was sampled at
    pub t: f32,
    /// World position
    pub position: Vec3,
}

impl Waypoint {
    pub fn new(t: f32, position: Vec3) -> Self {
        Self { t, position }
    }
}

/// Handling of segments whose step cannot be computed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Abort sampling with [`PathError::InvalidStepSize`]
    Fail,
    /// Drop the segment and keep sampling the rest
    #[default]
    Skip,
}

/// Sampler configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Target world-space distance between waypoints
    pub spacing: f32,
    pub degenerate: DegeneratePolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            spacing: 3.0,
            degenerate: DegeneratePolicy::Skip,
        }
    }
}

/// Walks a curve and emits waypoints
#[derive(Clone, Copy, Debug, Default)]
pub struct PathSampler {
    config: SamplerConfig,
}

impl PathSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Parameter step for a segment of the given world length
    ///
    /// Zero-length segments and unusable spacings are errors. Steps finer
    /// than `1 / MAX_SAMPLES_PER_SEGMENT` are coarsened to that bound.
    pub fn segment_step(&self, segment: usize, length: f32) -> Result<f32> {
        let delta = self.config.spacing / length;
        if !delta.is_finite() || delta <= 0.0 {
            return Err(PathError::InvalidStepSize { segment, delta });
        }
        Ok(delta.max(1.0 / MAX_SAMPLES_PER_SEGMENT as f32))
    }

    /// Resample `curve` with a distance-adaptive step
    ///
    /// Waypoints come out in strictly increasing `t`. The last waypoint is
    /// the curve's end: the final control point of an open curve, or the
    /// first one again for a closed loop.
    pub fn sample(&self, curve: &Curve) -> Result<Vec<Waypoint>> {
        let mut waypoints = Vec::new();
        let mut skipped = 0usize;

        for segment in 0..curve.segment_count() {
            let (start, end) = curve.segment_endpoints(segment);
            let delta = match self.segment_step(segment, start.distance(end)) {
                Ok(delta) => delta,
                Err(err) => match self.config.degenerate {
                    DegeneratePolicy::Fail => return Err(err),
                    DegeneratePolicy::Skip => {
                        warn!(segment, %err, "Skipping degenerate segment");
                        skipped += 1;
                        continue;
                    }
                },
            };

            let base = segment as f32;
            let limit = base + 1.0;
            let mut k = 0u32;
            loop {
                let t = base + k as f32 * delta;
                if t >= limit {
                    break;
                }
                push_increasing(&mut waypoints, Waypoint::new(t, curve.evaluate(t)));
                k += 1;
            }
        }

        let (_, end) = curve.domain();
        push_increasing(&mut waypoints, Waypoint::new(end, curve.evaluate(end)));

        debug!(
            segments = curve.segment_count(),
            skipped,
            waypoints = waypoints.len(),
            "Sampled path"
        );
        Ok(waypoints)
    }

    /// Resample `curve` with a fixed parameter step over its whole domain
    pub fn sample_uniform(&self, curve: &Curve, step: f32) -> Result<Vec<Waypoint>> {
        let (start, end) = curve.domain();
        let budget = MAX_SAMPLES_PER_SEGMENT as f32 * curve.segment_count() as f32;
        if !step.is_finite() || step <= 0.0 || (end - start) / step > budget {
            return Err(PathError::InvalidStepSize {
                segment: 0,
                delta: step,
            });
        }

        let mut waypoints = Vec::new();
        let mut k = 0u32;
        loop {
            let t = start + k as f32 * step;
            if t >= end {
                break;
            }
            push_increasing(&mut waypoints, Waypoint::new(t, curve.evaluate(t)));
            k += 1;
        }
        push_increasing(&mut waypoints, Waypoint::new(end, curve.evaluate(end)));
        Ok(waypoints)
    }
}

/// Append unless float rounding produced a non-increasing parameter
fn push_increasing(waypoints: &mut Vec<Waypoint>, waypoint: Waypoint) {
    if waypoints.last().map_or(true, |last| waypoint.t > last.t) {
        waypoints.push(waypoint);
    }
}
