//! Guide paths
//!
//! Waypoint sources that do not come from user-placed control points: the
//! separating line of a two-class linear classifier plotted across the
//! ground plane, and a polyline sampled at a fixed parameter step.

use crate::curve::{CurveConfig, CurveFitter};
use crate::error::{PathError, Result};
use crate::sampler::{PathSampler, Waypoint, MAX_SAMPLES_PER_SEGMENT};
use flypath_core::Vec3;
use serde::{Deserialize, Serialize};

/// Rectangular ground centred on the world origin
///
/// Plot space has its origin at the ground's corner with `x` in
/// `[0, width)` and `y` in `[0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    pub width: f32,
    pub height: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 120.0,
        }
    }
}

impl GroundPlane {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Plot coordinates to a world point at `elevation`
    pub fn to_world(&self, plot_x: f32, plot_y: f32, elevation: f32) -> Vec3 {
        Vec3::new(plot_x - self.width / 2.0, plot_y - self.height / 2.0, elevation)
    }

    /// World point to plot coordinates
    pub fn to_plot(&self, world: Vec3) -> (f32, f32) {
        (world.x + self.width / 2.0, world.y + self.height / 2.0)
    }
}

/// Decision boundary `w0·x + w1·y + b = 0` reported by a linear classifier
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeparatingLine {
    pub w: [f32; 2],
    pub b: f32,
}

impl SeparatingLine {
    pub fn new(w: [f32; 2], b: f32) -> Self {
        Self { w, b }
    }

    /// `y` on the line at plot `x`
    pub fn plot_y(&self, x: f32) -> Result<f32> {
        let [w0, w1] = self.w;
        if w1 == 0.0 || !w1.is_finite() || !w0.is_finite() || !self.b.is_finite() {
            return Err(PathError::DegenerateLine);
        }
        Ok(-(w0 / w1) * x - self.b / w1)
    }

    /// Waypoints every `step` plot units across the ground's width
    ///
    /// The line may leave the ground vertically; points are emitted anyway.
    pub fn waypoints(&self, ground: &GroundPlane, step: f32, elevation: f32) -> Result<Vec<Waypoint>> {
        let count = ground.width / step;
        if !count.is_finite() || step <= 0.0 || count > MAX_SAMPLES_PER_SEGMENT as f32 {
            return Err(PathError::InvalidStepSize {
                segment: 0,
                delta: step,
            });
        }

        let mut waypoints = Vec::new();
        let mut k = 0u32;
        loop {
            let x = k as f32 * step;
            if x >= ground.width {
                break;
            }
            let y = self.plot_y(x)?;
            waypoints.push(Waypoint::new(x, ground.to_world(x, y, elevation)));
            k += 1;
        }
        Ok(waypoints)
    }
}

/// Straight-line path through `points`, sampled every `step` in parameter
pub fn polyline(points: &[Vec3], step: f32) -> Result<Vec<Waypoint>> {
    let curve = CurveFitter::new(CurveConfig::linear()).fit(points)?;
    PathSampler::default().sample_uniform(&curve, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_round_trip() {
        let ground = GroundPlane::default();
        let world = ground.to_world(80.0, 60.0, 3.0);
        assert_eq!(world, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(ground.to_plot(world), (80.0, 60.0));
    }

    #[test]
    fn test_plot_y() {
        // x + y - 100 = 0
        let line = SeparatingLine::new([1.0, 1.0], -100.0);
        assert_eq!(line.plot_y(0.0).unwrap(), 100.0);
        assert_eq!(line.plot_y(40.0).unwrap(), 60.0);
    }

    #[test]
    fn test_vertical_line_is_degenerate() {
        let line = SeparatingLine::new([1.0, 0.0], -80.0);
        assert_eq!(line.plot_y(10.0), Err(PathError::DegenerateLine));
        assert_eq!(
            line.waypoints(&GroundPlane::default(), 2.0, 3.0),
            Err(PathError::DegenerateLine)
        );
    }

    #[test]
    fn test_line_waypoints_cross_ground() {
        let ground = GroundPlane::default();
        let line = SeparatingLine::new([0.0, 2.0], -120.0);
        let waypoints = line.waypoints(&ground, 2.0, 3.0).unwrap();

        assert_eq!(waypoints.len(), 80);
        assert_eq!(waypoints[0].position, Vec3::new(-80.0, 0.0, 3.0));
        assert_eq!(waypoints[79].position, Vec3::new(78.0, 0.0, 3.0));
        assert!(waypoints.windows(2).all(|pair| pair[1].t > pair[0].t));
    }

    #[test]
    fn test_bad_step() {
        let line = SeparatingLine::new([1.0, 1.0], 0.0);
        let ground = GroundPlane::default();
        assert!(matches!(
            line.waypoints(&ground, 0.0, 3.0),
            Err(PathError::InvalidStepSize { .. })
        ));
        assert!(line.waypoints(&ground, f32::NAN, 3.0).is_err());
    }

    #[test]
    fn test_polyline_uniform_steps() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let waypoints = polyline(&points, 0.1).unwrap();

        assert_eq!(waypoints.first().unwrap().position, points[0]);
        assert_eq!(waypoints.last().unwrap().position, points[3]);
        assert!((waypoints[5].position.x - 5.0).abs() < 1e-4);
        assert!(waypoints.len() >= 30);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(matches!(
            polyline(&[Vec3::ZERO], 0.1),
            Err(PathError::InsufficientPoints { count: 1 })
        ));
    }
}
