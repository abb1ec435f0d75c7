//! Curve fitting
//!
//! Fits a parametric curve `t ↦ point` through an ordered sequence of
//! control points. The curve passes through every input: evaluating at an
//! integer `t = i` returns `points[i]` exactly.
//!
//! Supported methods:
//!
//! - [`FitMethod::Linear`] - straight segments, clamped at both ends
//! - [`FitMethod::Cubic`] - Catmull-Rom style Hermite segments, clamped or closed
//! - [`FitMethod::Polynomial`] - one barycentric Lagrange polynomial through all points
//!
//! # Example
//!
//! ```
//! use flypath_core::Vec3;
//! use flypath_flight::curve::{CurveConfig, CurveFitter};
//!
//! let points = [
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(10.0, 0.0, 0.0),
//!     Vec3::new(10.0, 10.0, 0.0),
//! ];
//! let curve = CurveFitter::new(CurveConfig::catmull_rom_closed()).fit(&points).unwrap();
//! assert_eq!(curve.evaluate(1.0), points[1]);
//! assert_eq!(curve.evaluate(3.0), points[0]);
//! ```

use crate::error::{PathError, Result};
use flypath_core::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tension that yields Catmull-Rom tangents
pub const CATMULL_ROM_TENSION: f32 = 0.0;

/// Most control points a polynomial fit accepts
///
/// Binomial weights `C(n-1, i)` overflow `f64` a little past 1030 nodes.
pub const MAX_POLYNOMIAL_POINTS: usize = 1000;

/// Interpolation method
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    /// Pairwise linear blend between consecutive points
    Linear,
    /// Cubic Hermite segments with tangents from neighbouring points
    #[default]
    Cubic,
    /// Single polynomial through all points (equidistant nodes), at most
    /// [`MAX_POLYNOMIAL_POINTS`] of them
    Polynomial,
}

/// What happens at the ends of the point sequence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipPolicy {
    /// Out-of-range lookups clamp to the first/last point
    #[default]
    Clamp,
    /// Lookups wrap modulo the point count, closing the loop
    Periodic,
}

/// Curve fitting configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub method: FitMethod,
    pub clip: ClipPolicy,
    /// Cubic tangent scale is `(1 - tension) / 2`; 0 is Catmull-Rom, 1 flattens tangents
    pub tension: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::catmull_rom_closed()
    }
}

impl CurveConfig {
    /// Straight segments clamped at the ends
    pub fn linear() -> Self {
        Self {
            method: FitMethod::Linear,
            clip: ClipPolicy::Clamp,
            tension: CATMULL_ROM_TENSION,
        }
    }

    /// Open Catmull-Rom spline
    pub fn catmull_rom() -> Self {
        Self {
            method: FitMethod::Cubic,
            clip: ClipPolicy::Clamp,
            tension: CATMULL_ROM_TENSION,
        }
    }

    /// Closed Catmull-Rom loop
    pub fn catmull_rom_closed() -> Self {
        Self {
            method: FitMethod::Cubic,
            clip: ClipPolicy::Periodic,
            tension: CATMULL_ROM_TENSION,
        }
    }

    /// Lagrange polynomial through all points
    pub fn polynomial() -> Self {
        Self {
            method: FitMethod::Polynomial,
            clip: ClipPolicy::Clamp,
            tension: CATMULL_ROM_TENSION,
        }
    }

    /// Reject method/clip pairs that have no defined behavior
    pub fn validate(&self) -> Result<()> {
        match (self.method, self.clip) {
            (FitMethod::Linear | FitMethod::Polynomial, ClipPolicy::Periodic) => {
                Err(PathError::UnsupportedCombination {
                    method: self.method,
                    clip: self.clip,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Barycentric weights for equidistant nodes: `w_i = (-1)^i · C(n-1, i)`
///
/// Built once per fit and stored with the curve.
#[derive(Clone, Debug, PartialEq)]
pub struct BarycentricWeights(Vec<f64>);

impl BarycentricWeights {
    pub fn new(count: usize) -> Self {
        let n = count.saturating_sub(1);
        let mut weights = Vec::with_capacity(count);
        let mut binomial = 1.0_f64;
        for i in 0..count {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            weights.push(sign * binomial);
            binomial = binomial * (n - i) as f64 / (i + 1) as f64;
        }
        Self(weights)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Fits curves with a fixed configuration
#[derive(Clone, Copy, Debug, Default)]
pub struct CurveFitter {
    config: CurveConfig,
}

impl CurveFitter {
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Fit a curve through `points` (at least two)
    pub fn fit(&self, points: &[Vec3]) -> Result<Curve> {
        if points.len() < 2 {
            return Err(PathError::InsufficientPoints {
                count: points.len(),
            });
        }
        self.config.validate()?;

        let weights = match self.config.method {
            FitMethod::Polynomial if points.len() > MAX_POLYNOMIAL_POINTS => {
                return Err(PathError::TooManyPoints {
                    count: points.len(),
                    max: MAX_POLYNOMIAL_POINTS,
                });
            }
            FitMethod::Polynomial => Some(BarycentricWeights::new(points.len())),
            _ => None,
        };

        debug!(
            points = points.len(),
            method = ?self.config.method,
            clip = ?self.config.clip,
            "Fitted curve"
        );

        Ok(Curve {
            points: points.to_vec(),
            config: self.config,
            weights,
        })
    }
}

/// A fitted parametric curve
///
/// The domain is `[0, N-1]` for clamped curves and `[0, N]` for closed
/// ones, where `t = N` is the start point again.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: Vec<Vec3>,
    config: CurveConfig,
    weights: Option<BarycentricWeights>,
}

impl Curve {
    /// Control points the curve passes through
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.config.clip == ClipPolicy::Periodic
    }

    /// Number of `[i, i+1)` segments, including the closing one of a loop
    pub fn segment_count(&self) -> usize {
        if self.is_closed() {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Parameter range `(start, end)`
    pub fn domain(&self) -> (f32, f32) {
        (0.0, self.segment_count() as f32)
    }

    /// Start and end control point of segment `i`
    pub fn segment_endpoints(&self, segment: usize) -> (Vec3, Vec3) {
        let n = self.points.len();
        (self.points[segment % n], self.points[(segment + 1) % n])
    }

    /// Evaluate the curve at parameter `t`
    ///
    /// Clamped curves clamp `t` into the domain; closed curves wrap it.
    pub fn evaluate(&self, t: f32) -> Vec3 {
        if !t.is_finite() {
            return self.points[0];
        }

        let n = self.points.len();
        let end = self.segment_count() as f32;
        let t = match self.config.clip {
            ClipPolicy::Clamp => t.clamp(0.0, end),
            ClipPolicy::Periodic => {
                let wrapped = t.rem_euclid(end);
                // rem_euclid can round up to `end` for tiny negative inputs
                if wrapped >= end {
                    0.0
                } else {
                    wrapped
                }
            }
        };

        let index = t.floor() as usize;
        let frac = t - index as f32;
        if frac == 0.0 {
            return self.points[index % n];
        }

        match self.config.method {
            FitMethod::Linear => self.linear(index, frac),
            // Two points give degenerate tangents, blend linearly instead
            FitMethod::Cubic if n == 2 => self.linear(index, frac),
            FitMethod::Cubic => self.cubic(index, frac),
            FitMethod::Polynomial => self.polynomial(t),
        }
    }

    /// Control point lookup honoring the clip policy
    fn point(&self, index: isize) -> Vec3 {
        let n = self.points.len() as isize;
        let index = match self.config.clip {
            ClipPolicy::Clamp => index.clamp(0, n - 1),
            ClipPolicy::Periodic => index.rem_euclid(n),
        };
        self.points[index as usize]
    }

    fn linear(&self, index: usize, frac: f32) -> Vec3 {
        let i = index as isize;
        self.point(i).lerp(self.point(i + 1), frac)
    }

    fn cubic(&self, index: usize, frac: f32) -> Vec3 {
        let i = index as isize;
        let p0 = self.point(i - 1);
        let p1 = self.point(i);
        let p2 = self.point(i + 1);
        let p3 = self.point(i + 2);

        let scale = (1.0 - self.config.tension) * 0.5;
        let m1 = (p2 - p0) * scale;
        let m2 = (p3 - p1) * scale;

        let t2 = frac * frac;
        let t3 = t2 * frac;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + frac;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        p1 * h00 + m1 * h10 + p2 * h01 + m2 * h11
    }

    /// Barycentric Lagrange form; `t` is never a node here
    fn polynomial(&self, t: f32) -> Vec3 {
        let Some(weights) = &self.weights else {
            return self.linear(t.floor() as usize, t.fract());
        };

        let t = t as f64;
        let (mut x, mut y, mut z, mut denom) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        for (i, (p, w)) in self.points.iter().zip(weights.as_slice()).enumerate() {
            let s = w / (t - i as f64);
            x += p.x as f64 * s;
            y += p.y as f64 * s;
            z += p.z as f64 * s;
            denom += s;
        }
        Vec3::new((x / denom) as f32, (y / denom) as f32, (z / denom) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ]
    }

    fn fit(points: &[Vec3], config: CurveConfig) -> Curve {
        CurveFitter::new(config).fit(points).unwrap()
    }

    fn assert_close(a: Vec3, b: Vec3, epsilon: f32) {
        assert!(a.distance(b) < epsilon, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rejects_too_few_points() {
        let fitter = CurveFitter::new(CurveConfig::catmull_rom());
        assert_eq!(
            fitter.fit(&[]),
            Err(PathError::InsufficientPoints { count: 0 })
        );
        assert_eq!(
            fitter.fit(&[Vec3::ZERO]),
            Err(PathError::InsufficientPoints { count: 1 })
        );
    }

    #[test]
    fn test_rejects_unsupported_combinations() {
        for method in [FitMethod::Linear, FitMethod::Polynomial] {
            let config = CurveConfig {
                method,
                clip: ClipPolicy::Periodic,
                tension: 0.0,
            };
            assert_eq!(
                CurveFitter::new(config).fit(&square()),
                Err(PathError::UnsupportedCombination {
                    method,
                    clip: ClipPolicy::Periodic
                })
            );
        }
    }

    #[test]
    fn test_linear_blends_and_clamps() {
        let curve = fit(&square(), CurveConfig::linear());

        assert_close(curve.evaluate(0.5), Vec3::new(5.0, 0.0, 0.0), 1e-6);
        assert_close(curve.evaluate(1.25), Vec3::new(10.0, 2.5, 0.0), 1e-6);
        assert_eq!(curve.evaluate(-3.0), square()[0]);
        assert_eq!(curve.evaluate(99.0), square()[3]);
        assert_eq!(curve.domain(), (0.0, 3.0));
    }

    #[test]
    fn test_closed_curve_wraps() {
        let points = square();
        let curve = fit(&points, CurveConfig::catmull_rom_closed());

        assert_eq!(curve.domain(), (0.0, 4.0));
        assert_eq!(curve.evaluate(4.0), points[0]);
        assert_close(curve.evaluate(-0.5), curve.evaluate(3.5), 1e-5);
        assert_close(curve.evaluate(5.25), curve.evaluate(1.25), 1e-5);
    }

    #[test]
    fn test_closed_square_is_symmetric() {
        // Each side bulges outward by the same amount
        let curve = fit(&square(), CurveConfig::catmull_rom_closed());
        let bottom = curve.evaluate(0.5);
        let right = curve.evaluate(1.5);

        assert!((bottom.x - 5.0).abs() < 1e-5);
        assert!(bottom.y < 0.0);
        assert!((right.y - 5.0).abs() < 1e-5);
        assert!((right.x - 10.0 + bottom.y).abs() < 1e-5);
    }

    #[test]
    fn test_cubic_reproduces_uniform_line_in_interior() {
        let points: Vec<Vec3> = (0..6).map(|i| Vec3::new(i as f32 * 2.0, 0.0, 0.0)).collect();
        let curve = fit(&points, CurveConfig::catmull_rom());

        assert_close(curve.evaluate(2.5), Vec3::new(5.0, 0.0, 0.0), 1e-5);
        assert_close(curve.evaluate(3.2), Vec3::new(6.4, 0.0, 0.0), 1e-5);
    }

    #[test]
    fn test_two_point_cubic_is_linear() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(5.0, -2.0, 3.0);

        for config in [CurveConfig::catmull_rom(), CurveConfig::catmull_rom_closed()] {
            let curve = fit(&[a, b], config);
            assert_close(curve.evaluate(0.25), a.lerp(b, 0.25), 1e-6);
        }

        // The closing segment of a two-point loop runs straight back
        let closed = fit(&[a, b], CurveConfig::catmull_rom_closed());
        assert_close(closed.evaluate(1.5), b.lerp(a, 0.5), 1e-6);
    }

    #[test]
    fn test_full_tension_flattens_tangents() {
        let points = square();
        let config = CurveConfig {
            tension: 1.0,
            ..CurveConfig::catmull_rom()
        };
        let curve = fit(&points, config);

        // Zero tangents leave a smoothstep blend along the chord
        let p = curve.evaluate(1.5);
        assert_close(p, Vec3::new(10.0, 5.0, 0.0), 1e-5);
    }

    #[test]
    fn test_polynomial_reproduces_quadratic() {
        let points: Vec<Vec3> = (0..5)
            .map(|i| {
                let x = i as f32;
                Vec3::new(x, x * x, 1.0)
            })
            .collect();
        let curve = fit(&points, CurveConfig::polynomial());

        assert_close(curve.evaluate(1.5), Vec3::new(1.5, 2.25, 1.0), 1e-4);
        assert_close(curve.evaluate(3.75), Vec3::new(3.75, 14.0625, 1.0), 1e-3);
    }

    #[test]
    fn test_barycentric_weights() {
        let weights = BarycentricWeights::new(5);
        assert_eq!(weights.as_slice(), &[1.0, -4.0, 6.0, -4.0, 1.0]);
    }

    #[test]
    fn test_polynomial_point_cap() {
        let row = |count: usize| -> Vec<Vec3> {
            (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
        };
        let fitter = CurveFitter::new(CurveConfig::polynomial());

        assert_eq!(
            fitter.fit(&row(MAX_POLYNOMIAL_POINTS + 1)),
            Err(PathError::TooManyPoints {
                count: MAX_POLYNOMIAL_POINTS + 1,
                max: MAX_POLYNOMIAL_POINTS,
            })
        );

        let curve = fitter.fit(&row(MAX_POLYNOMIAL_POINTS)).unwrap();
        assert!(curve.weights.as_ref().unwrap().as_slice().iter().all(|w| w.is_finite()));

        // Other methods have no cap
        assert!(CurveFitter::new(CurveConfig::linear())
            .fit(&row(MAX_POLYNOMIAL_POINTS + 1))
            .is_ok());
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let curve = fit(&square(), CurveConfig::polynomial());
        let first = curve.evaluate(1.3);
        for _ in 0..10 {
            assert_eq!(curve.evaluate(1.3), first);
        }
    }

    fn config_strategy() -> impl Strategy<Value = CurveConfig> {
        prop_oneof![
            Just(CurveConfig::linear()),
            Just(CurveConfig::catmull_rom()),
            Just(CurveConfig::catmull_rom_closed()),
            Just(CurveConfig::polynomial()),
        ]
    }

    fn points_strategy() -> impl Strategy<Value = Vec<Vec3>> {
        prop::collection::vec(
            (-500.0f32..500.0, -500.0f32..500.0, -50.0f32..50.0)
                .prop_map(|(x, y, z)| Vec3::new(x, y, z)),
            2..12,
        )
    }

    proptest! {
        #[test]
        fn prop_passes_through_every_control_point(
            points in points_strategy(),
            config in config_strategy(),
        ) {
            let curve = fit(&points, config);
            for (i, p) in points.iter().enumerate() {
                prop_assert_eq!(curve.evaluate(i as f32), *p);
            }
        }
    }
}
