//! Scene file handling
//!
//! A scene is a TOML file describing the control points to fly through, how
//! to fit and sample them, how to fly, and where the camera starts:
//!
//! ```toml
//! points = [[-40.0, -30.0, 3.0], [20.0, -35.0, 3.0], [45.0, 10.0, 3.0]]
//!
//! [curve]
//! method = "cubic"
//! clip = "periodic"
//!
//! [flight]
//! look_ahead = 5
//! cruise = "glide"
//!
//! [camera]
//! position = [0.0, 0.0, 240.0]
//! target = [0.0, 0.0, 0.0]
//! ```
//!
//! Every section is optional and falls back to the library defaults.

use anyhow::{Context, Result};
use flypath_core::{CameraPose, Vec3};
use flypath_flight::{CurveConfig, FlightConfig, FlightController, GroundPlane, SamplerConfig, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scene loaded from a `.toml` file
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Scene {
    /// Control points, in placement order
    pub points: Vec<Vec3>,
    pub curve: CurveConfig,
    pub sampler: SamplerConfig,
    pub flight: FlightConfig,
    pub camera: CameraConfig,
    /// Ground used by the `line` command
    pub ground: GroundPlane,
}

/// Starting camera
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 240.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl CameraConfig {
    pub fn pose(&self) -> CameraPose {
        CameraPose::looking_at(self.position, self.target, self.up)
    }
}

impl Scene {
    /// Load a scene file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(content)?;
        scene.curve.validate()?;
        Ok(scene)
    }

    /// Session settings; `clear` returns the camera to the scene's start
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            curve: self.curve,
            sampler: self.sampler,
            flight: self.flight,
            home: Some(self.camera.pose()),
        }
    }

    /// Controller with the scene's points already placed
    pub fn controller(&self) -> FlightController {
        let mut controller = FlightController::new(self.session(), self.camera.pose());
        for point in &self.points {
            controller.place_point(*point);
        }
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flypath_flight::{ClipPolicy, CruiseStyle, FitMethod};

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene = Scene::parse("").unwrap();
        assert!(scene.points.is_empty());
        assert_eq!(scene.curve, CurveConfig::default());
        assert_eq!(scene.flight.look_ahead, 5);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 240.0));
        assert_eq!(scene.ground, GroundPlane::default());
    }

    #[test]
    fn test_parse_scene() {
        let scene = Scene::parse(
            r#"
            points = [[0.0, 0.0, 3.0], [30.0, 0.0, 3.0], [30.0, 30.0, 3.0]]

            [curve]
            method = "linear"
            clip = "clamp"

            [sampler]
            spacing = 2.0

            [flight]
            above = 20.0
            cruise = "glide"
            up = [0.0, 1.0, 0.0]

            [camera]
            position = [0.0, -100.0, 50.0]
            "#,
        )
        .unwrap();

        assert_eq!(scene.points.len(), 3);
        assert_eq!(scene.points[1], Vec3::new(30.0, 0.0, 3.0));
        assert_eq!(scene.curve.method, FitMethod::Linear);
        assert_eq!(scene.curve.clip, ClipPolicy::Clamp);
        assert_eq!(scene.sampler.spacing, 2.0);
        assert_eq!(scene.flight.above, 20.0);
        assert_eq!(scene.flight.look_at_above, 12.0);
        assert_eq!(scene.flight.cruise, CruiseStyle::Glide);
        assert_eq!(scene.flight.up, Vec3::Y);
        assert_eq!(scene.camera.position, Vec3::new(0.0, -100.0, 50.0));
        assert_eq!(scene.camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_rejects_closed_linear() {
        let err = Scene::parse(
            r#"
            [curve]
            method = "linear"
            clip = "periodic"
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_bundled_scenes_parse() {
        let looped = Scene::parse(include_str!("../scenes/loop.toml")).unwrap();
        assert_eq!(looped.points.len(), 5);
        assert_eq!(looped.curve, CurveConfig::catmull_rom_closed());

        let pattern = Scene::parse(include_str!("../scenes/pattern.toml")).unwrap();
        assert_eq!(pattern.curve, CurveConfig::linear());
        assert_eq!(pattern.flight.cruise, CruiseStyle::Glide);
    }

    #[test]
    fn test_controller_places_points() {
        let scene = Scene::parse("points = [[0.0, 0.0, 3.0], [30.0, 0.0, 3.0]]").unwrap();
        let controller = scene.controller();
        assert_eq!(controller.control_points().len(), 2);
        assert!(controller.waypoints().len() > 2);
        assert_eq!(controller.camera(), scene.camera.pose());
    }
}
