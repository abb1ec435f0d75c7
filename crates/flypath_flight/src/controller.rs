//! Flight controller
//!
//! Owns everything a flythrough needs: the user's control points, the
//! fitted curve and its waypoints, the camera pose, and the runner. Input
//! handlers talk to this type only. Every mutating request returns whether
//! it was accepted; while a flight is running all of them are refused.
//!
//! # Example
//!
//! ```
//! use flypath_core::{CameraPose, Vec3};
//! use flypath_flight::{FlightController, SessionConfig, TickOutcome};
//!
//! let camera = CameraPose::looking_at(Vec3::new(0.0, 0.0, 240.0), Vec3::ZERO, Vec3::Y);
//! let mut controller = FlightController::new(SessionConfig::default(), camera);
//!
//! for point in [[0.0, 0.0], [30.0, 0.0], [30.0, 30.0], [0.0, 30.0]] {
//!     controller.place_point(Vec3::new(point[0], point[1], 3.0));
//! }
//! assert!(controller.request_flight());
//!
//! while controller.tick(16.0) != TickOutcome::Finished {}
//! assert_eq!(controller.camera(), camera);
//! ```

use crate::config::SessionConfig;
use crate::curve::{Curve, CurveFitter};
use crate::planner::FlightPlanner;
use crate::runner::{FlightRunner, FlightState, RunnerStatus, TickOutcome};
use crate::sampler::{PathSampler, Waypoint};
use flypath_core::{CameraPose, Vec3};
use tracing::{debug, warn};

/// Single entry point for placing points and flying the camera
#[derive(Clone, Debug)]
pub struct FlightController {
    config: SessionConfig,
    fitter: CurveFitter,
    sampler: PathSampler,
    planner: FlightPlanner,
    runner: FlightRunner,
    points: Vec<Vec3>,
    curve: Option<Curve>,
    waypoints: Vec<Waypoint>,
    camera: CameraPose,
}

impl FlightController {
    pub fn new(config: SessionConfig, camera: CameraPose) -> Self {
        Self {
            fitter: CurveFitter::new(config.curve),
            sampler: PathSampler::new(config.sampler),
            planner: FlightPlanner::new(config.flight),
            config,
            runner: FlightRunner::new(),
            points: Vec::new(),
            curve: None,
            waypoints: Vec::new(),
            camera,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Fitted curve, when there are enough points and the fit succeeded
    pub fn curve(&self) -> Option<&Curve> {
        self.curve.as_ref()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn is_animating(&self) -> bool {
        self.runner.is_animating()
    }

    pub fn state(&self) -> &FlightState {
        self.runner.state()
    }

    pub fn status(&self) -> RunnerStatus {
        self.runner.status()
    }

    /// Append a control point and rebuild the path
    pub fn place_point(&mut self, point: Vec3) -> bool {
        if self.is_animating() {
            debug!("Flight in progress, point ignored");
            return false;
        }
        self.points.push(point);
        self.rebuild_path();
        true
    }

    /// Drop all points and waypoints
    ///
    /// The camera goes back to the configured home pose, if there is one.
    pub fn clear(&mut self) -> bool {
        if self.is_animating() {
            debug!("Flight in progress, clear ignored");
            return false;
        }
        self.points.clear();
        self.curve = None;
        self.waypoints.clear();
        if let Some(home) = self.config.home {
            self.camera = home;
        }
        true
    }

    /// Replace the path with externally produced waypoints
    ///
    /// Control points and the fitted curve are dropped since they no longer
    /// describe the path.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) -> bool {
        if self.is_animating() {
            debug!("Flight in progress, waypoints ignored");
            return false;
        }
        self.points.clear();
        self.curve = None;
        self.waypoints = waypoints;
        true
    }

    /// Move the camera directly (e.g. user orbit controls)
    pub fn set_camera(&mut self, camera: CameraPose) -> bool {
        if self.is_animating() {
            return false;
        }
        self.camera = camera;
        true
    }

    /// Start a flight along the current waypoints
    pub fn request_flight(&mut self) -> bool {
        if self.is_animating() {
            debug!("Flight in progress, request ignored");
            return false;
        }
        match self.planner.plan(&self.waypoints, &self.camera) {
            Some(plan) => self.runner.start(plan),
            None => {
                debug!(waypoints = self.waypoints.len(), "Not enough waypoints to fly");
                false
            }
        }
    }

    /// Advance the active flight, if any
    pub fn tick(&mut self, dt_ms: f32) -> TickOutcome {
        self.runner.tick(dt_ms, &mut self.camera)
    }

    fn rebuild_path(&mut self) {
        self.curve = None;
        self.waypoints.clear();
        if self.points.len() < 2 {
            return;
        }

        let built = self
            .fitter
            .fit(&self.points)
            .and_then(|curve| self.sampler.sample(&curve).map(|waypoints| (curve, waypoints)));
        match built {
            Ok((curve, waypoints)) => {
                debug!(points = self.points.len(), waypoints = waypoints.len(), "Path rebuilt");
                self.curve = Some(curve);
                self.waypoints = waypoints;
            }
            Err(err) => warn!(points = self.points.len(), "Failed to build path: {}", err),
        }
    }
}
