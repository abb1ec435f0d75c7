//! Flypath Flight
//!
//! Path-guided camera flythroughs: fit a curve through a handful of control
//! points, resample it into evenly spaced waypoints, then fly a camera along
//! them with look-ahead orientation and eased entry and exit.
//!
//! # Pipeline
//!
//! - [`CurveFitter`] - linear, Catmull-Rom or polynomial curve through the points
//! - [`PathSampler`] - distance-adaptive waypoints along the curve
//! - [`FlightPlanner`] - approach, cruise and departure phases
//! - [`FlightRunner`] - tick-driven playback, one flight at a time
//! - [`FlightController`] - owns all of the above plus the camera
//!
//! Guide paths in [`guide`] produce waypoints without a user-drawn curve.

pub mod config;
pub mod controller;
pub mod curve;
pub mod error;
pub mod guide;
pub mod look_ahead;
pub mod planner;
pub mod runner;
pub mod sampler;

pub use config::{CruiseStyle, FlightConfig, SessionConfig};
pub use controller::FlightController;
pub use curve::{ClipPolicy, Curve, CurveConfig, CurveFitter, FitMethod};
pub use error::{PathError, Result};
pub use guide::{GroundPlane, SeparatingLine};
pub use look_ahead::{look_ahead, Orientation};
pub use planner::{FlightPhase, FlightPlan, FlightPlanner, PhaseKind};
pub use runner::{FlightRunner, FlightState, RunnerStatus, TickOutcome};
pub use sampler::{DegeneratePolicy, PathSampler, SamplerConfig, Waypoint};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{CruiseStyle, FlightConfig, SessionConfig};
    pub use crate::controller::FlightController;
    pub use crate::curve::{ClipPolicy, CurveConfig, CurveFitter, FitMethod};
    pub use crate::error::{PathError, Result};
    pub use crate::runner::{RunnerStatus, TickOutcome};
    pub use crate::sampler::{PathSampler, SamplerConfig, Waypoint};
    pub use flypath_core::{CameraPose, Quat, Vec3};
}
