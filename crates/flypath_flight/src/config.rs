//! Flight configuration
//!
//! Every field has a default matching the flythrough demos, and every
//! struct deserializes with `#[serde(default)]` so scene files only need to
//! spell out what they change.

use crate::curve::CurveConfig;
use crate::sampler::SamplerConfig;
use flypath_core::{CameraPose, Vec3};
use serde::{Deserialize, Serialize};

/// How the camera moves between cruise stops
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CruiseStyle {
    /// Jump from stop to stop on each step boundary
    #[default]
    Stepped,
    /// Glide linearly between consecutive stops
    Glide,
}

/// Camera flight parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Waypoints between the camera and the point it faces
    pub look_ahead: usize,
    /// Camera height above the path, along `up`
    pub above: f32,
    /// Height of the look-at target above the path, along `up`
    pub look_at_above: f32,
    /// Time spent on each cruise stop (ms)
    pub step_ms: f32,
    /// Duration of the move onto / off the path (ms)
    pub approach_ms: f32,
    /// Duration of the turn toward / away from the path (ms)
    pub turn_ms: f32,
    /// World up axis for the camera during the flight
    pub up: Vec3,
    pub cruise: CruiseStyle,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            look_ahead: 5,
            above: 15.0,
            look_at_above: 12.0,
            step_ms: 30.0,
            approach_ms: 1000.0,
            turn_ms: 1000.0,
            up: Vec3::Z,
            cruise: CruiseStyle::Stepped,
        }
    }
}

/// Everything a [`FlightController`](crate::controller::FlightController) needs
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub curve: CurveConfig,
    pub sampler: SamplerConfig,
    pub flight: FlightConfig,
    /// Pose the camera returns to on `clear`; `None` leaves it where it is
    pub home: Option<CameraPose>,
}
