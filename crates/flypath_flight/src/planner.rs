//! Flight planning
//!
//! Turns a sampled path and the camera's current pose into the ordered list
//! of phases a [`FlightRunner`](crate::runner::FlightRunner) plays back:
//!
//! 1. approach move: ease onto the path start, rotation held
//! 2. approach turn: rotate to face the look-ahead target
//! 3. cruise: step through the path stops
//! 4. departure turn: rotate back to the saved orientation
//! 5. departure move: ease back to the saved position

use crate::config::{CruiseStyle, FlightConfig};
use crate::look_ahead::look_ahead;
use crate::sampler::Waypoint;
use flypath_animation::Easing;
use flypath_core::CameraPose;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stage of a flight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    ApproachIn,
    Cruise,
    DepartureOut,
}

/// One timed transition of the camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightPhase {
    pub kind: PhaseKind,
    /// Pose at progress 0
    pub start: CameraPose,
    /// Pose at progress 1
    pub end: CameraPose,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl FlightPhase {
    fn new(kind: PhaseKind, start: CameraPose, end: CameraPose, duration_ms: f32, easing: Easing) -> Self {
        Self {
            kind,
            start,
            end,
            duration_ms,
            easing,
        }
    }
}

/// A complete flight, ready to run
#[derive(Clone, Debug, PartialEq)]
pub struct FlightPlan {
    phases: Vec<FlightPhase>,
    /// Cruise poses, one per step index `0..=steps`
    stops: Vec<CameraPose>,
    saved: CameraPose,
    cruise: CruiseStyle,
}

impl FlightPlan {
    pub fn phases(&self) -> &[FlightPhase] {
        &self.phases
    }

    pub fn stops(&self) -> &[CameraPose] {
        &self.stops
    }

    /// Camera pose the flight returns to
    pub fn saved(&self) -> CameraPose {
        self.saved
    }

    pub fn cruise_style(&self) -> CruiseStyle {
        self.cruise
    }

    /// Number of cruise steps (stops minus one)
    pub fn cruise_steps(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Sum of all phase durations (ms)
    pub fn total_duration_ms(&self) -> f32 {
        self.phases.iter().map(|phase| phase.duration_ms).sum()
    }
}

/// Number of cruise steps for a path of `len` waypoints
///
/// The camera stops short of the end by the look-ahead offset so its target
/// stays on the path, but never past the last waypoint. Paths no longer than
/// the offset are flown end to end.
pub fn cruise_steps(len: usize, offset: usize) -> usize {
    if len > offset {
        (len - offset).min(len - 1)
    } else {
        len.saturating_sub(1)
    }
}

/// Builds [`FlightPlan`]s from waypoints
#[derive(Clone, Copy, Debug, Default)]
pub struct FlightPlanner {
    config: FlightConfig,
}

impl FlightPlanner {
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Camera pose at cruise step `index`
    pub fn stop(&self, waypoints: &[Waypoint], index: usize) -> Option<CameraPose> {
        let config = &self.config;
        let orientation = look_ahead(waypoints, index, config.look_ahead, config.look_at_above, config.up)?;
        let eye = waypoints.get(index)?.position + orientation.up * config.above;
        Some(CameraPose::new(eye, orientation.rotation_from(eye)))
    }

    /// Plan a flight along `waypoints` starting from `camera`
    ///
    /// Returns `None` when there are fewer than two waypoints.
    pub fn plan(&self, waypoints: &[Waypoint], camera: &CameraPose) -> Option<FlightPlan> {
        if waypoints.len() < 2 {
            return None;
        }
        let config = &self.config;
        let steps = cruise_steps(waypoints.len(), config.look_ahead);
        let stops = (0..=steps)
            .map(|index| self.stop(waypoints, index))
            .collect::<Option<Vec<_>>>()?;

        let saved = *camera;
        let first = stops[0];
        let last = stops[steps];

        // Approach: move with the current rotation, then turn onto the path
        let arrived = saved.with_position(first.position);
        let approach_move = FlightPhase::new(
            PhaseKind::ApproachIn,
            saved,
            arrived,
            config.approach_ms,
            Easing::QuadraticIn,
        );
        let approach_turn = FlightPhase::new(PhaseKind::ApproachIn, arrived, first, config.turn_ms, Easing::Linear);

        let cruise_easing = match config.cruise {
            CruiseStyle::Stepped => Easing::Stepped { steps: steps as u32 },
            CruiseStyle::Glide => Easing::Linear,
        };
        let cruise = FlightPhase::new(
            PhaseKind::Cruise,
            first,
            last,
            steps as f32 * config.step_ms,
            cruise_easing,
        );

        // Departure: turn back in place, then move home
        let turned = last.with_rotation(saved.rotation);
        let departure_turn = FlightPhase::new(PhaseKind::DepartureOut, last, turned, config.turn_ms, Easing::Linear);
        let departure_move = FlightPhase::new(
            PhaseKind::DepartureOut,
            turned,
            saved,
            config.approach_ms,
            Easing::QuadraticOut,
        );

        let plan = FlightPlan {
            phases: vec![approach_move, approach_turn, cruise, departure_turn, departure_move],
            stops,
            saved,
            cruise: config.cruise,
        };
        debug!(
            waypoints = waypoints.len(),
            steps,
            duration_ms = plan.total_duration_ms(),
            "Planned flight"
        );
        Some(plan)
    }
}
