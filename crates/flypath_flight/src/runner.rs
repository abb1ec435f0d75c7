//! Flight playback
//!
//! [`FlightRunner`] plays a [`FlightPlan`] one phase at a time, driven by
//! frame ticks. Only one flight runs at once; a second `start` while a
//! flight is in progress is refused without touching any state.

use crate::config::CruiseStyle;
use crate::planner::{FlightPhase, FlightPlan, PhaseKind};
use flypath_animation::{Interpolate, Tween};
use flypath_core::CameraPose;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Externally visible stage of the runner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerStatus {
    #[default]
    Idle,
    ApproachIn,
    Cruise,
    DepartureOut,
}

impl From<PhaseKind> for RunnerStatus {
    fn from(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::ApproachIn => RunnerStatus::ApproachIn,
            PhaseKind::Cruise => RunnerStatus::Cruise,
            PhaseKind::DepartureOut => RunnerStatus::DepartureOut,
        }
    }
}

/// Result of a single tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No flight in progress
    Idle,
    /// A phase of this kind moved the camera
    Animating(PhaseKind),
    /// The flight ended on this tick and the camera is back home
    Finished,
}

/// Bookkeeping for the active flight
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightState {
    animating: bool,
    phase_index: usize,
    saved_pose: Option<CameraPose>,
}

impl FlightState {
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Index of the phase being played
    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Pose captured when the flight started
    pub fn saved_pose(&self) -> Option<CameraPose> {
        self.saved_pose
    }
}

/// Sequential phase player
#[derive(Clone, Debug, Default)]
pub struct FlightRunner {
    state: FlightState,
    plan: Option<FlightPlan>,
    /// Clock of the current phase
    clock: Option<Tween>,
    /// Last cruise stop reached
    cruise_index: usize,
}

impl FlightRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    pub fn status(&self) -> RunnerStatus {
        self.current_phase()
            .map(|phase| RunnerStatus::from(phase.kind))
            .unwrap_or_default()
    }

    /// Phase being played, if any
    pub fn current_phase(&self) -> Option<&FlightPhase> {
        self.plan
            .as_ref()
            .and_then(|plan| plan.phases().get(self.state.phase_index))
    }

    pub fn cruise_index(&self) -> usize {
        self.cruise_index
    }

    /// Begin a flight
    ///
    /// Returns false, leaving everything untouched, if a flight is already
    /// running or the plan has no phases.
    pub fn start(&mut self, plan: FlightPlan) -> bool {
        if self.state.animating {
            debug!(phase = self.state.phase_index, "Flight already running, start ignored");
            return false;
        }
        let Some(first) = plan.phases().first() else {
            return false;
        };

        info!(
            phases = plan.phases().len(),
            steps = plan.cruise_steps(),
            duration_ms = plan.total_duration_ms(),
            "Flight started"
        );
        self.clock = Some(Tween::new(first.duration_ms, first.easing));
        self.cruise_index = 0;
        self.state = FlightState {
            animating: true,
            phase_index: 0,
            saved_pose: Some(plan.saved()),
        };
        self.plan = Some(plan);
        true
    }

    /// Advance the flight by `dt_ms` and write the resulting pose to `camera`
    pub fn tick(&mut self, dt_ms: f32, camera: &mut CameraPose) -> TickOutcome {
        let (Some(plan), Some(clock)) = (self.plan.as_ref(), self.clock.as_mut()) else {
            return TickOutcome::Idle;
        };
        let Some(phase) = plan.phases().get(self.state.phase_index).copied() else {
            return TickOutcome::Idle;
        };

        clock.tick(dt_ms);
        let done = match phase.kind {
            PhaseKind::Cruise => {
                self.cruise_index = advance_cruise(plan, clock, self.cruise_index);
                if let Some(pose) = cruise_pose(plan, clock, self.cruise_index) {
                    *camera = pose;
                }
                clock.is_complete() && self.cruise_index >= plan.cruise_steps()
            }
            _ => {
                *camera = clock.sample(&phase.start, &phase.end);
                clock.is_complete()
            }
        };
        if !done {
            return TickOutcome::Animating(phase.kind);
        }

        *camera = phase.end;
        let next_index = self.state.phase_index + 1;
        let next = plan.phases().get(next_index).copied();
        let saved = plan.saved();
        match next {
            Some(next) => {
                debug!(from = ?phase.kind, to = ?next.kind, phase = next_index, "Phase complete");
                *clock = Tween::new(next.duration_ms, next.easing);
                self.state.phase_index = next_index;
                TickOutcome::Animating(phase.kind)
            }
            None => {
                *camera = saved;
                info!("Flight finished");
                self.plan = None;
                self.clock = None;
                self.cruise_index = 0;
                self.state = FlightState::default();
                TickOutcome::Finished
            }
        }
    }
}

/// Move at most one stop toward the stop due at the clock's current time
fn advance_cruise(plan: &FlightPlan, clock: &Tween, index: usize) -> usize {
    let steps = plan.cruise_steps();
    let due = match plan.cruise_style() {
        CruiseStyle::Stepped => clock.step_index() as usize,
        CruiseStyle::Glide => ((clock.eased() * steps as f32).floor() as usize).min(steps),
    };
    if due > index {
        (index + 1).min(steps)
    } else {
        index
    }
}

fn cruise_pose(plan: &FlightPlan, clock: &Tween, index: usize) -> Option<CameraPose> {
    let stops = plan.stops();
    let here = stops.get(index).or(stops.last())?;
    match (plan.cruise_style(), stops.get(index + 1)) {
        (CruiseStyle::Glide, Some(next)) => {
            let fraction = (clock.eased() * plan.cruise_steps() as f32 - index as f32).clamp(0.0, 1.0);
            Some(here.lerp(next, fraction))
        }
        _ => Some(*here),
    }
}
