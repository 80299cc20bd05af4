//! Simulated robot: motion modes, dead-reckoned position and odometry output.
//!
//! Shared between the UI thread (e-stop presses, location lookups) and the
//! odometry publisher thread, so its state sits behind an embassy-sync blocking
//! mutex like the HUD's telemetry store.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use robot_hud_common::{Location, Odometry, RobotController};

/// Meters per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Motion mode of the simulated robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Driven by the operator; no plan to resume.
    Manual,
    /// Following a plan.
    RunningPlan,
    /// Plan interrupted by the e-stop; can be resumed.
    PlanPaused,
    /// Halted outside of a plan.
    Stopped,
}

impl Mode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::RunningPlan => "PLAN",
            Self::PlanPaused => "PAUSED",
            Self::Stopped => "STOPPED",
        }
    }

    const fn is_moving(self) -> bool { matches!(self, Self::Manual | Self::RunningPlan) }
}

#[derive(Clone, Copy, Debug)]
struct RobotState {
    mode: Mode,
    location: Location,
    /// Radians, 0 = north, clockwise.
    heading: f64,
    /// Seconds of motion since start; drives the velocity profile.
    clock: f64,
}

pub struct SimulatedRobot {
    state: Mutex<CriticalSectionRawMutex, Cell<RobotState>>,
}

impl SimulatedRobot {
    /// A robot at `location`, already following a plan.
    pub const fn new(location: Location) -> Self {
        Self {
            state: Mutex::new(Cell::new(RobotState {
                mode: Mode::RunningPlan,
                location,
                heading: 0.0,
                clock: 0.0,
            })),
        }
    }

    pub fn mode(&self) -> Mode { self.state.lock(|s| s.get().mode) }

    /// Start a fresh plan regardless of the current mode.
    pub fn start_plan(&self) {
        self.modify(|s| s.mode = Mode::RunningPlan);
        log::info!("robot: new plan started");
    }

    /// Hand control back to the operator.
    pub fn take_manual_control(&self) {
        self.modify(|s| s.mode = Mode::Manual);
        log::info!("robot: manual control");
    }

    /// Advance the simulation by `dt` seconds and return the odometry for it.
    pub fn step(
        &self,
        dt: f64,
    ) -> Odometry {
        let mut out = Odometry::default();
        self.modify(|s| {
            let (linear, angular) = velocity(s.mode, s.clock);
            if s.mode.is_moving() {
                s.clock += dt;
            }

            s.heading = (s.heading + angular * dt).rem_euclid(core::f64::consts::TAU);
            let north = linear * s.heading.cos() * dt;
            let east = linear * s.heading.sin() * dt;
            s.location.latitude += north / METERS_PER_DEGREE;
            s.location.longitude += east / (METERS_PER_DEGREE * s.location.latitude.to_radians().cos());

            out = Odometry::from_velocity(linear, angular);
        });
        out
    }

    fn modify(
        &self,
        f: impl FnOnce(&mut RobotState),
    ) {
        self.state.lock(|cell| {
            let mut state = cell.get();
            f(&mut state);
            cell.set(state);
        });
    }
}

/// Linear (m/s) and angular (rad/s) velocity for a mode at time `t`.
fn velocity(
    mode: Mode,
    t: f64,
) -> (f64, f64) {
    match mode {
        Mode::RunningPlan => ((t * 0.2).sin().mul_add(0.4, 1.1), (t * 0.13).sin() * 0.35),
        Mode::Manual => ((t * 0.5).sin().mul_add(0.25, 0.3), (t * 0.7).cos() * 0.6),
        Mode::PlanPaused | Mode::Stopped => (0.0, 0.0),
    }
}

impl RobotController for SimulatedRobot {
    fn resume_plan(&self) -> bool {
        self.state.lock(|cell| {
            let mut state = cell.get();
            if state.mode != Mode::PlanPaused {
                return false;
            }
            state.mode = Mode::RunningPlan;
            cell.set(state);
            true
        })
    }

    fn stop_robot(&self) -> bool {
        self.state.lock(|cell| {
            let mut state = cell.get();
            state.mode = match state.mode {
                Mode::RunningPlan => Mode::PlanPaused,
                Mode::Manual => Mode::Stopped,
                Mode::PlanPaused | Mode::Stopped => return false,
            };
            cell.set(state);
            true
        })
    }

    fn last_known_location(&self) -> Option<Location> { Some(self.state.lock(|s| s.get().location)) }
}
