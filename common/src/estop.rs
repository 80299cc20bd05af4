//! Emergency-stop control.
//!
//! The button has two states. Pressing it first tries to resume a paused plan
//! and only then tries to stop the robot:
//!
//! | Press outcome                 | New state | Label   | Background |
//! |-------------------------------|-----------|---------|------------|
//! | `resume_plan()` succeeded     | Running   | "STOP"  | red        |
//! | `stop_robot()` succeeded      | Stopped   | "START" | green      |
//! | both failed                   | unchanged |         |            |
//!
//! An external control-mode change always forces Running.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{EMERGENCY_STOP_GREEN, EMERGENCY_STOP_RED};
use crate::coords::Location;

/// Robot control collaborator.
///
/// Owned by the surrounding application and shared with other screens, so
/// every method takes `&self`; implementors use interior mutability.
pub trait RobotController {
    /// Resume a paused plan. False if there is nothing to resume.
    fn resume_plan(&self) -> bool;

    /// Stop the robot. False if it could not be stopped.
    fn stop_robot(&self) -> bool;

    /// Last position reported by the robot's location provider.
    fn last_known_location(&self) -> Option<Location>;
}

/// Button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EStopState {
    /// Robot halted; pressing resumes.
    Stopped,
    /// Robot moving or free to move; pressing stops.
    #[default]
    Running,
}

impl EStopState {
    /// Button label.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "STOP",
            Self::Stopped => "START",
        }
    }

    /// Button background.
    #[inline]
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Running => EMERGENCY_STOP_RED,
            Self::Stopped => EMERGENCY_STOP_GREEN,
        }
    }
}

/// Emergency-stop state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmergencyStop {
    state: EStopState,
}

impl EmergencyStop {
    pub const fn new() -> Self {
        Self {
            state: EStopState::Running,
        }
    }

    #[inline]
    pub const fn state(&self) -> EStopState { self.state }

    /// Handle a press. Returns the new state if one of the controller calls
    /// succeeded, `None` if the state is unchanged.
    pub fn press<C>(
        &mut self,
        controller: &C,
    ) -> Option<EStopState>
    where
        C: RobotController + ?Sized,
    {
        let next = if controller.resume_plan() {
            EStopState::Running
        } else if controller.stop_robot() {
            EStopState::Stopped
        } else {
            log::debug!("e-stop press ignored: nothing to resume or stop");
            return None;
        };
        log::info!("e-stop -> {next:?}");
        self.state = next;
        Some(next)
    }

    /// External plan/control-mode change. Always ends in Running.
    pub fn control_mode_changed(&mut self) { self.state = EStopState::Running; }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    /// Controller whose answers are fixed; counts calls.
    #[derive(Default)]
    struct FakeController {
        can_resume: bool,
        can_stop: bool,
        resume_calls: Cell<u32>,
        stop_calls: Cell<u32>,
    }

    impl RobotController for FakeController {
        fn resume_plan(&self) -> bool {
            self.resume_calls.set(self.resume_calls.get() + 1);
            self.can_resume
        }

        fn stop_robot(&self) -> bool {
            self.stop_calls.set(self.stop_calls.get() + 1);
            self.can_stop
        }

        fn last_known_location(&self) -> Option<Location> { None }
    }

    #[test]
    fn test_initial_state_running() {
        let estop = EmergencyStop::new();
        assert_eq!(estop.state(), EStopState::Running);
        assert_eq!(estop.state().label(), "STOP");
        assert_eq!(estop.state().color(), EMERGENCY_STOP_RED);
    }

    #[test]
    fn test_press_with_paused_plan_resumes() {
        let mut estop = EmergencyStop::new();
        estop.state = EStopState::Stopped;
        let controller = FakeController {
            can_resume: true,
            can_stop: true,
            ..Default::default()
        };

        assert_eq!(estop.press(&controller), Some(EStopState::Running));
        assert_eq!(controller.stop_calls.get(), 0, "stop must not be tried after a resume");
    }

    #[test]
    fn test_press_stops_when_nothing_to_resume() {
        let mut estop = EmergencyStop::new();
        let controller = FakeController {
            can_stop: true,
            ..Default::default()
        };

        assert_eq!(estop.press(&controller), Some(EStopState::Stopped));
        assert_eq!(estop.state().label(), "START");
        assert_eq!(estop.state().color(), EMERGENCY_STOP_GREEN);
        assert_eq!(controller.resume_calls.get(), 1);
    }

    #[test]
    fn test_press_unchanged_when_both_fail() {
        for initial in [EStopState::Running, EStopState::Stopped] {
            let mut estop = EmergencyStop { state: initial };
            let controller = FakeController::default();

            assert_eq!(estop.press(&controller), None);
            assert_eq!(estop.state(), initial);
            assert_eq!(controller.resume_calls.get(), 1);
            assert_eq!(controller.stop_calls.get(), 1);
        }
    }

    #[test]
    fn test_control_mode_change_forces_running() {
        let mut estop = EmergencyStop {
            state: EStopState::Stopped,
        };
        estop.control_mode_changed();
        assert_eq!(estop.state(), EStopState::Running);
    }
}
