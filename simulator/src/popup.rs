//! Popup state management with time-based expiration.
//!
//! Each popup variant holds its start time for expiration checking.

use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use robot_hud_common::EStopState;
use robot_hud_common::colors::{BLACK, EMERGENCY_STOP_GREEN, EMERGENCY_STOP_RED, HEADER_BG};
use robot_hud_common::widgets::draw_popup;

use crate::timing::POPUP_DURATION;

/// Active popup with its start time.
#[derive(Clone, Copy, Debug)]
pub enum Popup {
    /// Result of an e-stop press (`None`: the robot refused both commands).
    EStop(Instant, Option<EStopState>),
    /// Control mode switched; `true` for a new plan, `false` for manual.
    ControlMode(Instant, bool),
    /// Layout toggled; `true` for the compact layout.
    Layout(Instant, bool),
    /// Screen attached (`true`) or detached.
    Lifecycle(Instant, bool),
}

impl Popup {
    #[inline]
    pub const fn start_time(&self) -> Instant {
        match self {
            Self::EStop(t, _) | Self::ControlMode(t, _) | Self::Layout(t, _) | Self::Lifecycle(t, _) => *t,
        }
    }

    /// Check if this popup has expired.
    #[inline]
    pub fn is_expired(&self) -> bool { self.expired_at(Instant::now()) }

    fn expired_at(
        &self,
        now: Instant,
    ) -> bool {
        now.saturating_duration_since(self.start_time()) >= POPUP_DURATION
    }

    /// The detached popup stays up until the screen is attached again.
    #[inline]
    pub const fn is_sticky(&self) -> bool { matches!(self, Self::Lifecycle(_, false)) }

    /// Text lines for the popup body.
    pub const fn lines(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::EStop(_, Some(EStopState::Stopped)) => ("ROBOT STOPPED", Some("press to resume")),
            Self::EStop(_, Some(EStopState::Running)) => ("PLAN RESUMED", None),
            Self::EStop(_, None) => ("NO EFFECT", Some("change mode")),
            Self::ControlMode(_, true) => ("NEW PLAN", None),
            Self::ControlMode(_, false) => ("MANUAL", None),
            Self::Layout(_, true) => ("LAYOUT", Some("compact")),
            Self::Layout(_, false) => ("LAYOUT", Some("full")),
            Self::Lifecycle(_, true) => ("HUD ATTACHED", None),
            Self::Lifecycle(_, false) => ("HUD DETACHED", Some("D to attach")),
        }
    }

    const fn background(&self) -> Rgb565 {
        match self {
            Self::EStop(_, Some(EStopState::Stopped)) => EMERGENCY_STOP_RED,
            Self::EStop(_, Some(EStopState::Running)) => EMERGENCY_STOP_GREEN,
            Self::EStop(_, None) | Self::Lifecycle(_, false) => BLACK,
            Self::ControlMode(..) | Self::Layout(..) | Self::Lifecycle(_, true) => HEADER_BG,
        }
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (line1, line2) = self.lines();
        draw_popup(display, self.background(), line1, line2)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_expiry() {
        let start = Instant::now();
        let popup = Popup::Layout(start, true);
        assert!(!popup.expired_at(start + Duration::from_secs(1)));
        assert!(popup.expired_at(start + POPUP_DURATION));
    }

    #[test]
    fn test_estop_lines() {
        let now = Instant::now();
        assert_eq!(Popup::EStop(now, Some(EStopState::Stopped)).lines().0, "ROBOT STOPPED");
        assert_eq!(Popup::EStop(now, None).lines(), ("NO EFFECT", Some("change mode")));
    }

    #[test]
    fn test_only_detached_is_sticky() {
        let now = Instant::now();
        assert!(Popup::Lifecycle(now, false).is_sticky());
        assert!(!Popup::Lifecycle(now, true).is_sticky());
        assert!(!Popup::EStop(now, None).is_sticky());
    }
}
