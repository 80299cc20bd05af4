//! Error types for the HUD.
//!
//! None of these are surfaced to the operator. They exist so callers can tell
//! an expected lifecycle race (screen detached while a refresh was pending)
//! apart from a real display fault, even though both are usually dropped.

use thiserror::Error;

/// Why a refresh or telemetry update did not reach the screen.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    /// The screen is not currently shown. Updates resume after re-attach.
    #[error("screen is detached")]
    Detached,

    /// The screen was torn down. Terminal.
    #[error("screen was destroyed")]
    Destroyed,

    /// The display rejected a draw call.
    #[error("display write failed")]
    Draw,
}

impl RefreshError {
    /// Lifecycle races are expected and always ignored; draw failures are not.
    #[inline]
    pub const fn is_lifecycle(self) -> bool { matches!(self, Self::Detached | Self::Destroyed) }
}

/// A coordinate that cannot be expressed in degrees/minutes/seconds.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate is NaN")]
    NotANumber,

    #[error("coordinate {0} is outside [-180, 180]")]
    OutOfRange(f64),
}
