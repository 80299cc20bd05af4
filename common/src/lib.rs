//! Platform-agnostic logic for the robot telemetry HUD.
//!
//! This crate contains everything the HUD screen needs that does not depend on a
//! particular windowing system or robot connection:
//!
//! - [`telemetry`]: Odometry message schema, [`TelemetrySnapshot`] and the shared
//!   [`TelemetryStore`] written by producers and read by the UI
//! - [`signal`]: Wi-Fi RSSI discretization, icon table and the poll step
//! - [`coords`]: Degree/minute/second coordinate formatting
//! - [`estop`]: Emergency-stop state machine and the [`RobotController`] seam
//! - [`hud`]: The UI refresher that writes the latest snapshot onto a display
//! - [`render`]: What is on screen, so unchanged elements are skipped
//! - [`pages`]: HUD / debug page toggle
//! - [`widgets`]: Drawing primitives generic over `DrawTarget<Color = Rgb565>`
//! - [`debug_log`]: Fixed-capacity log ring buffer shown on the debug page
//!
//! # Testing
//!
//! ```bash
//! cargo test -p robot-hud-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`); the library itself is `no_std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod coords;
pub mod debug_log;
pub mod error;
pub mod estop;
pub mod hud;
pub mod pages;
pub mod render;
pub mod signal;
pub mod styles;
pub mod telemetry;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_display;

// Re-export commonly used items
pub use coords::{Axis, Location};
pub use error::{CoordinateError, RefreshError};
pub use estop::{EStopState, EmergencyStop, RobotController};
pub use hud::{ElementMask, HudElements, HudScreen};
pub use pages::Page;
pub use signal::{SignalLevel, WifiIcon, WifiSignal};
pub use telemetry::{Lifecycle, Odometry, RefreshReason, TelemetrySnapshot, TelemetryStore};
