//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which is not available in `no_std`, so they
//! live here rather than in the common crate.

use std::time::Duration;

use robot_hud_common::config::POLL_INTERVAL_MS;

/// Target frame time (~50 FPS). The UI loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Wi-Fi signal poll period.
pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

/// Odometry publish period (10 Hz).
pub const ODOMETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Duration that popups remain visible on screen.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);
