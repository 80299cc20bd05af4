//! Telemetry snapshot and the store shared between producers and the UI.
//!
//! # Threading Model
//!
//! | Context | Writes | Reads |
//! |---------|--------|-------|
//! | Odometry callback | speed, turn rate | lifecycle |
//! | Wi-Fi poller | signal level | signal level |
//! | UI loop | lifecycle | everything |
//!
//! Producers never draw. They update the snapshot and raise the refresh
//! [`Signal`]; the UI loop takes the signal and renders whatever the snapshot
//! holds at that moment. Back-to-back requests coalesce into one, which at worst
//! skips a paint frame but never shows stale data.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::error::RefreshError;
use crate::signal::SignalLevel;

// =============================================================================
// Odometry Message Schema
// =============================================================================

/// Three-component vector, as carried by the middleware's geometry messages.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Linear and angular velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// Twist with its 6x6 covariance (row-major).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwistWithCovariance {
    pub twist: Twist,
    pub covariance: [f64; 36],
}

impl Default for TwistWithCovariance {
    fn default() -> Self {
        Self {
            twist: Twist::default(),
            covariance: [0.0; 36],
        }
    }
}

/// Odometry message. Only the twist is used by the HUD.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Odometry {
    pub twist: TwistWithCovariance,
}

impl Odometry {
    /// Build a message carrying only forward speed and yaw rate.
    pub fn from_velocity(
        linear_x: f64,
        angular_z: f64,
    ) -> Self {
        let mut msg = Self::default();
        msg.twist.twist.linear.x = linear_x;
        msg.twist.twist.angular.z = angular_z;
        msg
    }

    /// Forward speed (m/s).
    #[inline]
    pub const fn linear_x(&self) -> f64 { self.twist.twist.linear.x }

    /// Yaw rate (rad/s).
    #[inline]
    pub const fn angular_z(&self) -> f64 { self.twist.twist.angular.z }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Latest values the HUD displays.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    /// Forward speed (m/s).
    pub speed: f64,
    /// Yaw rate (rad/s).
    pub turn_rate: f64,
    pub wifi_level: SignalLevel,
}

/// Screen lifecycle as seen by producers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not shown yet, or sent to the background.
    #[default]
    Detached,
    /// Visible; updates are accepted and rendered.
    Attached,
    /// Torn down. No further updates are accepted.
    Destroyed,
}

/// What caused the most recent pending refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshReason {
    /// Screen (re)attached.
    Attached,
    /// New odometry message.
    Odometry,
    /// Discretized Wi-Fi level changed.
    SignalLevel,
    /// Full redraw requested by the UI (layout change, page switch).
    Redraw,
}

// =============================================================================
// Store
// =============================================================================

/// Thread-safe holder for the snapshot, lifecycle and pending refresh request.
///
/// `const`-constructible so it can live in a `static`, or be shared via `Arc`.
pub struct TelemetryStore {
    snapshot: Mutex<CriticalSectionRawMutex, Cell<TelemetrySnapshot>>,
    lifecycle: Mutex<CriticalSectionRawMutex, Cell<Lifecycle>>,
    refresh: Signal<CriticalSectionRawMutex, RefreshReason>,
}

impl TelemetryStore {
    pub const fn new() -> Self {
        Self {
            snapshot: Mutex::new(Cell::new(TelemetrySnapshot {
                speed: 0.0,
                turn_rate: 0.0,
                wifi_level: SignalLevel::new(0),
            })),
            lifecycle: Mutex::new(Cell::new(Lifecycle::Detached)),
            refresh: Signal::new(),
        }
    }

    /// Copy of the latest snapshot.
    #[inline]
    pub fn snapshot(&self) -> TelemetrySnapshot { self.snapshot.lock(Cell::get) }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle { self.lifecycle.lock(Cell::get) }

    /// `Ok` while attached, otherwise the matching lifecycle error.
    pub fn ensure_attached(&self) -> Result<(), RefreshError> {
        match self.lifecycle() {
            Lifecycle::Attached => Ok(()),
            Lifecycle::Detached => Err(RefreshError::Detached),
            Lifecycle::Destroyed => Err(RefreshError::Destroyed),
        }
    }

    /// Show the screen: reset motion to zero and request the first paint.
    ///
    /// Ignored once destroyed. Re-attaching keeps the stored signal level.
    pub fn attach(&self) -> Result<(), RefreshError> {
        let attached = self.lifecycle.lock(|cell| match cell.get() {
            Lifecycle::Destroyed => false,
            _ => {
                cell.set(Lifecycle::Attached);
                true
            }
        });
        if !attached {
            return Err(RefreshError::Destroyed);
        }
        log::info!("hud attached");
        self.update_motion(0.0, 0.0)?;
        self.request_refresh(RefreshReason::Attached);
        Ok(())
    }

    /// Send the screen to the background. Pending refreshes stay pending and
    /// fail with [`RefreshError::Detached`] when taken.
    pub fn detach(&self) {
        self.lifecycle.lock(|cell| {
            if cell.get() == Lifecycle::Attached {
                cell.set(Lifecycle::Detached);
            }
        });
        log::info!("hud detached");
    }

    /// Tear down. Terminal: later attach calls fail.
    pub fn destroy(&self) {
        self.lifecycle.lock(|cell| cell.set(Lifecycle::Destroyed));
        log::info!("hud destroyed");
    }

    /// Message callback: store linear-x and angular-z and request a refresh.
    #[inline]
    pub fn on_new_message(
        &self,
        message: &Odometry,
    ) -> Result<(), RefreshError> {
        self.update_motion(message.linear_x(), message.angular_z())
    }

    /// Store the latest motion values and request a refresh.
    ///
    /// Dropped (snapshot untouched, nothing requested) unless attached.
    pub fn update_motion(
        &self,
        speed: f64,
        turn_rate: f64,
    ) -> Result<(), RefreshError> {
        self.ensure_attached()?;
        self.snapshot.lock(|cell| {
            let mut snapshot = cell.get();
            snapshot.speed = speed;
            snapshot.turn_rate = turn_rate;
            cell.set(snapshot);
        });
        self.request_refresh(RefreshReason::Odometry);
        Ok(())
    }

    /// Store a new signal level. Returns true if it differs from the previous one.
    ///
    /// Does not request a refresh; see [`crate::signal::poll_once`].
    pub fn record_signal_level(
        &self,
        level: SignalLevel,
    ) -> bool {
        self.snapshot.lock(|cell| {
            let mut snapshot = cell.get();
            let changed = snapshot.wifi_level != level;
            snapshot.wifi_level = level;
            cell.set(snapshot);
            changed
        })
    }

    /// Ask the UI loop to repaint. Overwrites any request not yet taken.
    #[inline]
    pub fn request_refresh(
        &self,
        reason: RefreshReason,
    ) {
        self.refresh.signal(reason);
    }

    /// Take the pending refresh request, if any. Called from the UI loop.
    #[inline]
    pub fn take_refresh(&self) -> Option<RefreshReason> { self.refresh.try_take() }

    #[inline]
    pub fn refresh_pending(&self) -> bool { self.refresh.signaled() }
}

impl Default for TelemetryStore {
    fn default() -> Self { Self::new() }
}
