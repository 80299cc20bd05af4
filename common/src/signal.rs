//! Wi-Fi signal discretization and the poll step.
//!
//! RSSI readings are bucketed into [`SIGNAL_LEVELS`] levels by a linear
//! mapping between [`MIN_RSSI`] and [`MAX_RSSI`]:
//!
//! | RSSI (dBm)       | Level |
//! |------------------|-------|
//! | `<= -100`        | 0     |
//! | `-100 < r < -55` | `trunc((r + 100) * 4 / 45)` |
//! | `>= -55`         | 4     |

use crate::config::{MAX_RSSI, MIN_RSSI, SIGNAL_LEVELS};
use crate::telemetry::{RefreshReason, TelemetryStore};

/// Source of the current Wi-Fi RSSI.
///
/// Implemented by the platform (or the simulator). Called from the poller
/// thread, never from the UI.
pub trait WifiSignal {
    /// Current received signal strength in dBm.
    fn rssi(&mut self) -> i32;
}

/// Map an RSSI onto `num_levels` buckets.
///
/// Values at or below [`MIN_RSSI`] map to 0, values at or above [`MAX_RSSI`]
/// map to `num_levels - 1`, everything in between is scaled linearly and
/// truncated.
pub fn calculate_signal_level(
    rssi: i32,
    num_levels: u8,
) -> u8 {
    let top = num_levels.saturating_sub(1);
    if rssi <= MIN_RSSI {
        0
    } else if rssi >= MAX_RSSI {
        top
    } else {
        let input_range = (MAX_RSSI - MIN_RSSI) as f32;
        let output_range = f32::from(top);
        ((rssi - MIN_RSSI) as f32 * output_range / input_range) as u8
    }
}

/// Discretized signal level, always in `0..SIGNAL_LEVELS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SignalLevel(u8);

impl SignalLevel {
    /// Highest level (full bars).
    pub const MAX: Self = Self(SIGNAL_LEVELS as u8 - 1);

    /// Discretize an RSSI reading.
    #[inline]
    pub fn from_rssi(rssi: i32) -> Self { Self(calculate_signal_level(rssi, SIGNAL_LEVELS as u8)) }

    /// Build a level directly, clamping out-of-range values to [`Self::MAX`].
    #[inline]
    pub const fn new(level: u8) -> Self {
        if level > Self::MAX.0 { Self::MAX } else { Self(level) }
    }

    #[inline]
    pub const fn get(self) -> u8 { self.0 }

    /// Icon for this level. Always a valid index into [`WIFI_ICONS`].
    #[inline]
    pub const fn icon(self) -> WifiIcon { WIFI_ICONS[self.0 as usize] }
}

/// Signal-strength icon identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WifiIcon {
    /// No usable signal. Drawn as four unlit bars.
    Bars0,
    Bars1,
    Bars2,
    Bars3,
    /// Full signal.
    Bars4,
}

impl WifiIcon {
    /// Number of lit bars.
    #[inline]
    pub const fn lit_bars(self) -> u8 {
        match self {
            Self::Bars0 => 0,
            Self::Bars1 => 1,
            Self::Bars2 => 2,
            Self::Bars3 => 3,
            Self::Bars4 => 4,
        }
    }
}

/// Icon table indexed by signal level.
pub const WIFI_ICONS: [WifiIcon; SIGNAL_LEVELS] = [
    WifiIcon::Bars0,
    WifiIcon::Bars1,
    WifiIcon::Bars2,
    WifiIcon::Bars3,
    WifiIcon::Bars4,
];

/// Result of a single poll iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    pub rssi: i32,
    pub level: SignalLevel,
    /// True if the level changed and a refresh was requested.
    pub refresh_requested: bool,
}

/// One poller iteration: read RSSI, discretize, store, and request a refresh
/// only if the level differs from the stored one.
pub fn poll_once<W>(
    wifi: &mut W,
    store: &TelemetryStore,
) -> PollOutcome
where
    W: WifiSignal + ?Sized,
{
    let rssi = wifi.rssi();
    let level = SignalLevel::from_rssi(rssi);
    let changed = store.record_signal_level(level);
    if changed {
        log::debug!("wifi level -> {} (rssi {rssi})", level.get());
        store.request_refresh(RefreshReason::SignalLevel);
    }
    PollOutcome {
        rssi,
        level,
        refresh_requested: changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedWifi {
        readings: &'static [i32],
        next: usize,
    }

    impl WifiSignal for ScriptedWifi {
        fn rssi(&mut self) -> i32 {
            let value = self.readings[self.next % self.readings.len()];
            self.next += 1;
            value
        }
    }

    #[test]
    fn test_signal_level_boundaries() {
        assert_eq!(calculate_signal_level(-100, 5), 0);
        assert_eq!(calculate_signal_level(-127, 5), 0, "disconnected reading is level 0");
        assert_eq!(calculate_signal_level(-55, 5), 4);
        assert_eq!(calculate_signal_level(0, 5), 4);
        // (-77 + 100) * 4 / 45 = 2.04 -> 2
        assert_eq!(calculate_signal_level(-77, 5), 2);
        // (-56 + 100) * 4 / 45 = 3.91 -> 3 (truncated, not rounded)
        assert_eq!(calculate_signal_level(-56, 5), 3);
        // (-99 + 100) * 4 / 45 = 0.09 -> 0
        assert_eq!(calculate_signal_level(-99, 5), 0);
    }

    #[test]
    fn test_signal_level_degenerate_bucket_counts() {
        assert_eq!(calculate_signal_level(-40, 1), 0);
        assert_eq!(calculate_signal_level(-40, 0), 0);
    }

    #[test]
    fn test_every_rssi_indexes_a_valid_icon() {
        for rssi in -200..=50 {
            let level = SignalLevel::from_rssi(rssi);
            assert!(usize::from(level.get()) < SIGNAL_LEVELS, "rssi {rssi} gave level {}", level.get());
            assert_eq!(level.icon(), WIFI_ICONS[usize::from(level.get())]);
        }
        for rssi in [i32::MIN, i32::MAX] {
            assert!(SignalLevel::from_rssi(rssi) <= SignalLevel::MAX);
        }
    }

    #[test]
    fn test_signal_level_monotonic() {
        let mut prev = SignalLevel::from_rssi(-120);
        for rssi in -119..=-40 {
            let level = SignalLevel::from_rssi(rssi);
            assert!(level >= prev, "level dropped at rssi {rssi}");
            prev = level;
        }
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(SignalLevel::new(9), SignalLevel::MAX);
        assert_eq!(SignalLevel::new(2).get(), 2);
    }

    #[test]
    fn test_icon_table_order() {
        for (i, icon) in WIFI_ICONS.iter().enumerate() {
            assert_eq!(usize::from(icon.lit_bars()), i);
        }
    }

    #[test]
    fn test_poll_same_level_requests_nothing() {
        let store = TelemetryStore::new();
        // Both readings discretize to level 2
        let mut wifi = ScriptedWifi {
            readings: &[-77, -75],
            next: 0,
        };

        let first = poll_once(&mut wifi, &store);
        assert!(first.refresh_requested, "0 -> 2 is a change");
        assert!(store.take_refresh().is_some());

        let second = poll_once(&mut wifi, &store);
        assert!(!second.refresh_requested);
        assert!(store.take_refresh().is_none(), "no refresh for an unchanged level");
    }

    #[test]
    fn test_poll_changed_level_requests_exactly_one() {
        let store = TelemetryStore::new();
        let mut wifi = ScriptedWifi {
            readings: &[-50],
            next: 0,
        };

        let outcome = poll_once(&mut wifi, &store);
        assert_eq!(outcome.level, SignalLevel::MAX);
        assert_eq!(store.take_refresh(), Some(RefreshReason::SignalLevel));
        assert!(store.take_refresh().is_none(), "exactly one refresh pending");
        assert_eq!(store.snapshot().wifi_level, SignalLevel::MAX);
    }

    #[test]
    fn test_first_poll_at_level_zero_is_silent() {
        let store = TelemetryStore::new();
        let mut wifi = ScriptedWifi {
            readings: &[-127],
            next: 0,
        };
        assert!(!poll_once(&mut wifi, &store).refresh_requested);
        assert!(!store.refresh_pending());
    }
}
