//! Compile-time configuration for the HUD.
//!
//! Layout geometry is pre-computed as `const` so the refresher never does
//! per-frame arithmetic for element positions. Timing values are stored as
//! plain milliseconds because `core` has no clock; the simulator wraps them in
//! `std::time::Duration`.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

// =============================================================================
// Wi-Fi Signal Configuration
// =============================================================================

/// Number of discrete signal levels (and Wi-Fi icons).
pub const SIGNAL_LEVELS: usize = 5;

/// RSSI at or below which the signal level is 0 (dBm).
pub const MIN_RSSI: i32 = -100;

/// RSSI at or above which the signal level is the maximum (dBm).
pub const MAX_RSSI: i32 = -55;

const _: () = assert!(MIN_RSSI < MAX_RSSI);
const _: () = assert!(SIGNAL_LEVELS >= 2);

// =============================================================================
// Timing Configuration
// =============================================================================

/// Interval between Wi-Fi signal polls.
pub const POLL_INTERVAL_MS: u64 = 1000;

// =============================================================================
// Layout
// =============================================================================

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Height of the emergency-stop strip at the bottom of the screen.
pub const ESTOP_HEIGHT: u32 = 54;

/// Width of each readout column (two columns).
pub const COL_WIDTH: u32 = SCREEN_WIDTH / 2;

/// Height of each readout row (two rows between header and e-stop strip).
pub const ROW_HEIGHT: u32 = (SCREEN_HEIGHT - HEADER_HEIGHT - ESTOP_HEIGHT) / 2;

/// Top edge of the emergency-stop strip.
pub const ESTOP_Y: u32 = SCREEN_HEIGHT - ESTOP_HEIGHT;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Left edge of the Wi-Fi icon inside the header.
pub const WIFI_ICON_X: i32 = SCREEN_WIDTH as i32 - 30;

/// Top edge of the Wi-Fi icon inside the header.
pub const WIFI_ICON_Y: i32 = 4;

/// Wi-Fi icon width (four bars with gaps).
pub const WIFI_ICON_WIDTH: u32 = 24;

/// Wi-Fi icon height (tallest bar).
pub const WIFI_ICON_HEIGHT: u32 = 18;

const _: () = assert!(HEADER_HEIGHT + 2 * ROW_HEIGHT + ESTOP_HEIGHT <= SCREEN_HEIGHT);
const _: () = assert!(WIFI_ICON_Y as u32 + WIFI_ICON_HEIGHT <= HEADER_HEIGHT);
