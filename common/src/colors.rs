//! Color constants for the robot HUD.
//!
//! Standard colors come from the `RgbColor` trait so they use the exact Rgb565
//! extremes; the rest are application-specific.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Screen and cell backgrounds.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Values and button labels.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure green. Lit Wi-Fi bars and the debug page header.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Highlighted debug counters.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Emergency-stop background while the robot is running (button reads "STOP").
/// RGB565: (26, 4, 4) - a slightly muted red so white text stays readable.
pub const EMERGENCY_STOP_RED: Rgb565 = Rgb565::new(26, 4, 4);

/// Emergency-stop background while the robot is stopped (button reads "START").
/// RGB565: (2, 40, 6).
pub const EMERGENCY_STOP_GREEN: Rgb565 = Rgb565::new(2, 40, 6);

/// Header bar fill.
/// RGB565: (3, 10, 12) - dark slate.
pub const HEADER_BG: Rgb565 = Rgb565::new(3, 10, 12);

/// Orange accent for labels and the debug log text.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for divider lines and unlit Wi-Fi bars.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
