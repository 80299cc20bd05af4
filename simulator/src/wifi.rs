//! Simulated Wi-Fi radio: RSSI sweeps between out-of-range and excellent.

use robot_hud_common::WifiSignal;

/// Center of the sweep (dBm).
const RSSI_CENTER: f32 = -78.0;

/// Sweep amplitude (dBm). Reaches past both discretization bounds.
const RSSI_SWING: f32 = 28.0;

/// Phase advance per reading.
const PHASE_STEP: f32 = 0.35;

pub struct SimulatedWifi {
    phase: f32,
}

impl SimulatedWifi {
    pub const fn new() -> Self { Self { phase: 0.0 } }
}

impl Default for SimulatedWifi {
    fn default() -> Self { Self::new() }
}

impl WifiSignal for SimulatedWifi {
    fn rssi(&mut self) -> i32 {
        let rssi = self.phase.sin().mul_add(RSSI_SWING, RSSI_CENTER);
        self.phase = (self.phase + PHASE_STEP) % core::f32::consts::TAU;
        rssi as i32
    }
}
