//! Profiling metrics with time-based measurements.
//!
//! Frame timing statistics plus refresh counters for the debug page.
//! The `DebugLog` type is in the common crate since it doesn't need time.

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::String;
use robot_hud_common::ElementMask;

/// Frame timing and refresh statistics.
pub struct ProfilingMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub render_time_us: u32,
    pub sleep_time_us: u32,

    // Statistics
    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    /// Refresh requests taken by the UI loop.
    pub refreshes_requested: u32,
    /// Refreshes that completed (including ones that painted nothing).
    pub refreshes_rendered: u32,
    /// Refreshes dropped because the display rejected a write.
    pub refreshes_faulted: u32,
    /// Refreshes dropped because the screen was detached or destroyed.
    pub refreshes_skipped: u32,
    /// Individual element repaints across all refreshes.
    pub elements_painted: u32,

    // Uptime tracking
    start_time: Instant,
}

impl ProfilingMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            refreshes_requested: 0,
            refreshes_rendered: 0,
            refreshes_faulted: 0,
            refreshes_skipped: 0,
            elements_painted: 0,
            start_time: Instant::now(),
        }
    }

    /// Record frame timing for this frame.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
        sleep_time: Duration,
    ) {
        let total_us = total_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.sleep_time_us = sleep_time.as_micros() as u32;

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    #[inline]
    pub fn inc_requested(&mut self) { self.refreshes_requested += 1; }

    /// A refresh ran to completion and repainted `painted`.
    #[inline]
    pub fn record_rendered(
        &mut self,
        painted: ElementMask,
    ) {
        self.refreshes_rendered += 1;
        self.elements_painted += painted.len();
    }

    #[inline]
    pub fn inc_faulted(&mut self) { self.refreshes_faulted += 1; }

    #[inline]
    pub fn inc_skipped(&mut self) { self.refreshes_skipped += 1; }

    /// Get average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Format uptime as HH:MM:SS.
    pub fn uptime_string(&self) -> String<12> {
        let secs = self.start_time.elapsed().as_secs();
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
        s
    }
}

impl Default for ProfilingMetrics {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use robot_hud_common::render::Element;

    use super::*;

    #[test]
    fn test_record_frame_min_max() {
        let mut metrics = ProfilingMetrics::new();
        metrics.record_frame(Duration::from_millis(20), Duration::from_millis(5), Duration::from_millis(15));
        metrics.record_frame(Duration::from_millis(30), Duration::from_millis(8), Duration::from_millis(22));

        assert_eq!(metrics.frame_time_min_us, 20_000);
        assert_eq!(metrics.frame_time_max_us, 30_000);
        assert_eq!(metrics.render_time_us, 8_000);
        assert_eq!(metrics.total_frames, 2);
        assert!((20_000..=30_000).contains(&metrics.frame_time_avg_us()));
    }

    #[test]
    fn test_refresh_counters() {
        let mut metrics = ProfilingMetrics::new();
        metrics.inc_requested();
        metrics.record_rendered(ElementMask::EMPTY.with(Element::Speed).with(Element::Wifi));
        metrics.inc_requested();
        metrics.inc_skipped();

        assert_eq!(metrics.refreshes_requested, 2);
        assert_eq!(metrics.refreshes_rendered, 1);
        assert_eq!(metrics.refreshes_skipped, 1);
        assert_eq!(metrics.refreshes_faulted, 0);
        assert_eq!(metrics.elements_painted, 2);
    }

    #[test]
    fn test_uptime_format() {
        let metrics = ProfilingMetrics::new();
        assert_eq!(metrics.uptime_string().as_str(), "00:00:00");
    }
}
