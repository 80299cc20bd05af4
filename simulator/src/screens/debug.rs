//! Debug/profiling page rendering.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;
use log::Level;
use robot_hud_common::colors::{BLACK, GRAY, GREEN, ORANGE, WHITE, YELLOW};
use robot_hud_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use robot_hud_common::debug_log::DebugLog;
use robot_hud_common::styles::LABEL_FONT;
use robot_hud_common::{EStopState, Lifecycle, SignalLevel};

use crate::profiling::ProfilingMetrics;
use crate::robot::Mode;

const HEADER_Y: i32 = 12;
const HEADER_DIVIDER_Y: i32 = 18;
const SECTION_HEADER_Y: i32 = 28;
const STATS_Y: i32 = 40;
const LOG_DIVIDER_Y: i32 = 120;
const LOG_Y: i32 = 130;
const LOG_LINE_HEIGHT: i32 = 12;
const COL1_X: i32 = 4;
const COL2_X: i32 = 110;
const COL3_X: i32 = 215;
const STAT_LINE_HEIGHT: i32 = 13;

const DEBUG_BG: Rgb565 = BLACK;
const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORANGE;
const LOG_WARN_COLOR: Rgb565 = YELLOW;
const DIVIDER_COLOR: Rgb565 = GRAY;

/// Robot link state shown in the third column.
pub struct LinkStatus {
    pub lifecycle: Lifecycle,
    pub wifi_level: SignalLevel,
    pub estop: EStopState,
    pub mode: Mode,
}

pub fn draw_debug_page(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &ProfilingMetrics,
    log: &DebugLog,
    link: &LinkStatus,
    fps: f32,
) {
    display.clear(DEBUG_BG).ok();
    draw_header(display, metrics, fps);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);
    draw_timing_column(display, metrics);
    draw_refresh_column(display, metrics);
    draw_link_column(display, link);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, log);
}

fn draw_header(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &ProfilingMetrics,
    fps: f32,
) {
    let header_style = MonoTextStyle::new(LABEL_FONT, HEADER_COLOR);
    let info_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), header_style)
        .draw(display)
        .ok();

    let mut uptime_str: String<24> = String::new();
    let _ = write!(uptime_str, "UP {}", metrics.uptime_string());
    Text::new(&uptime_str, Point::new(160, HEADER_Y), info_style)
        .draw(display)
        .ok();

    let mut fps_str: String<12> = String::new();
    let _ = write!(fps_str, "{fps:.0} FPS");
    Text::new(&fps_str, Point::new(280, HEADER_Y), info_style)
        .draw(display)
        .ok();
}

fn draw_section_headers(display: &mut SimulatorDisplay<Rgb565>) {
    let style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);
    for (title, x) in [("TIMING", COL1_X), ("REFRESH", COL2_X), ("LINK", COL3_X)] {
        Text::new(title, Point::new(x, SECTION_HEADER_Y), style)
            .draw(display)
            .ok();
    }
}

/// Draw `lines` top-down from `STATS_Y` in column `x`.
fn draw_column(
    display: &mut SimulatorDisplay<Rgb565>,
    x: i32,
    lines: &[(String<20>, Rgb565)],
) {
    let mut y = STATS_Y;
    for (text, color) in lines {
        Text::new(text, Point::new(x, y), MonoTextStyle::new(LABEL_FONT, *color))
            .draw(display)
            .ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn line(
    color: Rgb565,
    args: core::fmt::Arguments<'_>,
) -> (String<20>, Rgb565) {
    let mut s = String::new();
    let _ = s.write_fmt(args);
    (s, color)
}

fn draw_timing_column(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &ProfilingMetrics,
) {
    let min_ms = if metrics.frame_time_min_us == u32::MAX {
        0.0
    } else {
        metrics.frame_time_min_us as f32 / 1000.0
    };

    draw_column(display, COL1_X, &[
        line(VALUE_COLOR, format_args!("Frame: {:.1}ms", metrics.frame_time_us as f32 / 1000.0)),
        line(VALUE_COLOR, format_args!("Render:{:.1}ms", metrics.render_time_us as f32 / 1000.0)),
        line(VALUE_COLOR, format_args!("Sleep: {:.1}ms", metrics.sleep_time_us as f32 / 1000.0)),
        line(HIGHLIGHT_COLOR, format_args!("Min:   {min_ms:.1}ms")),
        line(HIGHLIGHT_COLOR, format_args!("Max:   {:.1}ms", metrics.frame_time_max_us as f32 / 1000.0)),
        line(HIGHLIGHT_COLOR, format_args!("Avg:   {:.1}ms", metrics.frame_time_avg_us() as f32 / 1000.0)),
    ]);
}

fn draw_refresh_column(
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &ProfilingMetrics,
) {
    let fault_color = if metrics.refreshes_faulted > 0 { HIGHLIGHT_COLOR } else { VALUE_COLOR };

    draw_column(display, COL2_X, &[
        line(VALUE_COLOR, format_args!("Frames:{}", metrics.total_frames)),
        line(VALUE_COLOR, format_args!("Req:   {}", metrics.refreshes_requested)),
        line(VALUE_COLOR, format_args!("Done:  {}", metrics.refreshes_rendered)),
        line(VALUE_COLOR, format_args!("Skip:  {}", metrics.refreshes_skipped)),
        line(fault_color, format_args!("Fault: {}", metrics.refreshes_faulted)),
        line(VALUE_COLOR, format_args!("Paint: {}", metrics.elements_painted)),
    ]);
}

fn draw_link_column(
    display: &mut SimulatorDisplay<Rgb565>,
    link: &LinkStatus,
) {
    let screen = match link.lifecycle {
        Lifecycle::Attached => "ATTACHED",
        Lifecycle::Detached => "DETACHED",
        Lifecycle::Destroyed => "DESTROYED",
    };

    draw_column(display, COL3_X, &[
        line(VALUE_COLOR, format_args!("HUD: {screen}")),
        line(VALUE_COLOR, format_args!("WiFi: {}/{}", link.wifi_level.get(), SignalLevel::MAX.get())),
        line(VALUE_COLOR, format_args!("Mode: {}", link.mode.label())),
        line(link.estop.color(), format_args!("Btn:  {}", link.estop.label())),
    ]);
}

fn draw_log_terminal(
    display: &mut SimulatorDisplay<Rgb565>,
    log: &DebugLog,
) {
    let prompt_style = MonoTextStyle::new(LABEL_FONT, LOG_PROMPT_COLOR);

    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(Rgb565::new(1, 2, 1)))
    .draw(display)
    .ok();

    let mut y = LOG_Y;

    for entry in log.iter() {
        let color = if entry.level() <= Level::Warn { LOG_WARN_COLOR } else { LOG_TEXT_COLOR };
        let mut tag: String<4> = String::new();
        let _ = write!(tag, "{}>", entry.tag());
        Text::new(&tag, Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(entry.text(), Point::new(COL1_X + 16, y), MonoTextStyle::new(LABEL_FONT, color))
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }

    Text::new("> _", Point::new(COL1_X, y), prompt_style).draw(display).ok();
}

fn draw_horizontal_line(
    display: &mut SimulatorDisplay<Rgb565>,
    y: i32,
) {
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}
