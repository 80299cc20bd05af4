//! Robot telemetry HUD simulator for desktop.
//!
//! Runs the HUD screen in an `embedded-graphics-simulator` window with a
//! simulated robot behind it. Two background tasks feed the shared telemetry
//! store: an odometry publisher (10 Hz) and the Wi-Fi poller (1 Hz). The UI loop
//! takes pending refresh requests and repaints the latest snapshot.
//!
//! Keys:
//! - `S`: emergency stop / resume
//! - `M`: switch control mode (new plan / manual)
//! - `L`: toggle full / compact layout
//! - `D`: detach / attach the HUD
//! - `Y`: toggle HUD / debug page

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

mod periodic;
mod popup;
mod profiling;
mod robot;
mod screens;
mod timing;
mod wifi;

use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::Result;
use critical_section as _;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::Level;
use robot_hud_common::colors::BLACK;
use robot_hud_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use robot_hud_common::debug_log::DebugLog;
use robot_hud_common::signal::poll_once;
use robot_hud_common::{
    EStopState,
    HudElements,
    HudScreen,
    Lifecycle,
    Location,
    Page,
    RefreshError,
    RefreshReason,
    TelemetryStore,
};

use crate::periodic::PeriodicTask;
use crate::popup::Popup;
use crate::profiling::ProfilingMetrics;
use crate::robot::{Mode, SimulatedRobot};
use crate::screens::{LinkStatus, draw_debug_page};
use crate::timing::{FRAME_TIME, ODOMETRY_INTERVAL, POLL_INTERVAL};
use crate::wifi::SimulatedWifi;

/// Where the simulated robot starts.
const START_LOCATION: Location = Location::new(-33.8568, 151.2153);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = Arc::new(TelemetryStore::new());
    let robot = Arc::new(SimulatedRobot::new(START_LOCATION));

    store.attach()?;

    let tasks = [
        spawn_odometry_publisher(Arc::clone(&store), Arc::clone(&robot))?,
        spawn_wifi_poller(Arc::clone(&store))?,
    ];

    let result = run_ui(&store, &robot);

    // Destroy first so neither task can request another refresh, then join
    store.destroy();
    for task in tasks {
        let name = task.name();
        task.stop();
        log::debug!("{name} joined");
    }
    result
}

fn spawn_odometry_publisher(
    store: Arc<TelemetryStore>,
    robot: Arc<SimulatedRobot>,
) -> Result<PeriodicTask> {
    let dt = ODOMETRY_INTERVAL.as_secs_f64();
    PeriodicTask::spawn("odometry", ODOMETRY_INTERVAL, move || {
        let odometry = robot.step(dt);
        match store.on_new_message(&odometry) {
            Ok(()) | Err(RefreshError::Detached) => ControlFlow::Continue(()),
            Err(e) => {
                log::debug!("odometry publisher done: {e}");
                ControlFlow::Break(())
            }
        }
    })
}

fn spawn_wifi_poller(store: Arc<TelemetryStore>) -> Result<PeriodicTask> {
    let mut wifi = SimulatedWifi::new();
    PeriodicTask::spawn("wifi-poller", POLL_INTERVAL, move || {
        if store.lifecycle() == Lifecycle::Destroyed {
            return ControlFlow::Break(());
        }
        let outcome = poll_once(&mut wifi, &store);
        log::trace!("rssi {} dBm -> level {}", outcome.rssi, outcome.level.get());
        ControlFlow::Continue(())
    })
}

/// Window event loop. Returns when the window is closed.
fn run_ui(
    store: &TelemetryStore,
    robot: &SimulatedRobot,
) -> Result<()> {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Robot HUD Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let mut screen = HudScreen::new(HudElements::FULL);
    let mut current_page = Page::default();
    let mut active_popup: Option<Popup> = None;
    let mut popup_dirty = false;

    // FPS
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    // Profiling
    let mut metrics = ProfilingMetrics::new();
    let mut events = DebugLog::new();
    events.record(Level::Info, "HUD started");

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    log::info!("window closed");
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let now = Instant::now();
                    match keycode {
                        Keycode::S if current_page.shows_hud() => {
                            let outcome = screen.press_emergency_stop(robot);
                            events.record(
                                Level::Info,
                                match outcome {
                                    Some(EStopState::Stopped) => "E-stop: robot stopped",
                                    Some(EStopState::Running) => "E-stop: plan resumed",
                                    None => "E-stop: no effect",
                                },
                            );
                            active_popup = Some(Popup::EStop(now, outcome));
                            store.request_refresh(RefreshReason::Redraw);
                        }
                        Keycode::M if current_page.shows_hud() => {
                            let new_plan = matches!(robot.mode(), Mode::Manual | Mode::Stopped);
                            if new_plan {
                                robot.start_plan();
                            } else {
                                robot.take_manual_control();
                            }
                            screen.control_mode_changed();
                            events.record(Level::Info, if new_plan { "Mode: new plan" } else { "Mode: manual" });
                            active_popup = Some(Popup::ControlMode(now, new_plan));
                            store.request_refresh(RefreshReason::Redraw);
                        }
                        Keycode::L if current_page.shows_hud() => {
                            let compact = *screen.elements() == HudElements::FULL;
                            screen.set_elements(if compact { HudElements::COMPACT } else { HudElements::FULL });
                            events.record(Level::Info, if compact { "Layout: compact" } else { "Layout: full" });
                            active_popup = Some(Popup::Layout(now, compact));
                            store.request_refresh(RefreshReason::Redraw);
                        }
                        Keycode::D if current_page.shows_hud() => {
                            let attach = store.lifecycle() == Lifecycle::Detached;
                            if attach {
                                store.attach()?;
                                screen.invalidate();
                                events.record(Level::Info, "HUD attached");
                            } else {
                                store.detach();
                                events.record(Level::Info, "HUD detached");
                            }
                            active_popup = Some(Popup::Lifecycle(now, attach));
                        }
                        Keycode::Y => {
                            current_page = current_page.toggle();
                            events.record(
                                Level::Debug,
                                if current_page.shows_hud() { "Page: HUD" } else { "Page: Debug" },
                            );
                            if current_page.shows_hud() {
                                screen.invalidate();
                                store.request_refresh(RefreshReason::Redraw);
                            }
                        }
                        _ => continue,
                    }
                    popup_dirty = true;
                }
                _ => {}
            }
        }

        // Check popup expiration; a full repaint clears it
        if let Some(ref popup) = active_popup
            && !popup.is_sticky()
            && popup.is_expired()
        {
            active_popup = None;
            screen.invalidate();
            store.request_refresh(RefreshReason::Redraw);
        }

        // Render based on current page
        match current_page {
            Page::Hud => {
                if let Some(reason) = store.take_refresh() {
                    metrics.inc_requested();
                    match screen.refresh(&mut display, store, robot) {
                        Ok(painted) => {
                            log::trace!("refresh ({reason:?}) painted {} elements", painted.len());
                            popup_dirty |= !painted.is_empty();
                            metrics.record_rendered(painted);
                        }
                        Err(e) if e.is_lifecycle() => {
                            log::trace!("refresh ({reason:?}) skipped: {e}");
                            metrics.inc_skipped();
                        }
                        Err(e) => {
                            log::debug!("refresh ({reason:?}) dropped: {e}");
                            events.record(Level::Warn, "Refresh failed");
                            metrics.inc_faulted();
                        }
                    }
                }

                if popup_dirty && let Some(ref popup) = active_popup {
                    popup.draw(&mut display).ok();
                }
                popup_dirty = false;
            }

            Page::Debug => {
                let link = LinkStatus {
                    lifecycle: store.lifecycle(),
                    wifi_level: store.snapshot().wifi_level,
                    estop: screen.estop_state(),
                    mode: robot.mode(),
                };
                draw_debug_page(&mut display, &metrics, &events, &link, current_fps);
            }
        }

        let render_time = frame_start.elapsed();

        window.update(&display);

        // FPS calculation
        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }
}
