//! The HUD screen and its UI refresher.
//!
//! [`HudScreen::refresh`] is the unit of work the UI loop runs whenever the
//! [`TelemetryStore`] has a pending refresh request. It is idempotent: it
//! reads the latest snapshot at render time, formats every value, and repaints
//! only the elements whose content changed since the last refresh.
//!
//! Layouts are described by [`HudElements`]. Every slot is optional, so a
//! layout without GPS (or without the e-stop button) renders the rest
//! unchanged.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::BLACK;
use crate::config::{COL_WIDTH, ESTOP_HEIGHT, ESTOP_Y, HEADER_HEIGHT, ROW_HEIGHT, SCREEN_WIDTH, WIFI_ICON_HEIGHT, WIFI_ICON_X, WIFI_ICON_Y};
use crate::coords::{Axis, format_coordinate};
use crate::error::RefreshError;
use crate::estop::{EStopState, EmergencyStop, RobotController};
use crate::render::{Element, RenderState, ValueText};
use crate::styles::{COORD_STYLE_WHITE, VALUE_STYLE_WHITE};
use crate::telemetry::TelemetryStore;
use crate::widgets::{
    draw_cell_background,
    draw_dividers,
    draw_estop_button,
    draw_header,
    draw_readout_label,
    draw_readout_value,
    draw_wifi_icon,
};

pub use crate::render::ElementMask;

/// Title shown in the header bar.
pub const HUD_TITLE: &str = "ROBOT HUD";

// =============================================================================
// Value Formatting
// =============================================================================

/// Drop everything past the second decimal, toward zero.
///
/// `1.236 -> 1.23`, `-1.236 -> -1.23`. Truncation, not rounding.
#[inline]
pub fn truncate_hundredths(value: f64) -> f64 { (value * 100.0) as i64 as f64 / 100.0 }

/// Speed readout text, e.g. `"1.23 m/s"`.
pub fn speed_text(speed: f64) -> ValueText {
    let mut text = ValueText::new();
    let _ = write!(text, "{:.2} m/s", truncate_hundredths(speed));
    text
}

/// Turn-rate readout text, e.g. `"-0.50 rad/s"`.
pub fn turn_rate_text(turn_rate: f64) -> ValueText {
    let mut text = ValueText::new();
    let _ = write!(text, "{:.2} rad/s", truncate_hundredths(turn_rate));
    text
}

// =============================================================================
// Layout
// =============================================================================

const fn cell(
    col: u32,
    row: u32,
) -> Rectangle {
    Rectangle::new(
        Point::new((col * COL_WIDTH) as i32, (HEADER_HEIGHT + row * ROW_HEIGHT) as i32),
        Size::new(COL_WIDTH, ROW_HEIGHT),
    )
}

/// Where each element sits. `None` means the layout has no such element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudElements {
    pub speed: Option<Rectangle>,
    pub turn_rate: Option<Rectangle>,
    pub latitude: Option<Rectangle>,
    pub longitude: Option<Rectangle>,
    /// Bottom-left corner of the Wi-Fi icon.
    pub wifi: Option<Point>,
    pub emergency_stop: Option<Rectangle>,
}

impl HudElements {
    /// Every element: 2x2 readout grid, Wi-Fi icon in the header, e-stop strip.
    pub const FULL: Self = Self {
        speed: Some(cell(0, 0)),
        turn_rate: Some(cell(1, 0)),
        latitude: Some(cell(0, 1)),
        longitude: Some(cell(1, 1)),
        wifi: Some(Point::new(WIFI_ICON_X, WIFI_ICON_Y + WIFI_ICON_HEIGHT as i32 - 1)),
        emergency_stop: Some(Rectangle::new(
            Point::new(0, ESTOP_Y as i32),
            Size::new(SCREEN_WIDTH, ESTOP_HEIGHT),
        )),
    };

    /// Motion and signal only; no GPS readouts, no e-stop button.
    pub const COMPACT: Self = Self {
        latitude: None,
        longitude: None,
        emergency_stop: None,
        ..Self::FULL
    };

    /// No elements at all. Refreshes succeed and paint nothing but the header.
    pub const EMPTY: Self = Self {
        speed: None,
        turn_rate: None,
        latitude: None,
        longitude: None,
        wifi: None,
        emergency_stop: None,
    };

    /// Area of a readout element (speed, turn rate, latitude, longitude).
    pub const fn readout(
        &self,
        element: Element,
    ) -> Option<Rectangle> {
        match element {
            Element::Speed => self.speed,
            Element::TurnRate => self.turn_rate,
            Element::Latitude => self.latitude,
            Element::Longitude => self.longitude,
            Element::Wifi | Element::EmergencyStop => None,
        }
    }

    /// Elements present in this layout.
    pub const fn present(&self) -> ElementMask {
        let mut mask = ElementMask::EMPTY;
        if self.speed.is_some() {
            mask = mask.with(Element::Speed);
        }
        if self.turn_rate.is_some() {
            mask = mask.with(Element::TurnRate);
        }
        if self.latitude.is_some() {
            mask = mask.with(Element::Latitude);
        }
        if self.longitude.is_some() {
            mask = mask.with(Element::Longitude);
        }
        if self.wifi.is_some() {
            mask = mask.with(Element::Wifi);
        }
        if self.emergency_stop.is_some() {
            mask = mask.with(Element::EmergencyStop);
        }
        mask
    }

    const fn has_gps(&self) -> bool { self.latitude.is_some() || self.longitude.is_some() }
}

impl Default for HudElements {
    fn default() -> Self { Self::FULL }
}

// =============================================================================
// Screen
// =============================================================================

/// The HUD screen: layout, emergency-stop state, and what is on the display.
pub struct HudScreen {
    elements: HudElements,
    estop: EmergencyStop,
    render: RenderState,
}

impl HudScreen {
    pub const fn new(elements: HudElements) -> Self {
        Self {
            elements,
            estop: EmergencyStop::new(),
            render: RenderState::new(),
        }
    }

    #[inline]
    pub const fn elements(&self) -> &HudElements { &self.elements }

    /// Switch layout. The next refresh clears and repaints the screen.
    pub fn set_elements(
        &mut self,
        elements: HudElements,
    ) {
        self.elements = elements;
        self.render.invalidate();
    }

    /// Forget what is on screen (display cleared, popup closed, page switched).
    #[inline]
    pub fn invalidate(&mut self) { self.render.invalidate(); }

    #[inline]
    pub const fn estop_state(&self) -> EStopState { self.estop.state() }

    /// Text last painted into a readout element.
    #[inline]
    pub fn shown_text(
        &self,
        element: Element,
    ) -> Option<&str> {
        self.render.text(element)
    }

    /// Emergency-stop press. The button repaints on the next refresh.
    pub fn press_emergency_stop<C>(
        &mut self,
        controller: &C,
    ) -> Option<EStopState>
    where
        C: RobotController + ?Sized,
    {
        self.estop.press(controller)
    }

    /// External plan/control-mode change; forces the button to Running.
    pub fn control_mode_changed(&mut self) { self.estop.control_mode_changed(); }

    /// Paint the latest telemetry. Returns the elements that were repainted.
    ///
    /// Fails with [`RefreshError::Detached`]/[`RefreshError::Destroyed`] without
    /// touching the display when the screen is not attached, and with
    /// [`RefreshError::Draw`] if the display rejects a write.
    pub fn refresh<D, C>(
        &mut self,
        display: &mut D,
        store: &TelemetryStore,
        controller: &C,
    ) -> Result<ElementMask, RefreshError>
    where
        D: DrawTarget<Color = Rgb565>,
        C: RobotController + ?Sized,
    {
        store.ensure_attached()?;

        if self.render.need_chrome() {
            self.draw_chrome(display).map_err(|_| RefreshError::Draw)?;
            self.render.mark_chrome_drawn();
        }

        // Read at render time, not when the refresh was requested
        let snapshot = store.snapshot();
        let mut painted = ElementMask::EMPTY;

        self.paint_text(display, Element::Speed, &speed_text(snapshot.speed), &mut painted)?;
        self.paint_text(display, Element::TurnRate, &turn_rate_text(snapshot.turn_rate), &mut painted)?;

        if self.elements.has_gps() {
            if let Some(location) = controller.last_known_location() {
                for (element, value, axis) in [
                    (Element::Latitude, location.latitude, Axis::Latitude),
                    (Element::Longitude, location.longitude, Axis::Longitude),
                ] {
                    match format_coordinate(value, axis) {
                        Ok(text) => self.paint_text(display, element, &text, &mut painted)?,
                        Err(e) => log::debug!("{element:?} not shown: {e}"),
                    }
                }
            }
        }

        if let Some(origin) = self.elements.wifi {
            let icon = snapshot.wifi_level.icon();
            if self.render.wifi_changed(icon) {
                draw_wifi_icon(display, origin, icon).map_err(|_| RefreshError::Draw)?;
                self.render.remember_wifi(icon);
                painted.insert(Element::Wifi);
            }
        }

        if let Some(area) = self.elements.emergency_stop {
            let state = self.estop.state();
            if self.render.estop_changed(state) {
                draw_estop_button(display, area, state).map_err(|_| RefreshError::Draw)?;
                self.render.remember_estop(state);
                painted.insert(Element::EmergencyStop);
            }
        }

        Ok(painted)
    }

    /// Write `text` into a readout element if the layout has it and it changed.
    fn paint_text<D>(
        &mut self,
        display: &mut D,
        element: Element,
        text: &ValueText,
        painted: &mut ElementMask,
    ) -> Result<(), RefreshError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(cell) = self.elements.readout(element) else {
            return Ok(());
        };
        if !self.render.text_changed(element, text) {
            return Ok(());
        }

        let style = match element {
            Element::Latitude | Element::Longitude => COORD_STYLE_WHITE,
            _ => VALUE_STYLE_WHITE,
        };
        draw_readout_value(display, cell, text, style).map_err(|_| RefreshError::Draw)?;
        self.render.remember_text(element, text);
        painted.insert(element);
        Ok(())
    }

    fn draw_chrome<D>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(BLACK)?;
        draw_header(display, HUD_TITLE)?;
        for element in [Element::Speed, Element::TurnRate, Element::Latitude, Element::Longitude] {
            if let Some(cell) = self.elements.readout(element) {
                draw_cell_background(display, cell, BLACK)?;
                draw_readout_label(display, cell, element.label())?;
            }
        }
        draw_dividers(display)
    }
}

impl Default for HudScreen {
    fn default() -> Self { Self::new(HudElements::FULL) }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::colors::{EMERGENCY_STOP_GREEN, EMERGENCY_STOP_RED};
    use crate::coords::Location;
    use crate::signal::SignalLevel;
    use crate::telemetry::Odometry;
    use crate::test_display::RecordingDisplay;

    #[derive(Default)]
    struct FakeRobot {
        location: Cell<Option<Location>>,
        location_reads: Cell<u32>,
        can_stop: bool,
    }

    impl RobotController for FakeRobot {
        fn resume_plan(&self) -> bool { false }

        fn stop_robot(&self) -> bool { self.can_stop }

        fn last_known_location(&self) -> Option<Location> {
            self.location_reads.set(self.location_reads.get() + 1);
            self.location.get()
        }
    }

    fn attached_store() -> TelemetryStore {
        let store = TelemetryStore::new();
        store.attach().unwrap();
        store
    }

    #[test]
    fn test_truncate_hundredths() {
        assert_eq!(truncate_hundredths(1.236), 1.23);
        assert_eq!(truncate_hundredths(-1.236), -1.23);
        assert_eq!(truncate_hundredths(1.999), 1.99);
        assert_eq!(truncate_hundredths(0.0), 0.0);
    }

    #[test]
    fn test_speed_text_truncates() {
        assert_eq!(speed_text(1.236).as_str(), "1.23 m/s");
        assert_eq!(speed_text(-0.004).as_str(), "0.00 m/s");
        assert_eq!(turn_rate_text(-1.236).as_str(), "-1.23 rad/s");
    }

    #[test]
    fn test_layout_presence() {
        assert_eq!(HudElements::FULL.present().len(), 6);
        let compact = HudElements::COMPACT.present();
        assert!(compact.contains(Element::Speed));
        assert!(compact.contains(Element::Wifi));
        assert!(!compact.contains(Element::Latitude));
        assert!(!compact.contains(Element::EmergencyStop));
        assert!(HudElements::EMPTY.present().is_empty());
    }

    #[test]
    fn test_full_refresh_paints_every_element() {
        let store = attached_store();
        store.on_new_message(&Odometry::from_velocity(1.236, 0.5)).unwrap();
        let robot = FakeRobot::default();
        robot.location.set(Some(Location::new(-37.504_166_666_666_67, 144.5)));
        let mut screen = HudScreen::new(HudElements::FULL);
        let mut display = RecordingDisplay::new();

        let painted = screen.refresh(&mut display, &store, &robot).unwrap();

        assert_eq!(painted, HudElements::FULL.present());
        assert_eq!(screen.shown_text(Element::Speed), Some("1.23 m/s"));
        assert_eq!(screen.shown_text(Element::TurnRate), Some("0.50 rad/s"));
        assert_eq!(screen.shown_text(Element::Latitude), Some("37° 30' 15\" S"));
        assert_eq!(screen.shown_text(Element::Longitude), Some("144° 30' 0\" E"));
        assert_eq!(robot.location_reads.get(), 1, "location fetched once per refresh");
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();

        screen.refresh(&mut display, &store, &robot).unwrap();
        display.reset_count();
        let painted = screen.refresh(&mut display, &store, &robot).unwrap();

        assert!(painted.is_empty(), "nothing changed, nothing repainted");
        assert_eq!(display.drawn(), 0);
    }

    #[test]
    fn test_refresh_reads_latest_snapshot() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();

        // Two messages before the UI gets to run; one refresh shows the second
        store.on_new_message(&Odometry::from_velocity(1.0, 0.0)).unwrap();
        store.on_new_message(&Odometry::from_velocity(2.5, 0.0)).unwrap();
        assert!(store.take_refresh().is_some());

        screen.refresh(&mut display, &store, &robot).unwrap();
        assert_eq!(screen.shown_text(Element::Speed), Some("2.50 m/s"));
        assert!(store.take_refresh().is_none());
    }

    #[test]
    fn test_absent_elements_are_noop() {
        let store = attached_store();
        let robot = FakeRobot::default();
        robot.location.set(Some(Location::new(10.0, 20.0)));
        let mut screen = HudScreen::new(HudElements::COMPACT);
        let mut display = RecordingDisplay::new();

        let painted = screen.refresh(&mut display, &store, &robot).unwrap();

        assert!(painted.contains(Element::Speed));
        assert!(!painted.contains(Element::Latitude));
        assert!(!painted.contains(Element::EmergencyStop));
        assert_eq!(screen.shown_text(Element::Latitude), None);
        assert_eq!(robot.location_reads.get(), 0, "no GPS elements, no location lookup");
    }

    #[test]
    fn test_empty_layout_never_fails() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::new(HudElements::EMPTY);
        let mut display = RecordingDisplay::new();

        assert_eq!(screen.refresh(&mut display, &store, &robot), Ok(ElementMask::EMPTY));
    }

    #[test]
    fn test_missing_location_leaves_gps_blank() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();

        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert!(!painted.contains(Element::Latitude));
        assert!(!painted.contains(Element::Longitude));
        assert!(painted.contains(Element::Speed));
    }

    #[test]
    fn test_invalid_coordinate_skips_only_that_element() {
        let store = attached_store();
        let robot = FakeRobot::default();
        robot.location.set(Some(Location::new(f64::NAN, -122.5)));
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();

        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert!(!painted.contains(Element::Latitude));
        assert_eq!(screen.shown_text(Element::Longitude), Some("122° 30' 0\" W"));
    }

    #[test]
    fn test_detached_refresh_draws_nothing() {
        let store = TelemetryStore::new();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();

        assert_eq!(screen.refresh(&mut display, &store, &robot), Err(RefreshError::Detached));
        store.destroy();
        assert_eq!(screen.refresh(&mut display, &store, &robot), Err(RefreshError::Destroyed));
        assert_eq!(display.drawn(), 0);
    }

    #[test]
    fn test_draw_failure_reported() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();
        display.fail = true;

        assert_eq!(screen.refresh(&mut display, &store, &robot), Err(RefreshError::Draw));

        // Recovers once the display works again: chrome was never marked drawn
        display.fail = false;
        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert!(painted.contains(Element::Speed));
    }

    #[test]
    fn test_wifi_icon_repaints_on_level_change() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();
        screen.refresh(&mut display, &store, &robot).unwrap();

        store.record_signal_level(SignalLevel::new(3));
        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert_eq!(painted, ElementMask::EMPTY.with(Element::Wifi));
    }

    #[test]
    fn test_estop_button_follows_press() {
        let store = attached_store();
        let robot = FakeRobot {
            can_stop: true,
            ..Default::default()
        };
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();
        let probe = Point::new(20, (ESTOP_Y + ESTOP_HEIGHT / 2) as i32);

        screen.refresh(&mut display, &store, &robot).unwrap();
        assert_eq!(display.pixel(probe.x, probe.y), Some(EMERGENCY_STOP_RED));

        assert_eq!(screen.press_emergency_stop(&robot), Some(EStopState::Stopped));
        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert!(painted.contains(Element::EmergencyStop));
        assert_eq!(display.pixel(probe.x, probe.y), Some(EMERGENCY_STOP_GREEN));

        screen.control_mode_changed();
        screen.refresh(&mut display, &store, &robot).unwrap();
        assert_eq!(display.pixel(probe.x, probe.y), Some(EMERGENCY_STOP_RED));
    }

    #[test]
    fn test_set_elements_forces_full_repaint() {
        let store = attached_store();
        let robot = FakeRobot::default();
        let mut screen = HudScreen::default();
        let mut display = RecordingDisplay::new();
        screen.refresh(&mut display, &store, &robot).unwrap();

        screen.set_elements(HudElements::COMPACT);
        let painted = screen.refresh(&mut display, &store, &robot).unwrap();
        assert_eq!(painted, ElementMask::EMPTY.with(Element::Speed).with(Element::TurnRate).with(Element::Wifi));
    }
}
