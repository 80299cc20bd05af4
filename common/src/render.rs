//! Render state tracking for the HUD refresher.
//!
//! This module provides:
//! - [`Element`] - the display elements a layout may contain
//! - [`ElementMask`] - a set of elements (what a layout has, what a refresh painted)
//! - [`RenderState`] - what is currently on screen, so unchanged elements are skipped
//!
//! # Update Strategy
//!
//! | Element | Repainted when |
//! |---------|----------------|
//! | Chrome (header, labels, dividers) | First refresh / after invalidate |
//! | Speed, turn rate, coordinates | Formatted text differs from what is shown |
//! | Wi-Fi icon | Icon differs |
//! | E-stop button | State differs |
//!
//! Invalidating (layout change, popup closed, page switch) forgets everything,
//! so the next refresh repaints the whole screen.

use heapless::String;

use crate::estop::EStopState;
use crate::signal::WifiIcon;

/// Capacity for a formatted value ("-12345.67 rad/s", coordinate text).
pub const VALUE_TEXT_LEN: usize = 32;

/// Formatted value buffer.
pub type ValueText = String<VALUE_TEXT_LEN>;

/// Display elements of the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Speed,
    TurnRate,
    Latitude,
    Longitude,
    Wifi,
    EmergencyStop,
}

impl Element {
    pub const ALL: [Self; 6] = [
        Self::Speed,
        Self::TurnRate,
        Self::Latitude,
        Self::Longitude,
        Self::Wifi,
        Self::EmergencyStop,
    ];

    #[inline]
    const fn bit(self) -> u8 { 1 << self as u8 }

    /// Text-valued elements have a slot in the text cache.
    const fn text_slot(self) -> Option<usize> {
        match self {
            Self::Speed => Some(0),
            Self::TurnRate => Some(1),
            Self::Latitude => Some(2),
            Self::Longitude => Some(3),
            Self::Wifi | Self::EmergencyStop => None,
        }
    }

    /// Cell label for readouts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "SPEED",
            Self::TurnRate => "TURN RATE",
            Self::Latitude => "LATITUDE",
            Self::Longitude => "LONGITUDE",
            Self::Wifi => "WIFI",
            Self::EmergencyStop => "E-STOP",
        }
    }
}

/// Small bit set of [`Element`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementMask(u8);

impl ElementMask {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn contains(
        self,
        element: Element,
    ) -> bool {
        self.0 & element.bit() != 0
    }

    #[inline]
    pub fn insert(
        &mut self,
        element: Element,
    ) {
        self.0 |= element.bit();
    }

    #[inline]
    pub const fn with(
        self,
        element: Element,
    ) -> Self {
        Self(self.0 | element.bit())
    }

    #[inline]
    pub const fn len(self) -> u32 { self.0.count_ones() }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Iterate contained elements in [`Element::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Element> { Element::ALL.into_iter().filter(move |e| self.contains(*e)) }
}

/// What is currently on screen.
pub struct RenderState {
    chrome_drawn: bool,
    texts: [Option<ValueText>; 4],
    wifi: Option<WifiIcon>,
    estop: Option<EStopState>,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            chrome_drawn: false,
            texts: [None, None, None, None],
            wifi: None,
            estop: None,
        }
    }

    /// Header, labels and dividers need (re)drawing.
    #[inline]
    pub const fn need_chrome(&self) -> bool { !self.chrome_drawn }

    #[inline]
    pub fn mark_chrome_drawn(&mut self) { self.chrome_drawn = true; }

    /// Forget everything on screen. Next refresh repaints all elements.
    pub fn invalidate(&mut self) { *self = Self::new(); }

    /// Text currently shown in `element`, if it is a text element and was painted.
    pub fn text(
        &self,
        element: Element,
    ) -> Option<&str> {
        element
            .text_slot()
            .and_then(|slot| self.texts[slot].as_ref())
            .map(|t| t.as_str())
    }

    /// True if `text` differs from what `element` shows.
    pub fn text_changed(
        &self,
        element: Element,
        text: &str,
    ) -> bool {
        self.text(element) != Some(text)
    }

    pub fn remember_text(
        &mut self,
        element: Element,
        text: &ValueText,
    ) {
        if let Some(slot) = element.text_slot() {
            self.texts[slot] = Some(text.clone());
        }
    }

    #[inline]
    pub fn wifi_changed(
        &self,
        icon: WifiIcon,
    ) -> bool {
        self.wifi != Some(icon)
    }

    #[inline]
    pub fn remember_wifi(
        &mut self,
        icon: WifiIcon,
    ) {
        self.wifi = Some(icon);
    }

    #[inline]
    pub fn estop_changed(
        &self,
        state: EStopState,
    ) -> bool {
        self.estop != Some(state)
    }

    #[inline]
    pub fn remember_estop(
        &mut self,
        state: EStopState,
    ) {
        self.estop = Some(state);
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}
