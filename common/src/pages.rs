//! Page navigation.
//!
//! The HUD is the operator page. The debug page (frame timing, refresh counters,
//! event log) is reached with a single toggle and never shown on start.

/// Display page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Hud,
    Debug,
}

impl Page {
    /// The other page.
    #[inline]
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Hud => Self::Debug,
            Self::Debug => Self::Hud,
        }
    }

    /// Telemetry refreshes only paint while this page is shown.
    #[inline]
    pub const fn shows_hud(self) -> bool { matches!(self, Self::Hud) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_hud() {
        assert_eq!(Page::default(), Page::Hud);
        assert!(Page::default().shows_hud());
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Page::Hud.toggle(), Page::Debug);
        assert_eq!(Page::Hud.toggle().toggle(), Page::Hud);
        assert!(!Page::Debug.shows_hud());
    }
}
