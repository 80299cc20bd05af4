//! Pre-computed static text styles.
//!
//! Styles are `const` so draw functions reference them directly instead of
//! building a `MonoTextStyle` every frame. Coordinate readouts use the
//! ISO-8859-1 font because they contain the degree sign, which the ASCII fonts
//! do not have.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::FONT_6X10,
        iso_8859_1::{FONT_7X13, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_18_POINT;

use crate::colors::{ORANGE, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for readout values and button labels.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for the header title and the debug log.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References
// =============================================================================

/// Small label font (6x10 pixels). Exposed for dynamic-color styles on the debug page.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Small orange text for readout labels ("SPEED", "LAT", ...).
pub const LABEL_STYLE_ORANGE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, ORANGE);

/// Medium white text for the header title and e-stop label.
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large white text for speed and turn-rate values (`ProFont` 18pt).
pub const VALUE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// Coordinate text (7x13, ISO-8859-1 for the degree sign). The widest possible
/// coordinate, `180° 59' 59.99999" W`, still fits in one column.
pub const COORD_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_7X13, WHITE);
