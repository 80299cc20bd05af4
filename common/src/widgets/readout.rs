//! Labeled value cells (speed, turn rate, latitude, longitude).
//!
//! A cell is drawn in two parts so the refresher can repaint only what changed:
//! the static frame (label) once per clear, and the value every time it changes.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::colors::BLACK;
use crate::styles::{LABEL_STYLE_ORANGE, LEFT_ALIGNED};

/// Label baseline offset from the cell's top edge.
const LABEL_OFFSET: Point = Point::new(6, 14);

/// Value band starts this far below the cell's top edge.
const VALUE_TOP: u32 = 20;

const VALUE_CLEAR: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

const VALUE_TEXT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Draw the cell label in its top-left corner.
pub fn draw_readout_label<D>(
    display: &mut D,
    cell: Rectangle,
    label: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(label, cell.top_left + LABEL_OFFSET, LABEL_STYLE_ORANGE, LEFT_ALIGNED)
        .draw(display)
        .map(|_| ())
}

/// Area repainted when a value changes: the cell below the label, inset 2px.
pub fn value_area(cell: Rectangle) -> Rectangle {
    let height = cell.size.height.saturating_sub(VALUE_TOP + 2);
    let width = cell.size.width.saturating_sub(4);
    Rectangle::new(cell.top_left + Point::new(2, VALUE_TOP as i32), Size::new(width, height))
}

/// Clear the value band and draw `text` centered in it.
pub fn draw_readout_value<D>(
    display: &mut D,
    cell: Rectangle,
    text: &str,
    style: MonoTextStyle<'_, Rgb565>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = value_area(cell);
    area.into_styled(VALUE_CLEAR).draw(display)?;

    Text::with_text_style(text, area.center(), style, VALUE_TEXT)
        .draw(display)
        .map(|_| ())
}
