//! Header bar and divider line rendering.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{GRAY, HEADER_BG};
use crate::config::{COL_WIDTH, ESTOP_Y, HEADER_HEIGHT, ROW_HEIGHT, SCREEN_WIDTH};
use crate::styles::{LEFT_ALIGNED, TITLE_STYLE_WHITE};

const HEADER_TITLE_POS: Point = Point::new(8, 19);
const HEADER_RECT_POS: Point = Point::new(0, 0);
const HEADER_RECT_SIZE: Size = Size::new(SCREEN_WIDTH, HEADER_HEIGHT);

const DIV_V_START: Point = Point::new(COL_WIDTH as i32, HEADER_HEIGHT as i32);
const DIV_V_END: Point = Point::new(COL_WIDTH as i32, ESTOP_Y as i32 - 1);
const DIV_H_START: Point = Point::new(0, (HEADER_HEIGHT + ROW_HEIGHT) as i32);
const DIV_H_END: Point = Point::new((SCREEN_WIDTH - 1) as i32, (HEADER_HEIGHT + ROW_HEIGHT) as i32);
const DIV_ESTOP_START: Point = Point::new(0, ESTOP_Y as i32 - 1);
const DIV_ESTOP_END: Point = Point::new((SCREEN_WIDTH - 1) as i32, ESTOP_Y as i32 - 1);

const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);
const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(HEADER_BG);

/// Draw the header bar with `title` on the left. The Wi-Fi icon is drawn on
/// top of it separately, since it changes independently.
pub fn draw_header<D>(
    display: &mut D,
    title: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(HEADER_RECT_POS, HEADER_RECT_SIZE)
        .into_styled(HEADER_FILL_STYLE)
        .draw(display)?;

    Text::with_text_style(title, HEADER_TITLE_POS, TITLE_STYLE_WHITE, LEFT_ALIGNED).draw(display)?;
    Ok(())
}

/// Grid lines between the four readout cells and above the e-stop strip.
pub fn draw_dividers<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for (start, end) in [
        (DIV_V_START, DIV_V_END),
        (DIV_H_START, DIV_H_END),
        (DIV_ESTOP_START, DIV_ESTOP_END),
    ] {
        Line::new(start, end).into_styled(DIVIDER_STYLE).draw(display)?;
    }
    Ok(())
}
