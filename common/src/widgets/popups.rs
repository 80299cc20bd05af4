//! Non-modal popup overlays for status messages.
//!
//! Popups are drawn over the HUD after a refresh and cleared by a full redraw
//! when they expire.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::WHITE;
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, TITLE_STYLE_WHITE};

const POPUP_WIDTH: u32 = 200;
const POPUP_HEIGHT: u32 = 60;
const POPUP_X: i32 = (SCREEN_WIDTH - POPUP_WIDTH) as i32 / 2;
const POPUP_Y: i32 = (SCREEN_HEIGHT - POPUP_HEIGHT) as i32 / 2;

const BORDER_POS: Point = Point::new(POPUP_X - 3, POPUP_Y - 3);
const BORDER_SIZE: Size = Size::new(POPUP_WIDTH + 6, POPUP_HEIGHT + 6);
const BG_POS: Point = Point::new(POPUP_X, POPUP_Y);
const BG_SIZE: Size = Size::new(POPUP_WIDTH, POPUP_HEIGHT);

const SINGLE_LINE_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);
const LINE1_POS: Point = Point::new(CENTER_X, CENTER_Y - 5);
const LINE2_POS: Point = Point::new(CENTER_X, CENTER_Y + 15);

const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

/// Draw a centered popup with a white border and `bg` fill.
///
/// One line is vertically centered; with `line2` both lines are stacked.
pub fn draw_popup<D>(
    display: &mut D,
    bg: Rgb565,
    line1: &str,
    line2: Option<&str>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(BORDER_POS, BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)?;

    Rectangle::new(BG_POS, BG_SIZE)
        .into_styled(PrimitiveStyle::with_fill(bg))
        .draw(display)?;

    match line2 {
        Some(second) => {
            Text::with_text_style(line1, LINE1_POS, TITLE_STYLE_WHITE, CENTERED).draw(display)?;
            Text::with_text_style(second, LINE2_POS, TITLE_STYLE_WHITE, CENTERED).draw(display)?;
        }
        None => {
            Text::with_text_style(line1, SINGLE_LINE_POS, TITLE_STYLE_WHITE, CENTERED).draw(display)?;
        }
    }
    Ok(())
}
