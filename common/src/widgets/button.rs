//! Emergency-stop button.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::colors::WHITE;
use crate::estop::EStopState;
use crate::styles::TITLE_STYLE_WHITE;

const CORNER: Size = Size::new(8, 8);
const LABEL_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

fn button_style(state: EStopState) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .fill_color(state.color())
        .stroke_color(WHITE)
        .stroke_width(2)
        .build()
}

/// Draw the button filling `area` (inset 4px) with the label for `state`.
pub fn draw_estop_button<D>(
    display: &mut D,
    area: Rectangle,
    state: EStopState,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let body = area.offset(-4);
    RoundedRectangle::with_equal_corners(body, CORNER)
        .into_styled(button_style(state))
        .draw(display)?;

    Text::with_text_style(state.label(), body.center(), TITLE_STYLE_WHITE, LABEL_STYLE).draw(display)?;
    Ok(())
}
