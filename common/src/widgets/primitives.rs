//! Low-level drawing primitives shared across widgets.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::colors::{GRAY, GREEN};
use crate::config::{WIFI_ICON_HEIGHT, WIFI_ICON_WIDTH};
use crate::signal::WifiIcon;

const BAR_COUNT: u32 = 4;
const BAR_GAP: u32 = 2;
const BAR_WIDTH: u32 = (WIFI_ICON_WIDTH - BAR_GAP * (BAR_COUNT - 1)) / BAR_COUNT;

const LIT_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(GREEN);
const UNLIT_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(GRAY);

/// Fill `area` shrunk by a 2px inset, so neighbouring cells keep a visible gap.
pub fn draw_cell_background<D>(
    display: &mut D,
    area: Rectangle,
    bg_color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if area.size.width < 4 || area.size.height < 4 {
        return Ok(());
    }
    Rectangle::new(area.top_left + Point::new(2, 2), area.size - Size::new(4, 4))
        .into_styled(PrimitiveStyle::with_fill(bg_color))
        .draw(display)
}

/// Draw a four-bar signal icon with its bottom-left corner at `origin`.
///
/// Bars grow left to right; the first `icon.lit_bars()` are lit.
pub fn draw_wifi_icon<D>(
    display: &mut D,
    origin: Point,
    icon: WifiIcon,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let lit = u32::from(icon.lit_bars());
    for bar in 0..BAR_COUNT {
        let height = WIFI_ICON_HEIGHT * (bar + 1) / BAR_COUNT;
        let x = origin.x + (bar * (BAR_WIDTH + BAR_GAP)) as i32;
        let y = origin.y - height as i32 + 1;
        let style = if bar < lit { LIT_FILL } else { UNLIT_FILL };

        Rectangle::new(Point::new(x, y), Size::new(BAR_WIDTH, height))
            .into_styled(style)
            .draw(display)?;
    }
    Ok(())
}
