//! In-memory draw target for rendering tests.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawFailed;

/// Screen-sized framebuffer that remembers which pixels were written.
pub struct RecordingDisplay {
    pixels: Vec<Option<Rgb565>>,
    drawn: usize,
    pub fail: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            pixels: vec![None; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            drawn: 0,
            fail: false,
        }
    }

    /// Color last written at (x, y), `None` if never written or off-screen.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return None;
        }
        self.pixels[(y as u32 * SCREEN_WIDTH + x as u32) as usize]
    }

    /// Total pixel writes since creation or the last [`Self::reset_count`].
    pub fn drawn(&self) -> usize { self.drawn }

    pub fn reset_count(&mut self) { self.drawn = 0; }

    pub fn count_color(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = DrawFailed;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.fail {
            return Err(DrawFailed);
        }
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= SCREEN_WIDTH as i32 || point.y >= SCREEN_HEIGHT as i32 {
                continue;
            }
            self.pixels[(point.y as u32 * SCREEN_WIDTH + point.x as u32) as usize] = Some(color);
            self.drawn += 1;
        }
        Ok(())
    }
}
