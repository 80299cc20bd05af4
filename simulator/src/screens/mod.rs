//! Full-screen pages other than the HUD.

mod debug;

pub use debug::{LinkStatus, draw_debug_page};
