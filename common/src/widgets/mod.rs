//! Widget components for the HUD display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` and return the
//! target's error, so the refresher can report a failed write while chrome
//! drawing elsewhere may simply ignore it.

mod button;
mod header;
mod popups;
mod primitives;
mod readout;

pub use button::draw_estop_button;
pub use header::{draw_dividers, draw_header};
pub use popups::draw_popup;
pub use primitives::{draw_cell_background, draw_wifi_icon};
pub use readout::{draw_readout_label, draw_readout_value, value_area};
