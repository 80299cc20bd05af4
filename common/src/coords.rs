//! GPS coordinate formatting.
//!
//! Coordinates are shown as degrees, minutes and seconds with a hemisphere
//! suffix instead of a sign. Formatting is two steps:
//!
//! 1. [`convert_seconds`]: decimal degrees to `"[-]D:M:S.sssss"`. Seconds keep
//!    at most five decimals with trailing zeros removed (`37.504166…` becomes
//!    `"37:30:15"`).
//! 2. [`lat_long_string`]: replace the separators with `°` and `'`, close with
//!    `"`, and turn the sign into `N`/`S` or `E`/`W`.
//!
//! ```ignore
//! let raw = convert_seconds(-37.504_166_666)?;           // "-37:30:15"
//! let text = lat_long_string(&raw, Axis::Latitude);      // "37° 30' 15\" S"
//! ```

use core::fmt::Write;

use heapless::String;

use crate::error::CoordinateError;

/// Capacity for coordinate text. `180° 59' 59.99999" W` is 22 bytes in UTF-8.
pub const COORD_TEXT_LEN: usize = 32;

/// Coordinate text buffer.
pub type CoordText = String<COORD_TEXT_LEN>;

/// Last known position of the robot, in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self { latitude, longitude }
    }
}

/// Which coordinate is being formatted. Decides the hemisphere letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Hemisphere letter for a non-negative / negative coordinate.
    #[inline]
    pub const fn hemisphere(
        self,
        negative: bool,
    ) -> char {
        match (self, negative) {
            (Self::Latitude, false) => 'N',
            (Self::Latitude, true) => 'S',
            (Self::Longitude, false) => 'E',
            (Self::Longitude, true) => 'W',
        }
    }
}

/// Convert decimal degrees to `"[-]D:M:S"` (seconds with up to 5 decimals).
///
/// Fails for NaN or values outside `[-180, 180]`.
pub fn convert_seconds(coordinate: f64) -> Result<CoordText, CoordinateError> {
    if coordinate.is_nan() {
        return Err(CoordinateError::NotANumber);
    }
    if !(-180.0..=180.0).contains(&coordinate) {
        return Err(CoordinateError::OutOfRange(coordinate));
    }

    let mut out = CoordText::new();
    let mut rest = coordinate;
    if rest < 0.0 {
        out.push('-').ok();
        rest = -rest;
    }

    // Non-negative here, so `as` truncation is floor
    let degrees = rest as u32;
    rest = (rest - f64::from(degrees)) * 60.0;
    let minutes = rest as u32;
    rest = (rest - f64::from(minutes)) * 60.0;

    let _ = write!(out, "{degrees}:{minutes}:");

    let mut seconds: String<16> = String::new();
    let _ = write!(seconds, "{rest:.5}");
    out.push_str(trim_decimal_zeros(&seconds)).ok();

    Ok(out)
}

/// `"12.50000"` -> `"12.5"`, `"15.00000"` -> `"15"`.
fn trim_decimal_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Turn `"[-]D:M:S"` into `D° M' S" H` where `H` is the hemisphere letter.
///
/// The first `:` becomes `"° "`, the second `"' "`. Any `-` marks the southern
/// or western hemisphere and is removed from the output.
pub fn lat_long_string(
    raw: &str,
    axis: Axis,
) -> CoordText {
    let mut out = CoordText::new();
    let mut separators = 0u8;
    let mut negative = false;

    for c in raw.chars() {
        match c {
            '-' => negative = true,
            ':' if separators == 0 => {
                out.push_str("° ").ok();
                separators += 1;
            }
            ':' if separators == 1 => {
                out.push_str("' ").ok();
                separators += 1;
            }
            _ => {
                out.push(c).ok();
            }
        }
    }

    out.push('"').ok();
    out.push(' ').ok();
    out.push(axis.hemisphere(negative)).ok();
    out
}

/// Both steps for one coordinate.
pub fn format_coordinate(
    value: f64,
    axis: Axis,
) -> Result<CoordText, CoordinateError> {
    let raw = convert_seconds(value)?;
    Ok(lat_long_string(&raw, axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_long_string_south() {
        assert_eq!(lat_long_string("-37:30:15", Axis::Latitude).as_str(), "37° 30' 15\" S");
    }

    #[test]
    fn test_lat_long_string_north() {
        assert_eq!(lat_long_string("37:30:15", Axis::Latitude).as_str(), "37° 30' 15\" N");
    }

    #[test]
    fn test_lat_long_string_longitude() {
        assert_eq!(lat_long_string("-122:25:9.5", Axis::Longitude).as_str(), "122° 25' 9.5\" W");
        assert_eq!(lat_long_string("122:25:9.5", Axis::Longitude).as_str(), "122° 25' 9.5\" E");
    }

    #[test]
    fn test_convert_seconds_whole_values() {
        // 37 + 30/60 + 15/3600
        assert_eq!(convert_seconds(37.504_166_666_666_67).unwrap().as_str(), "37:30:15");
        assert_eq!(convert_seconds(-37.504_166_666_666_67).unwrap().as_str(), "-37:30:15");
        assert_eq!(convert_seconds(0.0).unwrap().as_str(), "0:0:0");
    }

    #[test]
    fn test_convert_seconds_keeps_five_decimals() {
        // 10 + 0/60 + 1.23456/3600
        let text = convert_seconds(10.000_342_933_333_333).unwrap();
        assert_eq!(text.as_str(), "10:0:1.23456");
    }

    #[test]
    fn test_convert_seconds_limits() {
        assert_eq!(convert_seconds(180.0).unwrap().as_str(), "180:0:0");
        assert_eq!(convert_seconds(-180.0).unwrap().as_str(), "-180:0:0");
        assert_eq!(convert_seconds(180.5), Err(CoordinateError::OutOfRange(180.5)));
        assert_eq!(convert_seconds(f64::NAN), Err(CoordinateError::NotANumber));
        assert!(convert_seconds(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_format_coordinate_end_to_end() {
        let lat = format_coordinate(-33.856_944_444_444_44, Axis::Latitude).unwrap();
        // 33 + 51/60 + 25/3600
        assert_eq!(lat.as_str(), "33° 51' 25\" S");

        let lon = format_coordinate(151.215_277_777_777_78, Axis::Longitude).unwrap();
        // 151 + 12/60 + 55/3600
        assert_eq!(lon.as_str(), "151° 12' 55\" E");
    }

    #[test]
    fn test_widest_coordinate_fits() {
        let text = format_coordinate(-179.999_999, Axis::Longitude).unwrap();
        assert!(text.ends_with(" W"));
        assert!(text.len() < COORD_TEXT_LEN);
    }

    #[test]
    fn test_trim_decimal_zeros() {
        assert_eq!(trim_decimal_zeros("12.50000"), "12.5");
        assert_eq!(trim_decimal_zeros("15.00000"), "15");
        assert_eq!(trim_decimal_zeros("100"), "100");
    }
}
