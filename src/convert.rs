//! Conversions between sRGB and the other color notations the picker tools work with.
//!
//! Hues are in degrees in `[0, 360)`; saturation, lightness and value are fractions in `[0, 1]`; CMYK components are
//! whole percentages.

use crate::error::{Error, Result};
use palette::{FromColor, Hsl, Hsv, IntoColor, Srgb};
use std::str::FromStr;

pub fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let hsl: Hsl = to_float(rgb).into_color();
    let (h, s, l) = hsl.into_components();

    (h.into_positive_degrees(), s, l)
}

pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let hsl = Hsl::new(hue, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
    from_float(Srgb::from_color(hsl))
}

pub fn rgb_to_hsv(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let hsv: Hsv = to_float(rgb).into_color();
    let (h, s, v) = hsv.into_components();

    (h.into_positive_degrees(), s, v)
}

pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let hsv = Hsv::new(hue, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
    from_float(Srgb::from_color(hsv))
}

/// HSL to HSV without a round trip through RGB. Hue is unchanged.
pub fn hsl_to_hsv(hue: f32, saturation: f32, lightness: f32) -> (f32, f32, f32) {
    let value = lightness + saturation * lightness.min(1.0 - lightness);
    let saturation = if value == 0.0 {
        0.0
    } else {
        2.0 * (1.0 - lightness / value)
    };

    (hue, saturation, value)
}

/// Naive (uncalibrated) CMYK, each component a rounded percentage.
pub fn rgb_to_cmyk((r, g, b): (u8, u8, u8)) -> (u8, u8, u8, u8) {
    let c = 1.0 - r as f32 / 255.0;
    let m = 1.0 - g as f32 / 255.0;
    let y = 1.0 - b as f32 / 255.0;
    let k = c.min(m).min(y);

    if k >= 1.0 {
        return (0, 0, 0, 100);
    }

    let percent = |x: f32| ((x - k) / (1.0 - k) * 100.0).round() as u8;
    (percent(c), percent(m), percent(y), (k * 100.0).round() as u8)
}

/// `#RRGGBB`, uppercase.
pub fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`, in either case.
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).map_err(|err| Error::invalid(format!("bad hex color {hex:?}: {err}")))?;
    Ok(rgb.into_components())
}

/// Whether white text reads better than dark text on top of `rgb`, by Rec. 601 luma.
pub fn is_dark((r, g, b): (u8, u8, u8)) -> bool {
    let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    luma < 0.5
}

fn to_float(rgb: (u8, u8, u8)) -> Srgb<f32> {
    Srgb::from_components(rgb).into_format()
}

fn from_float(rgb: Srgb<f32>) -> (u8, u8, u8) {
    rgb.into_format::<u8>().into_components()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hsl_of_primaries() {
        let (h, s, l) = rgb_to_hsl((255, 0, 0));
        assert_relative_eq!(h, 0.0);
        assert_relative_eq!(s, 1.0);
        assert_relative_eq!(l, 0.5);

        let (h, _, _) = rgb_to_hsl((0, 0, 255));
        assert_relative_eq!(h, 240.0, epsilon = 1e-3);

        let (h, s, l) = rgb_to_hsl((128, 128, 128));
        assert_relative_eq!(h, 0.0);
        assert_relative_eq!(s, 0.0);
        assert_relative_eq!(l, 128.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn hsl_back_to_rgb() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.25), (0, 128, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
    }

    #[test]
    fn hsv_round_trip() {
        let (h, s, v) = rgb_to_hsv((0, 255, 255));
        assert_relative_eq!(h, 180.0, epsilon = 1e-3);
        assert_relative_eq!(s, 1.0);
        assert_relative_eq!(v, 1.0);

        assert_eq!(hsv_to_rgb(h, s, v), (0, 255, 255));
    }

    #[test]
    fn hsl_to_hsv_matches_through_rgb() {
        let (_, s, v) = hsl_to_hsv(200.0, 0.6, 0.4);
        let (_, s_rgb, v_rgb) = rgb_to_hsv(hsl_to_rgb(200.0, 0.6, 0.4));

        assert_relative_eq!(s, s_rgb, epsilon = 1e-2);
        assert_relative_eq!(v, v_rgb, epsilon = 1e-2);
        assert_eq!(hsl_to_hsv(10.0, 0.5, 0.0), (10.0, 0.0, 0.0));
    }

    #[test]
    fn cmyk() {
        assert_eq!(rgb_to_cmyk((0, 0, 0)), (0, 0, 0, 100));
        assert_eq!(rgb_to_cmyk((255, 255, 255)), (0, 0, 0, 0));
        assert_eq!(rgb_to_cmyk((255, 0, 0)), (0, 100, 100, 0));
        assert_eq!(rgb_to_cmyk((0, 128, 128)), (100, 0, 0, 50));
    }

    #[test]
    fn hex() {
        assert_eq!(to_hex((255, 0, 16)), "#FF0010");
        assert_eq!(to_hex((0, 0, 0)), "#000000");

        assert_eq!(parse_hex("#ff0010").unwrap(), (255, 0, 16));
        assert_eq!(parse_hex("FF0010").unwrap(), (255, 0, 16));
        assert_eq!(parse_hex("#fff").unwrap(), (255, 255, 255));
        assert!(matches!(parse_hex("#12345"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_hex("#gg0000"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn dark_text_threshold() {
        assert!(is_dark((0, 0, 0)));
        assert!(is_dark((0, 0, 255)));
        assert!(!is_dark((255, 255, 0)));
        assert!(!is_dark((255, 255, 255)));
    }
}
