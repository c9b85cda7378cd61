use crate::convert::{hsl_to_rgb, rgb_to_hsl};
use std::fmt;

/// The classic color-wheel harmonies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Harmony {
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
    Monochromatic,
}

impl Harmony {
    pub const ALL: [Harmony; 6] = [
        Harmony::Complementary,
        Harmony::Analogous,
        Harmony::Triadic,
        Harmony::Tetradic,
        Harmony::SplitComplementary,
        Harmony::Monochromatic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Harmony::Complementary => "Complementary",
            Harmony::Analogous => "Analogous",
            Harmony::Triadic => "Triadic",
            Harmony::Tetradic => "Tetradic",
            Harmony::SplitComplementary => "Split-Complementary",
            Harmony::Monochromatic => "Monochromatic",
        }
    }

    /// The colors of this harmony around `base`, in wheel order. `base` itself appears unchanged in its slot.
    ///
    /// The base hue is rounded to a whole degree and its saturation and lightness to whole percents before the
    /// other colors are derived, so derived colors sit on the same grid a hex color picker works on.
    pub fn generate(self, base: (u8, u8, u8)) -> Vec<(u8, u8, u8)> {
        let (h, s, l) = rgb_to_hsl(base);
        let hsl = (h.round() % 360.0, (s * 100.0).round(), (l * 100.0).round());

        let rotate = |offset: f32| {
            if offset == 0.0 {
                base
            } else {
                from_wheel((hsl.0 + offset).rem_euclid(360.0), hsl.1, hsl.2)
            }
        };

        match self {
            Harmony::Complementary => vec![base, rotate(180.0)],
            Harmony::Analogous => vec![rotate(-30.0), base, rotate(30.0)],
            Harmony::Triadic => vec![base, rotate(120.0), rotate(240.0)],
            Harmony::Tetradic => vec![base, rotate(90.0), rotate(180.0), rotate(270.0)],
            Harmony::SplitComplementary => vec![base, rotate(150.0), rotate(210.0)],
            Harmony::Monochromatic => {
                let shade = |delta: f32| from_wheel(hsl.0, hsl.1, (hsl.2 + delta).clamp(0.0, 100.0));
                vec![shade(40.0), shade(20.0), base, shade(-20.0), shade(-40.0)]
            }
        }
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn from_wheel(hue: f32, saturation_pct: f32, lightness_pct: f32) -> (u8, u8, u8) {
    hsl_to_rgb(hue, saturation_pct / 100.0, lightness_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        let base = (0x34, 0x98, 0xdb);
        let lengths = Harmony::ALL.map(|harmony| harmony.generate(base).len());

        assert_eq!(lengths, [2, 3, 3, 4, 3, 5]);
    }

    #[test]
    fn complement_of_red_is_cyan() {
        assert_eq!(
            Harmony::Complementary.generate((255, 0, 0)),
            vec![(255, 0, 0), (0, 255, 255)]
        );
    }

    #[test]
    fn triad_of_red() {
        assert_eq!(
            Harmony::Triadic.generate((255, 0, 0)),
            vec![(255, 0, 0), (0, 255, 0), (0, 0, 255)]
        );
    }

    #[test]
    fn analogous_wraps_below_zero() {
        let colors = Harmony::Analogous.generate((255, 0, 0));

        // 330 degrees is a pinkish magenta, 30 degrees an orange
        assert_eq!(colors, vec![(255, 0, 128), (255, 0, 0), (255, 128, 0)]);
    }

    #[test]
    fn monochromatic_clamps_lightness() {
        let colors = Harmony::Monochromatic.generate((255, 0, 0));

        assert_eq!(colors[0], (255, 204, 204));
        assert_eq!(colors[2], (255, 0, 0));
        assert_eq!(colors[4], (51, 0, 0));

        let white = Harmony::Monochromatic.generate((255, 255, 255));
        assert_eq!(white[0], (255, 255, 255));
        assert_eq!(white[1], (255, 255, 255));
    }

    #[test]
    fn names() {
        assert_eq!(Harmony::SplitComplementary.to_string(), "Split-Complementary");
    }
}
