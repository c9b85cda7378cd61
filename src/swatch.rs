use std::fmt;

/// One color of an extracted palette.
///
/// `population` is the number of buffer pixels whose nearest palette color this is. It is zero for a color whose
/// cluster ended up empty, and for colors that did not come out of an extraction at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "PaletteColorRecord", try_from = "PaletteColorRecord")
)]
pub struct PaletteColor {
    red: u8,
    green: u8,
    blue: u8,
    population: u32,
}

impl PaletteColor {
    pub fn new((red, green, blue): (u8, u8, u8), population: u32) -> PaletteColor {
        Self {
            red,
            green,
            blue,
            population,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn r(self) -> u8 {
        self.red
    }

    pub fn g(self) -> u8 {
        self.green
    }

    pub fn b(self) -> u8 {
        self.blue
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(self) -> String {
        crate::convert::to_hex(self.rgb())
    }

    pub fn hsl(self) -> (f32, f32, f32) {
        crate::convert::rgb_to_hsl(self.rgb())
    }

    pub fn population(self) -> u32 {
        self.population
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// The serialized shape of a [`PaletteColor`]: `{ r, g, b, hex, population }`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PaletteColorRecord {
    r: u8,
    g: u8,
    b: u8,
    hex: String,
    #[serde(default)]
    population: u32,
}

#[cfg(feature = "serde")]
impl From<PaletteColor> for PaletteColorRecord {
    fn from(color: PaletteColor) -> Self {
        Self {
            r: color.red,
            g: color.green,
            b: color.blue,
            hex: color.hex(),
            population: color.population,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PaletteColorRecord> for PaletteColor {
    type Error = crate::Error;

    fn try_from(record: PaletteColorRecord) -> Result<Self, Self::Error> {
        let rgb = (record.r, record.g, record.b);

        if crate::convert::parse_hex(&record.hex)? != rgb {
            return Err(crate::Error::invalid(format!(
                "hex {} does not match rgb({}, {}, {})",
                record.hex, record.r, record.g, record.b
            )));
        }

        Ok(PaletteColor::new(rgb, record.population))
    }
}
