use crate::{
    convert::to_hex,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientKind {
    /// Direction in degrees, CSS convention (0 points up, 90 points right).
    Linear { angle: f32 },
    Radial,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    /// Percent along the gradient line, `0..=100`.
    pub position: f32,
    pub rgb: (u8, u8, u8),
}

/// A CSS gradient with at least two color stops, kept in position order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GradientRecord")
)]
pub struct Gradient {
    kind: GradientKind,
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// A two-stop red to blue gradient of the given kind.
    pub fn new(kind: GradientKind) -> Self {
        Self {
            kind,
            stops: vec![
                ColorStop {
                    position: 0.0,
                    rgb: (255, 0, 0),
                },
                ColorStop {
                    position: 100.0,
                    rgb: (0, 0, 255),
                },
            ],
        }
    }

    pub fn linear(angle: f32) -> Self {
        Self::new(GradientKind::Linear { angle })
    }

    pub fn radial() -> Self {
        Self::new(GradientKind::Radial)
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Insert a stop, clamping its position into `0..=100`. Returns the index it landed at.
    ///
    /// A stop at the same position as existing ones goes after them.
    pub fn add_stop(&mut self, position: f32, rgb: (u8, u8, u8)) -> usize {
        let position = position.clamp(0.0, 100.0);
        let index = self.stops.partition_point(|stop| stop.position <= position);

        self.stops.insert(index, ColorStop { position, rgb });
        index
    }

    pub fn set_stop_color(&mut self, index: usize, rgb: (u8, u8, u8)) -> Result<()> {
        let stop = self
            .stops
            .get_mut(index)
            .ok_or_else(|| Error::invalid(format!("no color stop at index {index}")))?;

        stop.rgb = rgb;
        Ok(())
    }

    /// Remove a stop. A gradient never drops below two stops.
    pub fn remove_stop(&mut self, index: usize) -> Result<ColorStop> {
        if index >= self.stops.len() {
            return Err(Error::invalid(format!("no color stop at index {index}")));
        }

        if self.stops.len() <= 2 {
            return Err(Error::invalid("a gradient needs at least two color stops"));
        }

        Ok(self.stops.remove(index))
    }

    /// The interpolated color at `position` percent, blending sRGB linearly between the surrounding stops.
    pub fn color_at(&self, position: f32) -> (u8, u8, u8) {
        let position = position.clamp(0.0, 100.0);
        let after = self.stops.partition_point(|stop| stop.position <= position);

        if after == 0 {
            return self.stops[0].rgb;
        }

        if after == self.stops.len() {
            return self.stops[after - 1].rgb;
        }

        let (from, to) = (self.stops[after - 1], self.stops[after]);
        let t = (position - from.position) / (to.position - from.position);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;

        (lerp(from.rgb.0, to.rgb.0), lerp(from.rgb.1, to.rgb.1), lerp(from.rgb.2, to.rgb.2))
    }

    /// The CSS `background` value, e.g. `linear-gradient(90deg, #FF0000 0%, #0000FF 100%)`.
    pub fn to_css_value(&self) -> String {
        let mut css = match self.kind {
            GradientKind::Linear { angle } => format!("linear-gradient({angle}deg"),
            GradientKind::Radial => "radial-gradient(circle".to_owned(),
        };

        for stop in &self.stops {
            css.push_str(&format!(", {} {}%", to_hex(stop.rgb), stop.position));
        }

        css.push(')');
        css
    }

    /// A `background` declaration. Linear gradients get a `-webkit-` prefixed copy on the line before.
    pub fn to_css(&self) -> String {
        let declaration = format!("background: {};", self.to_css_value());

        match self.kind {
            GradientKind::Linear { .. } => format!("-webkit-{declaration}\n{declaration}"),
            GradientKind::Radial => declaration,
        }
    }
}

/// The unchecked deserialized shape of a [`Gradient`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GradientRecord {
    kind: GradientKind,
    stops: Vec<ColorStop>,
}

#[cfg(feature = "serde")]
impl TryFrom<GradientRecord> for Gradient {
    type Error = Error;

    fn try_from(record: GradientRecord) -> Result<Self> {
        if record.stops.len() < 2 {
            return Err(Error::invalid(format!(
                "a gradient needs at least two color stops, got {}",
                record.stops.len()
            )));
        }

        if record.stops.iter().any(|stop| stop.position.is_nan()) {
            return Err(Error::invalid("color stop position is not a number"));
        }

        let mut stops = record
            .stops
            .into_iter()
            .map(|stop| ColorStop {
                position: stop.position.clamp(0.0, 100.0),
                ..stop
            })
            .collect::<Vec<_>>();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        Ok(Self {
            kind: record.kind,
            stops,
        })
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::linear(90.0)
    }
}
