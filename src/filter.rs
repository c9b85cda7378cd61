/// Pixels whose channel sum is at or below this value are considered near-black.
pub const NEAR_BLACK_MAX_SUM: u16 = 30;

/// A trait used to implement filters for the pixel sampling process.
///
/// Before clustering, every pixel of the source image is run through the filters of the buffer being built. A pixel
/// is kept only if every filter allows it. This trait allows the library consumer to implement custom filters.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the extraction process.
pub trait Filter {
    /// Return whether a given color should be allowed or not.
    fn is_allowed(&self, rgb: (u8, u8, u8)) -> bool;
}

/// The default filter included in every [`crate::PaletteBuilder`] by default.
///
/// This filter disallows near-black pixels, those whose channel sum is at most [`NEAR_BLACK_MAX_SUM`]. Fully
/// transparent pixels usually decode to black and are dropped by it as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearBlackFilter;
impl Filter for NearBlackFilter {
    fn is_allowed(&self, (r, g, b): (u8, u8, u8)) -> bool {
        !is_near_black(r, g, b)
    }
}

impl<F> Filter for F
where
    F: Fn((u8, u8, u8)) -> bool,
{
    fn is_allowed(&self, rgb: (u8, u8, u8)) -> bool {
        self(rgb)
    }
}

fn is_near_black(r: u8, g: u8, b: u8) -> bool {
    r as u16 + g as u16 + b as u16 <= NEAR_BLACK_MAX_SUM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_black_threshold_is_inclusive() {
        assert!(!NearBlackFilter.is_allowed((10, 10, 10)));
        assert!(!NearBlackFilter.is_allowed((0, 0, 30)));
        assert!(NearBlackFilter.is_allowed((10, 10, 11)));
        assert!(NearBlackFilter.is_allowed((255, 255, 255)));
    }

    #[test]
    fn closures_are_filters() {
        let no_white = |(r, g, b): (u8, u8, u8)| !(r == 255 && g == 255 && b == 255);
        assert!(!no_white.is_allowed((255, 255, 255)));
        assert!(no_white.is_allowed((255, 255, 254)));
    }
}
