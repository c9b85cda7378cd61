use crate::{
    error::{Error, Result},
    filter::{Filter, NearBlackFilter},
};
use image::{GenericImageView, ImageBuffer};

/// The pixels of an image that take part in clustering, in scan order.
///
/// Only the RGB channels are kept; alpha is ignored. Every pixel stored here has already passed the filters the buffer
/// was built with, by default [`NearBlackFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<(u8, u8, u8)>,
}

impl PixelBuffer {
    /// Build a buffer from a flat RGBA slice, 4 bytes per pixel, as handed out by canvas decoders.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_rgba_with_filters(width, height, data, &[Box::new(NearBlackFilter)])
    }

    pub fn from_rgba_with_filters(width: u32, height: u32, data: &[u8], filters: &[Box<dyn Filter>]) -> Result<Self> {
        let expected = width as u64 * height as u64 * 4;

        if data.len() as u64 != expected {
            return Err(Error::invalid(format!(
                "a {width}x{height} RGBA image needs {expected} bytes, got {}",
                data.len()
            )));
        }

        let pixels = data.chunks_exact(4).map(|px| (px[0], px[1], px[2]));
        Ok(Self::from_pixels_with_filters(pixels, filters))
    }

    /// Build a buffer from every pixel of a view into an image, converting each one to RGB.
    pub fn from_image<I>(image: &I) -> Self
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        Self::from_image_with_filters(image, &[Box::new(NearBlackFilter)])
    }

    pub fn from_image_with_filters<I>(image: &I, filters: &[Box<dyn Filter>]) -> Self
    where
        I: GenericImageView,
        I::Pixel: image::Pixel<Subpixel = u8>,
    {
        let pixels = image.pixels().map(|(_, _, p)| pixel_to_rgb(&p));
        Self::from_pixels_with_filters(pixels, filters)
    }

    pub fn from_pixels<T>(pixels: T) -> Self
    where
        T: IntoIterator<Item = (u8, u8, u8)>,
    {
        Self::from_pixels_with_filters(pixels, &[Box::new(NearBlackFilter)])
    }

    pub fn from_pixels_with_filters<T>(pixels: T, filters: &[Box<dyn Filter>]) -> Self
    where
        T: IntoIterator<Item = (u8, u8, u8)>,
    {
        let pixels = pixels
            .into_iter()
            .filter(|&rgb| filters.iter().all(|filter| filter.is_allowed(rgb)))
            .collect();

        Self { pixels }
    }

    pub fn pixels(&self) -> &[(u8, u8, u8)] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The per-channel mean of the buffer, rounded to the nearest integer. `None` when the buffer is empty.
    pub fn mean(&self) -> Option<(u8, u8, u8)> {
        if self.pixels.is_empty() {
            return None;
        }

        let (r, g, b) = self.pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), &(pr, pg, pb)| {
            (r + pr as u64, g + pg as u64, b + pb as u64)
        });

        let n = self.pixels.len() as f64;
        Some((
            (r as f64 / n).round() as u8,
            (g as f64 / n).round() as u8,
            (b as f64 / n).round() as u8,
        ))
    }
}

impl From<ImageBuffer<image::Rgba<u8>, Vec<u8>>> for PixelBuffer {
    fn from(image: ImageBuffer<image::Rgba<u8>, Vec<u8>>) -> Self {
        PixelBuffer::from_image(&image)
    }
}

impl From<ImageBuffer<image::Rgb<u8>, Vec<u8>>> for PixelBuffer {
    fn from(image: ImageBuffer<image::Rgb<u8>, Vec<u8>>) -> Self {
        PixelBuffer::from_image(&image)
    }
}

pub(crate) fn pixel_to_rgb<P>(pixel: &P) -> (u8, u8, u8)
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgb = pixel.to_rgb();
    (rgb.0[0], rgb.0[1], rgb.0[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_drops_alpha_and_near_black() {
        let data = [
            255, 0, 0, 255, //
            0, 0, 0, 0, //
            10, 10, 10, 255, //
            0, 0, 255, 12,
        ];

        let buffer = PixelBuffer::from_rgba(2, 2, &data).unwrap();
        assert_eq!(buffer.pixels(), &[(255, 0, 0), (0, 0, 255)]);
    }

    #[test]
    fn rgba_length_must_match_dimensions() {
        let data = [255u8; 12];
        assert!(matches!(
            PixelBuffer::from_rgba(2, 2, &data),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn no_filters_keeps_everything() {
        let buffer = PixelBuffer::from_pixels_with_filters([(0, 0, 0), (1, 2, 3)], &[]);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn image_buffer_is_sampled_in_scan_order() {
        let image = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([200u8, 100, 50])
            } else {
                image::Rgb([1, 2, 3])
            }
        });

        let buffer = PixelBuffer::from(image);
        assert_eq!(buffer.pixels(), &[(200, 100, 50)]);
    }

    #[test]
    fn mean_rounds_each_channel() {
        let buffer = PixelBuffer::from_pixels([(100, 0, 255), (101, 0, 254)]);
        assert_eq!(buffer.mean(), Some((101, 0, 255)));
        assert_eq!(PixelBuffer::default().mean(), None);
    }
}
