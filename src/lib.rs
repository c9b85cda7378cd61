// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a small palette of representative colors from an image, plus the color utilities a palette
//! tool needs around it.
//!
//! Extraction clusters the image's pixels with a simplified k-means: centroids are seeded from random pixels, then
//! refined for a fixed number of rounds. Near-black pixels are left out by default so that transparent or black
//! padding does not claim a palette slot.
//!
//! ```no_run
//! let image = tincture::image::open("photo.jpg").unwrap().to_rgb8();
//! let palette = tincture::Palette::from_image(image).color_count(6).generate().unwrap();
//!
//! for color in palette.colors() {
//!     println!("{} ({} pixels)", color.hex(), color.population());
//! }
//! ```
//!
//! Extraction is CPU-bound and blocking. Interactive callers should run it off their UI thread and may stop it early
//! with a [`CancelToken`].

pub mod convert;
mod error;
mod filter;
mod gradient;
mod harmony;
mod kmeans;
mod pixel_buffer;
mod swatch;

pub const DEFAULT_COLOR_COUNT: usize = 5;
pub const DEFAULT_RESIZE_IMAGE_AREA: u32 = 112 * 112;

pub use crate::{
    error::{Error, Result},
    filter::{Filter, NearBlackFilter, NEAR_BLACK_MAX_SUM},
    gradient::{ColorStop, Gradient, GradientKind},
    harmony::Harmony,
    kmeans::{CancelToken, KMeans, DEFAULT_ITERATIONS, DEFAULT_MAX_PIXELS},
    pixel_buffer::PixelBuffer,
    swatch::PaletteColor,
};
pub use image;
pub use palette;

use image::{math::Rect, GenericImageView, ImageBuffer};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Extract `k` colors from `buffer` with the default number of rounds, seeding from the thread-local RNG.
///
/// The result is not deterministic across calls. Use [`extract_with_rng`] with a seeded RNG for reproducible output.
pub fn extract(buffer: &PixelBuffer, k: usize) -> Result<Vec<PaletteColor>> {
    extract_with_rng(buffer, k, &mut rand::thread_rng())
}

pub fn extract_with_rng<R>(buffer: &PixelBuffer, k: usize, rng: &mut R) -> Result<Vec<PaletteColor>>
where
    R: Rng,
{
    KMeans::new(k).run(buffer, rng)
}

/// A uniformly random opaque color.
pub fn random_color<R>(rng: &mut R) -> PaletteColor
where
    R: Rng,
{
    PaletteColor::new(rng.gen(), 0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    color_count: usize,
    iterations: usize,
    resize_area: u32,
    max_pixels: u64,
    region: Option<Rect>,
    filters: Vec<Box<dyn Filter>>,
    seed: Option<u64>,
    cancel: Option<CancelToken>,
}

impl Palette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::from_image(image)
    }

    /// Wrap colors produced elsewhere, e.g. by [`extract`].
    pub fn from_colors(colors: Vec<PaletteColor>) -> Palette {
        Self { colors }
    }

    /// The colors in centroid order. May contain duplicates when clusters collapsed onto the same color.
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(|color| color.hex()).collect()
    }

    pub fn most_prominent_color(&self) -> Option<(u8, u8, u8)> {
        self.colors
            .iter()
            .max_by_key(|color| color.population())
            .map(|color| color.rgb())
    }

    /// The colors from most to least populous. Colors with equal populations keep their centroid order.
    pub fn sorted_by_population(&self) -> Vec<PaletteColor> {
        let mut colors = self.colors.clone();
        colors.sort_by_key(|color| std::cmp::Reverse(color.population()));
        colors
    }
}

impl IntoIterator for Palette {
    type Item = PaletteColor;
    type IntoIter = std::vec::IntoIter<PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            color_count: DEFAULT_COLOR_COUNT,
            iterations: DEFAULT_ITERATIONS,
            resize_area: DEFAULT_RESIZE_IMAGE_AREA,
            max_pixels: DEFAULT_MAX_PIXELS,
            region: None,
            filters: vec![Box::new(NearBlackFilter)],
            seed: None,
            cancel: None,
        }
    }

    pub fn color_count(self, color_count: usize) -> Self {
        Self { color_count, ..self }
    }

    pub fn iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }

    /// Downscale images larger than `resize_area` pixels before sampling. `0` samples every pixel.
    pub fn resize_image_area(self, resize_area: u32) -> Self {
        Self { resize_area, ..self }
    }

    /// Refuse to cluster more than `max_pixels` pixels. `0` disables the limit.
    pub fn max_pixels(self, max_pixels: u64) -> Self {
        Self { max_pixels, ..self }
    }

    pub fn region(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            region: Some(Rect { x, y, width, height }),
            ..self
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Make the extraction reproducible. Without a seed every run draws fresh seeds from the thread-local RNG.
    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn cancel_token(self, cancel: CancelToken) -> Self {
        Self {
            cancel: Some(cancel),
            ..self
        }
    }

    pub fn clear_region(self) -> Self {
        Self { region: None, ..self }
    }

    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    pub fn generate(mut self) -> Result<Palette> {
        if let Some(region) = self.region {
            let (width, height) = self.image.dimensions();

            if region.width == 0
                || region.height == 0
                || region.x as u64 + region.width as u64 > width as u64
                || region.y as u64 + region.height as u64 > height as u64
            {
                return Err(Error::invalid(format!(
                    "region {}x{} at ({}, {}) does not fit in a {width}x{height} image",
                    region.width, region.height, region.x, region.y
                )));
            }
        }

        if let Some((scale_x, scale_y)) = self.scale_image_down() {
            if let Some(mut region) = self.region {
                // scale down the region to match the new scaled image
                let (width, height) = self.image.dimensions();

                region.x = ((region.x as f32 * scale_x).floor() as u32).min(width - 1);
                region.y = ((region.y as f32 * scale_y).floor() as u32).min(height - 1);
                region.width = ((region.width as f32 * scale_x).ceil() as u32).clamp(1, width - region.x);
                region.height = ((region.height as f32 * scale_y).ceil() as u32).clamp(1, height - region.y);

                self.region = Some(region);
            }
        }

        let view = if let Some(region) = self.region {
            self.image.view(region.x, region.y, region.width, region.height)
        } else {
            self.image.view(0, 0, self.image.width(), self.image.height())
        };

        let buffer = PixelBuffer::from_image_with_filters(&*view, &self.filters);

        let mut kmeans = KMeans::new(self.color_count)
            .iterations(self.iterations)
            .max_pixels(self.max_pixels);
        if let Some(cancel) = self.cancel {
            kmeans = kmeans.cancel_token(cancel);
        }

        let colors = match self.seed {
            Some(seed) => kmeans.run(&buffer, &mut Xoshiro256PlusPlus::seed_from_u64(seed))?,
            None => kmeans.run(&buffer, &mut rand::thread_rng())?,
        };

        Ok(Palette { colors })
    }

    /// Returns the horizontal and vertical scale factors if the image was resized.
    fn scale_image_down(&mut self) -> Option<(f32, f32)> {
        let (width, height) = self.image.dimensions();
        let area = width as u64 * height as u64;

        if self.resize_area == 0 || area <= self.resize_area as u64 {
            return None;
        }

        let scale_ratio = (self.resize_area as f64 / area as f64).sqrt();
        let new_width = ((width as f64 * scale_ratio).floor() as u32).max(1);
        let new_height = ((height as f64 * scale_ratio).floor() as u32).max(1);

        debug!("downscaling {width}x{height} image to {new_width}x{new_height} before sampling");

        self.image = image::imageops::resize(
            &self.image,
            new_width,
            new_height,
            image::imageops::FilterType::Nearest,
        );

        Some((
            new_width as f32 / width as f32,
            new_height as f32 / height as f32,
        ))
    }
}
