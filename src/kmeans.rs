use crate::{
    error::{Error, Result},
    pixel_buffer::PixelBuffer,
    swatch::PaletteColor,
};
use log::{debug, trace, warn};
use rand::Rng;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub const DEFAULT_ITERATIONS: usize = 10;
pub const DEFAULT_MAX_PIXELS: u64 = 4096 * 4096;

/// A shared flag used to stop a running extraction from another thread.
///
/// Clones share the same flag. The clustering loop checks it before every round, so a cancelled run returns
/// [`Error::Cancelled`] after at most one more round of work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lloyd's k-means over RGB, with naive random seeding and a fixed number of rounds.
///
/// Each run seeds `k` centroids by picking pixels uniformly at random with replacement, then alternates assigning
/// every pixel to its nearest centroid and moving every centroid to the rounded mean of its pixels. There is no
/// convergence check; the loop always runs [`KMeans::iterations`] rounds.
///
/// A centroid that ends a round with no pixels keeps its previous position. Combined with duplicate seeds this can
/// produce repeated colors in the output, which is accepted rather than re-seeded.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    iterations: usize,
    max_pixels: u64,
    cancel: Option<CancelToken>,
}

type Centroid = (u8, u8, u8);

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            iterations: DEFAULT_ITERATIONS,
            max_pixels: DEFAULT_MAX_PIXELS,
            cancel: None,
        }
    }

    pub fn iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }

    /// Refuse buffers with more pixels than `max_pixels`. `0` disables the limit.
    pub fn max_pixels(self, max_pixels: u64) -> Self {
        Self { max_pixels, ..self }
    }

    pub fn cancel_token(self, cancel: CancelToken) -> Self {
        Self {
            cancel: Some(cancel),
            ..self
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Cluster `buffer` into exactly `k` colors, in centroid order.
    pub fn run<R>(&self, buffer: &PixelBuffer, rng: &mut R) -> Result<Vec<PaletteColor>>
    where
        R: Rng,
    {
        if self.k == 0 {
            return Err(Error::invalid("the number of colors must be at least 1"));
        }

        if buffer.is_empty() {
            return Err(Error::invalid("no usable pixels left after filtering"));
        }

        let pixels = buffer.pixels();
        if self.max_pixels > 0 && pixels.len() as u64 > self.max_pixels {
            return Err(Error::ResourceExceeded {
                pixels: pixels.len() as u64,
                limit: self.max_pixels,
            });
        }

        debug!(
            "clustering {} pixels into {} colors over {} rounds",
            pixels.len(),
            self.k,
            self.iterations
        );

        let mut centroids = seed(pixels, self.k, rng);
        let mut assignments = vec![0; pixels.len()];

        for round in 0..self.iterations {
            if self.is_cancelled() {
                debug!("cancelled before round {round}");
                return Err(Error::Cancelled);
            }

            assign(pixels, &centroids, &mut assignments);
            let empty = update(pixels, &assignments, &mut centroids);

            trace!("round {round}: {empty} empty clusters, centroids {centroids:?}");
        }

        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        // populations are measured against the final centroids
        assign(pixels, &centroids, &mut assignments);
        let mut populations = vec![0u32; self.k];
        for &cluster in &assignments {
            populations[cluster] += 1;
        }

        let empty = populations.iter().filter(|&&count| count == 0).count();
        if empty > 0 {
            warn!("{empty} of {} palette colors ended up with no pixels", self.k);
        }

        Ok(centroids
            .into_iter()
            .zip(populations)
            .map(|(rgb, population)| PaletteColor::new(rgb, population))
            .collect())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

fn seed<R>(pixels: &[(u8, u8, u8)], k: usize, rng: &mut R) -> Vec<Centroid>
where
    R: Rng,
{
    (0..k).map(|_| pixels[rng.gen_range(0..pixels.len())]).collect()
}

fn assign(pixels: &[(u8, u8, u8)], centroids: &[Centroid], assignments: &mut [usize]) {
    for (pixel, cluster) in pixels.iter().zip(assignments.iter_mut()) {
        *cluster = nearest(*pixel, centroids);
    }
}

/// Index of the centroid closest to `pixel`. On a tie the earliest centroid wins.
pub(crate) fn nearest(pixel: (u8, u8, u8), centroids: &[Centroid]) -> usize {
    let mut min_distance = u32::MAX;
    let mut cluster = 0;

    for (i, &centroid) in centroids.iter().enumerate() {
        let distance = distance_squared(pixel, centroid);

        if distance < min_distance {
            min_distance = distance;
            cluster = i;
        }
    }

    cluster
}

/// Move every non-empty centroid to the rounded mean of its pixels. Returns how many centroids were left empty.
fn update(pixels: &[(u8, u8, u8)], assignments: &[usize], centroids: &mut [Centroid]) -> usize {
    let mut sums = vec![(0u64, 0u64, 0u64, 0u64); centroids.len()];

    for (&(r, g, b), &cluster) in pixels.iter().zip(assignments) {
        let sum = &mut sums[cluster];
        sum.0 += r as u64;
        sum.1 += g as u64;
        sum.2 += b as u64;
        sum.3 += 1;
    }

    let mut empty = 0;
    for (centroid, (r, g, b, count)) in centroids.iter_mut().zip(sums) {
        if count == 0 {
            empty += 1;
            continue;
        }

        *centroid = (
            rounded_mean(r, count),
            rounded_mean(g, count),
            rounded_mean(b, count),
        );
    }

    empty
}

// halves round up, so the mean of 0 and 1 is 1
fn rounded_mean(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)) as u8
}

fn distance_squared((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): Centroid) -> u32 {
    let dr = r1 as i32 - r2 as i32;
    let dg = g1 as i32 - g2 as i32;
    let db = b1 as i32 - b2 as i32;

    (dr * dr + dg * dg + db * db) as u32
}
