//! Three-pass neighborhood reduction
//!
//! Replaces each pixel with the *original* pixel at its most "popular"
//! neighbor, flattening speckle before a scan:
//!
//! 1. Average every pixel over its window.
//! 2. Count, per pixel, the window members whose average is similar to its
//!    own average.
//! 3. Vote: pick the window member with the highest count whose average
//!    stays within `threshold` of the pixel's own, and copy the input pixel
//!    at that member's coordinate.
//!
//! The window is the half-open square `[x−reach, x+reach) × [y−reach,
//! y+reach)` clipped to the image: the `+reach` row and column are
//! excluded. Keep it that way — downstream output depends on this window
//! bit for bit.

use crate::error::{ReduceError, ReduceResult};
use log::info;
use vectra_core::{GridIndexer, Pixel, PixelSink, PixelSource, Raster};

/// Similarity threshold applied between window averages when none is given.
pub const DEFAULT_SIMILARITY: f32 = 20.0;

/// Configured neighborhood reducer.
#[derive(Debug, Clone, Copy)]
pub struct Reducer {
    reach: usize,
    threshold: f32,
    similarity: f32,
}

impl Reducer {
    /// Create a reducer with the default similarity of 20.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidParameter`] if `reach` is zero (the
    /// window would be empty).
    pub fn new(reach: usize, threshold: f32) -> ReduceResult<Self> {
        Self::with_similarity(reach, threshold, DEFAULT_SIMILARITY)
    }

    /// Create a reducer with an explicit similarity threshold.
    pub fn with_similarity(reach: usize, threshold: f32, similarity: f32) -> ReduceResult<Self> {
        if reach < 1 {
            return Err(ReduceError::InvalidParameter(
                "reach must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            reach,
            threshold,
            similarity,
        })
    }

    /// Run all three passes over `from`, producing a new raster.
    pub fn reduce(&self, from: &impl PixelSource) -> Raster {
        info!(
            "reducing {}x{} image with reach {} threshold {}",
            from.width(),
            from.height(),
            self.reach,
            self.threshold
        );
        let averages = averages_of(from, self.reach);
        let counts = similar_average_counts(&averages, self.reach, self.similarity);
        most_popular_neighbours(from, &averages, &counts, self.reach, self.threshold)
    }
}

/// Visit the window of `(x, y)` in row-major order, clipped to the image.
fn for_window(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    reach: usize,
    mut visit: impl FnMut(usize, usize),
) {
    let reach = reach as i32;
    for ny in (y as i32 - reach)..(y as i32 + reach) {
        if ny < 0 || ny >= height as i32 {
            continue;
        }
        for nx in (x as i32 - reach)..(x as i32 + reach) {
            if nx < 0 || nx >= width as i32 {
                continue;
            }
            visit(nx as usize, ny as usize);
        }
    }
}

/// Pass 1: mean of each pixel's window, truncated to bytes.
fn averages_of(from: &impl PixelSource, reach: usize) -> Raster {
    let (width, height) = (from.width(), from.height());
    let mut averages = Raster::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut sum = (0u32, 0u32, 0u32);
            let mut count = 0u32;
            for_window(width, height, x, y, reach, |nx, ny| {
                let neighbour = from.get(nx, ny);
                sum.0 += neighbour.r as u32;
                sum.1 += neighbour.g as u32;
                sum.2 += neighbour.b as u32;
                count += 1;
            });

            averages.set(
                x,
                y,
                Pixel::new(
                    (sum.0 as f32 / count as f32) as u8,
                    (sum.1 as f32 / count as f32) as u8,
                    (sum.2 as f32 / count as f32) as u8,
                ),
            );
        }
    }

    averages
}

/// Pass 2: how many window members share each pixel's average.
fn similar_average_counts(averages: &Raster, reach: usize, similarity: f32) -> Vec<usize> {
    let (width, height) = (averages.width(), averages.height());
    let indexer = GridIndexer::new(width);
    let mut counts = vec![0usize; width * height];

    for y in 0..height {
        for x in 0..width {
            let my_average = averages.get(x, y);
            for_window(width, height, x, y, reach, |nx, ny| {
                if my_average.is_similar_to(&averages.get(nx, ny), similarity) {
                    counts[indexer.index(x as i32, y as i32)] += 1;
                }
            });
        }
    }

    counts
}

/// Pass 3: copy the input pixel at each pixel's most popular window member.
fn most_popular_neighbours(
    from: &impl PixelSource,
    averages: &Raster,
    counts: &[usize],
    reach: usize,
    threshold: f32,
) -> Raster {
    let (width, height) = (from.width(), from.height());
    let indexer = GridIndexer::new(width);
    let mut output = Raster::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let my_average = averages.get(x, y);

            let mut highest_count = 0usize;
            let mut highest_spot = (x, y);
            for_window(width, height, x, y, reach, |nx, ny| {
                let difference = my_average.difference_from(&averages.get(nx, ny));
                let popularity = counts[indexer.index(nx as i32, ny as i32)];
                if difference < threshold && popularity > highest_count {
                    highest_count = popularity;
                    highest_spot = (nx, ny);
                }
            });

            output.set(x, y, from.get(highest_spot.0, highest_spot.1));
        }
    }

    output
}
