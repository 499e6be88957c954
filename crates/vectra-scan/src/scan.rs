//! Pixel scan: segmentation and per-shape operations
//!
//! [`PixelScan`] owns a float copy of the source image, a parallel buffer
//! mapping every pixel to the index of its owning shape (−1 before
//! segmentation), and the shape list itself. A shape's index in that list
//! is its identity: serialization and the per-index rasterizers all refer
//! to shapes by it, and it never changes once assigned.

use log::{info, warn};

use crate::border::trace_outline;
use crate::error::ScanResult;
use crate::shape::Shape;
use vectra_core::{Error, GridIndexer, PixelD, PixelF, PixelSource, Vector2I};

/// Cap on segmentation restarts (distinct seeds); a watchdog against
/// pathological inputs, not a timeout.
pub const MAX_SCAN_RESTARTS: usize = 5000;

/// A segmented image: float pixels, per-pixel shape ownership, shapes.
#[derive(Debug, Clone)]
pub struct PixelScan {
    pub(crate) image_size: Vector2I,
    pub(crate) image: Vec<PixelF>,
    pub(crate) image_shapes: Vec<i32>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) has_borders: bool,
}

impl PixelScan {
    /// Build a scan from a pixel source, copying it into float space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn from_source(pixels: &dyn PixelSource) -> ScanResult<Self> {
        let (width, height) = (pixels.width(), pixels.height());
        if width < 1 || height < 1 {
            return Err(Error::InvalidDimension { width, height }.into());
        }

        let indexer = GridIndexer::new(width);
        let mut image = vec![PixelF::default(); width * height];
        for y in 0..height {
            for x in 0..width {
                image[indexer.index(x as i32, y as i32)] = pixels.get(x, y).into();
            }
        }

        Ok(Self {
            image_size: Vector2I::new(width as i32, height as i32),
            image_shapes: vec![-1; width * height],
            image,
            shapes: Vec::new(),
            has_borders: false,
        })
    }

    /// Width and height of the scanned image.
    #[inline]
    pub fn image_size(&self) -> Vector2I {
        self.image_size
    }

    /// The shapes found so far, in seed-discovery order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Per-pixel owning shape indices, row-major; −1 where unassigned.
    pub fn image_shapes(&self) -> &[i32] {
        &self.image_shapes
    }

    /// Whether outlines have been traced.
    #[inline]
    pub fn has_borders(&self) -> bool {
        self.has_borders
    }

    #[inline]
    pub(crate) fn indexer(&self) -> GridIndexer {
        GridIndexer::new(self.image_size.x as usize)
    }

    /// Whether `spot` lies inside the image.
    #[inline]
    pub fn is_inside_image(&self, spot: Vector2I) -> bool {
        spot.x >= 0 && spot.y >= 0 && spot.x < self.image_size.x && spot.y < self.image_size.y
    }

    /// Whether the pixel at `spot` has been assigned to a shape.
    pub fn has_shape(&self, spot: Vector2I) -> bool {
        self.is_inside_image(spot) && self.image_shapes[self.indexer().index_of(spot)] != -1
    }

    /// The eight neighbors of `spot`, unclipped.
    fn neighbours_of(spot: Vector2I) -> [Vector2I; 8] {
        [
            Vector2I::new(spot.x - 1, spot.y - 1),
            Vector2I::new(spot.x, spot.y - 1),
            Vector2I::new(spot.x + 1, spot.y - 1),
            Vector2I::new(spot.x - 1, spot.y),
            Vector2I::new(spot.x + 1, spot.y),
            Vector2I::new(spot.x - 1, spot.y + 1),
            Vector2I::new(spot.x, spot.y + 1),
            Vector2I::new(spot.x + 1, spot.y + 1),
        ]
    }

    /// Partition the image into shapes of transitively-similar pixels.
    ///
    /// Restartable flood fill with an 8-neighborhood frontier: each restart
    /// seeds a new shape at the first unassigned pixel in row-major order,
    /// then absorbs every unassigned neighbor similar (in float space, at
    /// `threshold`) to the frontier pixel it was reached from. Shape order
    /// is therefore seed-discovery order.
    ///
    /// The restart count is capped at [`MAX_SCAN_RESTARTS`]; hitting the cap
    /// logs a warning and leaves a consistent, partially-assigned state.
    pub fn scan_for_shapes(&mut self, threshold: f32) -> ScanResult<()> {
        info!("scanning for shapes at threshold {threshold}");

        self.shapes.clear();
        self.image_shapes.fill(-1);
        self.has_borders = false;

        let indexer = self.indexer();
        let mut frontier: Vec<Vector2I> = Vec::new();

        let mut restarts = 0usize;
        while self.image_shapes.contains(&-1) {
            if restarts > MAX_SCAN_RESTARTS {
                warn!("stopping shape search: seed count hit the {MAX_SCAN_RESTARTS} cap");
                break;
            }
            restarts += 1;

            for i in 0..self.image_shapes.len() {
                if self.image_shapes[i] == -1 {
                    self.image_shapes[i] = self.shapes.len() as i32;
                    self.shapes
                        .push(Shape::new(self.image[i], self.image_size, indexer.reverse(i)));
                    frontier.push(indexer.reverse(i));
                    break;
                }
            }

            while !frontier.is_empty() {
                let Some(spot_index) = (0..frontier.len()).find(|&i| self.has_shape(frontier[i]))
                else {
                    break;
                };
                let spot = frontier[spot_index];

                for neighbour in Self::neighbours_of(spot) {
                    if self.is_inside_image(neighbour)
                        && !self.has_shape(neighbour)
                        && self.image[indexer.index_of(neighbour)]
                            .is_similar_to(&self.image[indexer.index_of(spot)], threshold)
                    {
                        frontier.push(neighbour);
                        self.shapes
                            .last_mut()
                            .expect("a seed shape exists while flooding")
                            .insert_chunk(neighbour)?;
                        self.image_shapes[indexer.index_of(neighbour)] =
                            self.image_shapes[indexer.index_of(spot)];
                    }
                }

                frontier.swap_remove(spot_index);
            }
        }

        info!("scanned {} shapes", self.shapes.len());
        Ok(())
    }

    /// Recompute each shape's color as the mean of its member pixels.
    ///
    /// Accumulates in f64 over the bounding box restricted to members and
    /// divides by the member count (never zero: shapes hold their seed).
    pub fn average_colors(&mut self) {
        let indexer = GridIndexer::new(self.image_size.x as usize);
        for shape in &mut self.shapes {
            let mut sum = PixelD::default();
            for x in shape.bounds().min.x..=shape.bounds().max.x {
                for y in shape.bounds().min.y..=shape.bounds().max.y {
                    if shape.has(Vector2I::new(x, y)) {
                        sum += self.image[indexer.index(x, y)];
                    }
                }
            }
            shape.set_color((sum / shape.chunk_count() as f64).into());
        }
    }

    /// Trace the outline of every shape and mark borders present.
    pub fn calculate_borders(&mut self) {
        info!("calculating shape borders");
        for shape in &mut self.shapes {
            trace_outline(shape);
        }
        self.has_borders = true;
    }

    /// Compress every shape's bitmap to its bounding box.
    pub fn compress_shapes(&mut self) {
        for shape in &mut self.shapes {
            shape.compress_chunks();
        }
    }
}
