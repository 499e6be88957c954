//! A single contiguous color region
//!
//! A [`Shape`] is one maximal region of transitively-similar pixels: its
//! average color, a tight bounding box, a row-major membership bitmap, and
//! (once traced) its outline as parallel float / integer point lists.
//!
//! The bitmap has two layouts. Freshly scanned shapes are *uncompressed*:
//! the bitmap spans the whole source image and `chunks_offset` is zero.
//! [`Shape::compress_chunks`] shrinks it to the bounding box, after which
//! `has(x, y)` indexes at `(x, y) + chunks_offset` and membership can no
//! longer be grown.

use crate::error::{ScanError, ScanResult};
use vectra_core::{Bounds2I, GridIndexer, PixelF, Vector2, Vector2I};

/// One contiguous region of similar pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub(crate) color: PixelF,
    pub(crate) bounds: Bounds2I,
    pub(crate) chunks_size: Vector2I,
    pub(crate) chunks_offset: Vector2I,
    pub(crate) chunks: Vec<bool>,
    pub(crate) chunk_count: usize,
    pub(crate) outer_edge: Vec<Vector2>,
    pub(crate) outer_edge_points: Vec<Vector2I>,
    pub(crate) compressed: bool,
}

impl Shape {
    /// Create a shape holding a single seed pixel.
    ///
    /// The bitmap is allocated at image size (uncompressed layout).
    pub fn new(color: PixelF, image_size: Vector2I, first_chunk: Vector2I) -> Self {
        let mut chunks = vec![false; (image_size.x * image_size.y) as usize];
        chunks[GridIndexer::new(image_size.x as usize).index_of(first_chunk)] = true;

        Self {
            color,
            bounds: Bounds2I::at_point(first_chunk),
            chunks_size: image_size,
            chunks_offset: Vector2I::default(),
            chunks,
            chunk_count: 1,
            outer_edge: Vec::new(),
            outer_edge_points: Vec::new(),
            compressed: false,
        }
    }

    /// The shape's (average) color.
    #[inline]
    pub fn color(&self) -> PixelF {
        self.color
    }

    /// Replace the shape's color.
    pub fn set_color(&mut self, color: PixelF) {
        self.color = color;
    }

    /// Tight bounding box over all member pixels.
    #[inline]
    pub fn bounds(&self) -> Bounds2I {
        self.bounds
    }

    /// Number of member pixels.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// The membership bitmap, row-major over `chunks_size`.
    pub fn chunks(&self) -> &[bool] {
        &self.chunks
    }

    /// The traced outline in half-integer coordinates.
    pub fn outer_edge(&self) -> &[Vector2] {
        &self.outer_edge
    }

    /// The integer trace points matching [`Shape::outer_edge`] step for step.
    pub fn outer_edge_points(&self) -> &[Vector2I] {
        &self.outer_edge_points
    }

    /// Row-major indexer over the current bitmap layout.
    #[inline]
    pub(crate) fn indexer(&self) -> GridIndexer {
        GridIndexer::new(self.chunks_size.x as usize)
    }

    /// Whether the pixel at `spot` (image coordinates) belongs to this shape.
    pub fn has(&self, spot: Vector2I) -> bool {
        let spot = spot + self.chunks_offset;
        if spot.x < 0 || spot.y < 0 || spot.x >= self.chunks_size.x || spot.y >= self.chunks_size.y {
            return false;
        }
        self.chunks[self.indexer().index_of(spot)]
    }

    /// Add a member pixel, growing the bounds to cover it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidState`] if the bitmap has been compressed.
    pub fn insert_chunk(&mut self, at: Vector2I) -> ScanResult<()> {
        if self.compressed {
            return Err(ScanError::InvalidState(
                "cannot insert chunks into a compressed shape",
            ));
        }
        self.bounds.include(at);
        let index = self.indexer().index_of(at);
        self.chunks[index] = true;
        self.chunk_count += 1;
        Ok(())
    }

    pub(crate) fn insert_outer_edge(&mut self, at: Vector2) {
        self.outer_edge.push(at);
    }

    pub(crate) fn insert_outer_edge_point(&mut self, at: Vector2I) {
        self.outer_edge_points.push(at);
    }

    /// Shrink the bitmap from image size to bounding-box size.
    ///
    /// Afterwards `chunks_size` is `(width+1, height+1)` of the bounds and
    /// `chunks_offset` is `-bounds.min`. Idempotent.
    pub fn compress_chunks(&mut self) {
        if self.compressed {
            return;
        }

        let new_size = Vector2I::new(self.bounds.width() + 1, self.bounds.height() + 1);
        let mut new_chunks = vec![false; (new_size.x * new_size.y) as usize];
        let new_indexer = GridIndexer::new(new_size.x as usize);
        let old_indexer = self.indexer();

        for x in self.bounds.min.x..=self.bounds.max.x {
            for y in self.bounds.min.y..=self.bounds.max.y {
                new_chunks[new_indexer.index(x - self.bounds.min.x, y - self.bounds.min.y)] =
                    self.chunks[old_indexer.index(x, y)];
            }
        }

        self.chunks_size = new_size;
        self.chunks_offset = -self.bounds.min;
        self.chunks = new_chunks;
        self.compressed = true;
    }
}
