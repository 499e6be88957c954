//! RGB pixel types
//!
//! Three representations of the same color sample:
//!
//! - [`Pixel`] — 8-bit components, the wire/raster form.
//! - [`PixelF`] — f32 components normalized to [0, 1], the working form
//!   used throughout scanning.
//! - [`PixelD`] — f64 components, used for accumulation where f32 would
//!   lose precision (color averaging).
//!
//! Similarity between two pixels is the Euclidean distance of their
//! components. Byte pixels compare in 0–255 space; normalized pixels scale
//! the caller's threshold by 1/147 (147 ≈ 441/3, the byte-space diagonal
//! over 3) so a single threshold parameter works against either form.

/// Divisor applied to a byte-space threshold when comparing normalized pixels.
const NORMALIZED_THRESHOLD_SCALE: f32 = 441.0 / 3.0;

/// An 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Create a pixel from byte components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance from another pixel in 0–255 space.
    pub fn difference_from(&self, other: &Pixel) -> f32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        ((dr * dr + dg * dg + db * db) as f32).sqrt()
    }

    /// Whether the distance to `other` is within `threshold` (0–255 space).
    pub fn is_similar_to(&self, other: &Pixel, threshold: f32) -> bool {
        self.difference_from(other) <= threshold
    }
}

/// A normalized f32 RGB pixel with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PixelF {
    /// Create a pixel from float components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance from another pixel in normalized space.
    pub fn difference_from(&self, other: &PixelF) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Whether the distance to `other` is within `threshold / 147`.
    ///
    /// The threshold parameter is expressed in 0–255 space so callers can
    /// pass the same value they would use for [`Pixel`] comparisons.
    pub fn is_similar_to(&self, other: &PixelF, threshold: f32) -> bool {
        self.difference_from(other) <= threshold / NORMALIZED_THRESHOLD_SCALE
    }

    /// Squared magnitude of the components, treated as a 3-vector.
    ///
    /// Used to detect nearly-black colors when choosing a raster background.
    #[inline]
    pub fn sqr_mag(&self) -> f32 {
        self.r * self.r + self.g * self.g + self.b * self.b
    }
}

impl From<Pixel> for PixelF {
    fn from(p: Pixel) -> Self {
        Self {
            r: p.r as f32 / 255.0,
            g: p.g as f32 / 255.0,
            b: p.b as f32 / 255.0,
        }
    }
}

impl From<PixelF> for Pixel {
    fn from(p: PixelF) -> Self {
        Self {
            r: (p.r * 255.0) as u8,
            g: (p.g * 255.0) as u8,
            b: (p.b * 255.0) as u8,
        }
    }
}

impl From<PixelD> for PixelF {
    fn from(p: PixelD) -> Self {
        Self {
            r: p.r as f32,
            g: p.g as f32,
            b: p.b as f32,
        }
    }
}

/// An f64 RGB pixel, normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelD {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl PixelD {
    /// Create a pixel from double components.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<Pixel> for PixelD {
    fn from(p: Pixel) -> Self {
        Self {
            r: p.r as f64 / 255.0,
            g: p.g as f64 / 255.0,
            b: p.b as f64 / 255.0,
        }
    }
}

impl From<PixelF> for PixelD {
    fn from(p: PixelF) -> Self {
        Self {
            r: p.r as f64,
            g: p.g as f64,
            b: p.b as f64,
        }
    }
}

impl std::ops::AddAssign<PixelF> for PixelD {
    fn add_assign(&mut self, rhs: PixelF) {
        self.r += rhs.r as f64;
        self.g += rhs.g as f64;
        self.b += rhs.b as f64;
    }
}

impl std::ops::Div<f64> for PixelD {
    type Output = PixelD;

    fn div(self, rhs: f64) -> PixelD {
        PixelD {
            r: self.r / rhs,
            g: self.g / rhs,
            b: self.b / rhs,
        }
    }
}
