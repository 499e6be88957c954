//! Shape and border rasterization
//!
//! Paints scan results into a caller-supplied [`PixelSink`] sized like the
//! scanned image. The single-shape variants lighten the background to
//! (0.8, 0.8, 0.8) when the shape color is nearly black (squared magnitude
//! below 0.15) so the shape stays visible against the default black fill.

use log::info;

use crate::scan::PixelScan;
use crate::shape::Shape;
use vectra_core::{Pixel, PixelF, PixelSink, Vector2I};

/// Squared-magnitude threshold below which a color counts as nearly black.
const DARK_COLOR_SQR_MAG: f32 = 0.15;

/// Background used behind nearly-black shapes.
const LIGHT_BACKGROUND: PixelF = PixelF::new(0.8, 0.8, 0.8);

impl PixelScan {
    /// Paint every shape's members in its color.
    pub fn render_shapes(&self, sink: &mut impl PixelSink) {
        for shape in self.shapes() {
            paint_members(shape, sink);
        }
    }

    /// Paint the members of shape `index` alone.
    ///
    /// Out-of-range indices return without writing.
    pub fn render_shape(&self, index: usize, sink: &mut impl PixelSink) {
        let Some(shape) = self.shapes().get(index) else {
            return;
        };

        info!(
            "shape {index} has color ({:.2}, {:.2}, {:.2}) and {} chunks",
            shape.color().r,
            shape.color().g,
            shape.color().b,
            shape.chunk_count()
        );
        self.fill_background(shape.color(), sink);
        paint_members(shape, sink);
    }

    /// Paint every shape's outline trace points in its color.
    pub fn render_borders(&self, sink: &mut impl PixelSink) {
        for shape in self.shapes() {
            self.paint_border(shape, sink);
        }
    }

    /// Paint the outline trace points of shape `index` alone.
    ///
    /// Out-of-range indices return without writing.
    pub fn render_border(&self, index: usize, sink: &mut impl PixelSink) {
        let Some(shape) = self.shapes().get(index) else {
            return;
        };

        info!(
            "shape {index} has color ({:.2}, {:.2}, {:.2}) and {} chunks",
            shape.color().r,
            shape.color().g,
            shape.color().b,
            shape.chunk_count()
        );
        self.fill_background(shape.color(), sink);
        self.paint_border(shape, sink);
    }

    /// Lighten the whole sink when `color` would vanish against black.
    fn fill_background(&self, color: PixelF, sink: &mut impl PixelSink) {
        if color.sqr_mag() >= DARK_COLOR_SQR_MAG {
            return;
        }
        info!("shape color is very dark, inverting the background");
        let background = Pixel::from(LIGHT_BACKGROUND);
        for y in 0..self.image_size().y {
            for x in 0..self.image_size().x {
                sink.set(x as usize, y as usize, background);
            }
        }
    }

    fn paint_border(&self, shape: &Shape, sink: &mut impl PixelSink) {
        let color = Pixel::from(shape.color());
        for &point in shape.outer_edge_points() {
            if self.is_inside_image(point) {
                sink.set(point.x as usize, point.y as usize, color);
            }
        }
    }
}

fn paint_members(shape: &Shape, sink: &mut impl PixelSink) {
    let color = Pixel::from(shape.color());
    for x in shape.bounds().min.x..=shape.bounds().max.x {
        for y in shape.bounds().min.y..=shape.bounds().max.y {
            if shape.has(Vector2I::new(x, y)) {
                sink.set(x as usize, y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectra_core::{PixelSource, Raster};

    fn scan_of(width: usize, height: usize, pixels: &[(usize, usize, Pixel)]) -> PixelScan {
        let mut raster = Raster::new(width, height);
        for &(x, y, p) in pixels {
            raster.set(x, y, p);
        }
        let mut scan = PixelScan::from_source(&raster).unwrap();
        scan.scan_for_shapes(10.0).unwrap();
        scan
    }

    #[test]
    fn test_render_shapes_paints_members() {
        let red = Pixel::new(255, 0, 0);
        let mut scan = scan_of(2, 1, &[(0, 0, red), (1, 0, red)]);
        scan.calculate_borders();

        let mut out = Raster::new(2, 1);
        scan.render_shapes(&mut out);
        assert_eq!(out.get(0, 0), red);
        assert_eq!(out.get(1, 0), red);
    }

    #[test]
    fn test_render_shape_out_of_range_is_noop() {
        let scan = scan_of(2, 2, &[]);
        let mut out = Raster::new(2, 2);
        scan.render_shape(5, &mut out);
        assert!(out.pixels().iter().all(|&p| p == Pixel::default()));
    }

    #[test]
    fn test_dark_shape_gets_light_background() {
        // A lone dark pixel in a white field.
        let white = Pixel::new(255, 255, 255);
        let mut pixels: Vec<(usize, usize, Pixel)> = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if (x, y) != (1, 1) {
                    pixels.push((x, y, white));
                }
            }
        }
        let scan = scan_of(3, 3, &pixels);

        // Shape 1 is the dark center pixel (seed order: white field first).
        let mut out = Raster::new(3, 3);
        scan.render_shape(1, &mut out);
        assert_eq!(out.get(0, 0), Pixel::from(PixelF::new(0.8, 0.8, 0.8)));
        assert_eq!(out.get(1, 1), Pixel::new(0, 0, 0));
    }

    #[test]
    fn test_bright_shape_keeps_black_background() {
        let white = Pixel::new(255, 255, 255);
        let scan = scan_of(2, 1, &[(0, 0, white), (1, 0, white)]);

        let mut out = Raster::new(2, 1);
        scan.render_shape(0, &mut out);
        assert_eq!(out.get(0, 0), white);
    }

    #[test]
    fn test_render_borders_paints_trace_points() {
        let red = Pixel::new(255, 0, 0);
        let mut scan = scan_of(1, 1, &[(0, 0, red)]);
        scan.calculate_borders();

        let mut out = Raster::new(1, 1);
        scan.render_borders(&mut out);
        assert_eq!(out.get(0, 0), red);
    }
}
