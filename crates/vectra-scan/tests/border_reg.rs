//! Outline tracing regression tests
//!
//! Verifies the dual-grid walk at pipeline level: point counts on squares,
//! the float/integer point pairing, and outline stability across
//! compression.

use vectra_core::{Pixel, PixelSink, Raster};
use vectra_scan::PixelScan;

fn scanned(width: usize, height: usize, pixels: &[(usize, usize, Pixel)]) -> PixelScan {
    let mut raster = Raster::new(width, height);
    for &(x, y, p) in pixels {
        raster.set(x, y, p);
    }
    let mut scan = PixelScan::from_source(&raster).unwrap();
    scan.scan_for_shapes(10.0).unwrap();
    scan.calculate_borders();
    scan
}

#[test]
fn square_perimeter_point_count() {
    let grey = Pixel::new(100, 100, 100);
    let mut pixels = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            pixels.push((x, y, grey));
        }
    }
    let scan = scanned(4, 4, &pixels);

    assert_eq!(scan.shapes().len(), 1);
    assert_eq!(scan.shapes()[0].outer_edge().len(), 16);
    assert_eq!(scan.shapes()[0].outer_edge_points().len(), 16);
}

#[test]
fn outlines_are_nonempty_and_paired() {
    let scan = scanned(5, 3, &[(1, 1, Pixel::new(255, 0, 0)), (2, 1, Pixel::new(255, 0, 0))]);

    assert!(scan.has_borders());
    for shape in scan.shapes() {
        assert!(!shape.outer_edge().is_empty());
        assert_eq!(shape.outer_edge().len(), shape.outer_edge_points().len());

        // Each float point is its integer trace point pulled back half a
        // cell against the facing direction: they differ by exactly 0.5 in
        // one axis and 0 in the other.
        for (edge, point) in shape.outer_edge().iter().zip(shape.outer_edge_points()) {
            let dx = (edge.x - point.x as f32).abs();
            let dy = (edge.y - point.y as f32).abs();
            assert!(
                (dx == 0.5 && dy == 0.0) || (dx == 0.0 && dy == 0.5),
                "edge {edge:?} does not pair with point {point:?}"
            );
        }
    }
}

#[test]
fn retracing_compressed_shapes_matches() {
    // Compression changes the bitmap layout but not membership, so tracing
    // again on compressed shapes reproduces the same outlines.
    let white = Pixel::new(255, 255, 255);
    let scan_a = scanned(4, 4, &[(1, 1, white), (2, 2, white)]);
    let mut scan_b = scanned(4, 4, &[(1, 1, white), (2, 2, white)]);
    scan_b.compress_shapes();
    scan_b.calculate_borders();

    for (a, b) in scan_a.shapes().iter().zip(scan_b.shapes()) {
        assert_eq!(a.outer_edge(), b.outer_edge());
        assert_eq!(a.outer_edge_points(), b.outer_edge_points());
    }
}

#[test]
fn border_step_bound_holds() {
    // The tracer is bounded by 4 * chunk_count + 1 steps per shape.
    let grey = Pixel::new(128, 128, 128);
    let mut pixels = Vec::new();
    for y in 0..3i32 {
        for x in 0..5i32 {
            if !(y == 1 && x == 2) {
                pixels.push((x as usize, y as usize, grey));
            }
        }
    }
    let scan = scanned(5, 3, &pixels);

    for shape in scan.shapes() {
        assert!(shape.outer_edge().len() <= shape.chunk_count() * 4 + 1);
    }
}
