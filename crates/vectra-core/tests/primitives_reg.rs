//! Core primitive regression tests
//!
//! Cross-type behavior the unit tests don't cover: agreement between the
//! byte and normalized similarity metrics over a sweep of distances,
//! compass walks composing back to the origin, and trait-object access to
//! a raster through the source/sink seams.

use vectra_core::{Bounds2I, Compass, GridIndexer, Pixel, PixelF, PixelSink, PixelSource, Raster, Vector2I};

#[test]
fn byte_and_float_metrics_agree_on_scaled_thresholds() {
    // The normalized metric divides the threshold by 147 while distances
    // shrink by 255, so it is strictly tighter; but verdicts must agree
    // whenever the byte distance is clearly on either side of the
    // normalized cutoff (threshold * 255 / 147).
    let base = Pixel::new(100, 100, 100);
    for step in 0u8..=40 {
        let other = Pixel::new(100 + step, 100, 100);
        let byte_distance = base.difference_from(&other);

        for threshold in [10.0f32, 20.0, 45.0] {
            let float_cutoff = threshold * 255.0 / 147.0;
            let float_similar =
                PixelF::from(base).is_similar_to(&PixelF::from(other), threshold);

            if byte_distance < float_cutoff - 0.5 {
                assert!(float_similar, "step {step} threshold {threshold}");
            }
            if byte_distance > float_cutoff + 0.5 {
                assert!(!float_similar, "step {step} threshold {threshold}");
            }
        }
    }
}

#[test]
fn compass_square_walk_returns_home() {
    // Four steps, turning right each time, traces a unit square.
    let mut position = Vector2I::new(0, 0);
    let mut facing = Compass::North;
    for _ in 0..4 {
        position += facing.to_diri();
        facing = facing.turned_by(1);
    }
    assert_eq!(position, Vector2I::new(0, 0));
    assert_eq!(facing, Compass::North);
}

#[test]
fn compass_float_and_integer_vectors_match() {
    let mut dir = Compass::East;
    for _ in 0..4 {
        let f = dir.to_dir();
        let i = dir.to_diri();
        assert_eq!((f.x, f.y), (i.x as f32, i.y as f32));
        dir = dir.turned_by(-1);
    }
}

#[test]
fn bounds_grown_point_by_point_stay_tight() {
    let points = [
        Vector2I::new(4, 4),
        Vector2I::new(1, 6),
        Vector2I::new(7, 2),
        Vector2I::new(4, 9),
    ];
    let mut bounds = Bounds2I::at_point(points[0]);
    for &p in &points[1..] {
        bounds.include(p);
    }

    assert_eq!(bounds.min, Vector2I::new(1, 2));
    assert_eq!(bounds.max, Vector2I::new(7, 9));
    assert_eq!(bounds.area(), 6 * 7);
}

#[test]
fn indexer_covers_grid_without_collisions() {
    let indexer = GridIndexer::new(5);
    let mut seen = vec![false; 5 * 4];
    for y in 0..4 {
        for x in 0..5 {
            let i = indexer.index(x, y);
            assert!(!seen[i], "collision at ({x},{y})");
            seen[i] = true;
            assert_eq!(indexer.reverse(i), Vector2I::new(x, y));
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn raster_works_through_trait_objects() {
    let mut raster = Raster::new(3, 2);
    {
        let sink: &mut dyn PixelSink = &mut raster;
        sink.set(2, 1, Pixel::new(9, 8, 7));
    }

    let source: &dyn PixelSource = &raster;
    assert_eq!(source.width(), 3);
    assert_eq!(source.height(), 2);
    assert_eq!(source.get(2, 1), Pixel::new(9, 8, 7));
    assert_eq!(source.get(0, 0), Pixel::default());
}
