//! Outline tracing
//!
//! Walks the boundary of a shape on the 4-connected dual grid: the tracer
//! state is a cell `spot` just *outside* the shape plus a facing direction,
//! and the emitted outline lies on the half-edges between pixels. The walk
//! keeps the shape on the faced side, so every emitted half-integer point
//! is `spot + 0.5 * facing` and every integer trace point is the faced
//! pixel itself.

use crate::shape::Shape;
use vectra_core::{Compass, Vector2, Vector2I};

/// Trace the outer edge of `shape` as a closed loop.
///
/// Seeds at the first member of the top bounds row, standing one cell above
/// it facing North, and steps until the (position, facing) pair returns to
/// the seed state. The step count is bounded by `4 * chunk_count + 1`.
pub(crate) fn trace_outline(shape: &mut Shape) {
    shape.outer_edge.clear();
    shape.outer_edge_points.clear();

    let bounds = shape.bounds();
    let mut seed = None;
    for x in bounds.min.x..=bounds.max.x {
        if shape.has(Vector2I::new(x, bounds.min.y)) {
            seed = Some(Vector2I::new(x, bounds.min.y - 1));
            break;
        }
    }
    // A tight bounds always has a member on its top row.
    let Some(first) = seed else {
        return;
    };

    let first_dir = Compass::North;
    let mut spot = first;
    let mut edge = first_dir;

    let max_steps = shape.chunk_count() * 4 + 1;
    for _ in 0..max_steps {
        shape.insert_outer_edge(Vector2::from(spot) + edge.to_dir() * 0.5);
        shape.insert_outer_edge_point(spot + edge.to_diri());

        let ahead_left = spot + edge.turned_by(1).to_diri();
        let ahead_diagonal = ahead_left + edge.to_diri();

        if shape.has(ahead_left) {
            edge = edge.turned_by(1);
        } else if shape.has(ahead_diagonal) {
            spot = ahead_left;
        } else {
            spot = ahead_diagonal;
            edge = edge.turned_by(-1);
        }

        if spot == first && edge == first_dir {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectra_core::PixelF;

    fn shape_of(image_size: (i32, i32), chunks: &[(i32, i32)]) -> Shape {
        let size = Vector2I::new(image_size.0, image_size.1);
        let mut shape = Shape::new(
            PixelF::new(0.5, 0.5, 0.5),
            size,
            Vector2I::new(chunks[0].0, chunks[0].1),
        );
        for &(x, y) in &chunks[1..] {
            shape.insert_chunk(Vector2I::new(x, y)).unwrap();
        }
        shape
    }

    #[test]
    fn test_single_pixel_is_four_point_loop() {
        let mut shape = shape_of((1, 1), &[(0, 0)]);
        trace_outline(&mut shape);

        assert_eq!(shape.outer_edge().len(), 4);
        assert_eq!(shape.outer_edge_points().len(), 4);
        // All trace points face the lone pixel.
        assert!(shape
            .outer_edge_points()
            .iter()
            .all(|&p| p == Vector2I::new(0, 0)));
    }

    #[test]
    fn test_square_outline_point_count() {
        let mut chunks = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                chunks.push((x, y));
            }
        }
        let mut shape = shape_of((4, 4), &chunks);
        trace_outline(&mut shape);

        assert_eq!(shape.outer_edge().len(), 16);
        assert_eq!(shape.outer_edge_points().len(), 16);
    }

    #[test]
    fn test_edges_are_half_integer() {
        let mut shape = shape_of((3, 3), &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)]);
        trace_outline(&mut shape);

        assert_eq!(shape.outer_edge().len(), shape.outer_edge_points().len());
        for edge in shape.outer_edge() {
            // Each point sits on a half-edge: one coordinate integral, the
            // other offset by exactly 0.5.
            let fx = (edge.x * 2.0).fract();
            let fy = (edge.y * 2.0).fract();
            assert_eq!(fx, 0.0);
            assert_eq!(fy, 0.0);
            assert!(
                (edge.x.fract().abs() == 0.5) ^ (edge.y.fract().abs() == 0.5),
                "expected exactly one half coordinate in {edge:?}"
            );
        }
    }

    #[test]
    fn test_trace_points_stay_in_shape() {
        let mut shape = shape_of((4, 4), &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        trace_outline(&mut shape);

        for &p in shape.outer_edge_points() {
            assert!(shape.has(p), "trace point {p:?} not a member");
        }
    }

    #[test]
    fn test_retrace_does_not_accumulate() {
        let mut shape = shape_of((2, 2), &[(0, 0), (1, 0)]);
        trace_outline(&mut shape);
        let len = shape.outer_edge().len();
        trace_outline(&mut shape);
        assert_eq!(shape.outer_edge().len(), len);
    }
}
