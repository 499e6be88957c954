//! Compass directions with quarter-turn algebra
//!
//! The outline tracer walks the dual grid between pixels holding a facing
//! direction. Coordinates here are screen-up-positive: North is +y, so
//! `turned_by(1)` (N→E→S→W) is a clockwise quarter turn.

use crate::geometry::{Vector2, Vector2I};

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    /// (0, +1)
    North,
    /// (+1, 0)
    East,
    /// (0, −1)
    South,
    /// (−1, 0)
    West,
}

/// Quarter-turn cycle, in `turned_by(+1)` order.
const CYCLE: [Compass; 4] = [Compass::North, Compass::East, Compass::South, Compass::West];

impl Compass {
    /// Unit float vector for this direction.
    pub fn to_dir(self) -> Vector2 {
        match self {
            Compass::North => Vector2::new(0.0, 1.0),
            Compass::East => Vector2::new(1.0, 0.0),
            Compass::South => Vector2::new(0.0, -1.0),
            Compass::West => Vector2::new(-1.0, 0.0),
        }
    }

    /// Unit integer vector for this direction.
    pub fn to_diri(self) -> Vector2I {
        match self {
            Compass::North => Vector2I::new(0, 1),
            Compass::East => Vector2I::new(1, 0),
            Compass::South => Vector2I::new(0, -1),
            Compass::West => Vector2I::new(-1, 0),
        }
    }

    /// Rotate by `turns` quarter turns; positive turns go N→E→S→W.
    pub fn turned_by(self, turns: i32) -> Compass {
        let start = match self {
            Compass::North => 0,
            Compass::East => 1,
            Compass::South => 2,
            Compass::West => 3,
        };
        CYCLE[(start + turns).rem_euclid(4) as usize]
    }
}
