//! Ball vs building collision
//!
//! The ball is treated as a point at its center. Only buildings whose span
//! contains the current scroll distance are tested, in sequence order; the
//! first one struck wins.

use super::state::Building;

/// Result of a collision test
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Edge the ball was pushed back to (valid when `hit`)
    pub clamp_y: f32,
}

impl CollisionResult {
    fn hit(clamp_y: f32) -> Self {
        Self { hit: true, clamp_y }
    }
}

/// Test the ball's y against every building spanning `distance`
pub fn ball_building_collision<'a>(
    ball_y: f32,
    distance: f32,
    buildings: impl IntoIterator<Item = &'a Building>,
) -> CollisionResult {
    for b in buildings {
        if !b.spans(distance) {
            continue;
        }
        if ball_y <= b.top {
            return CollisionResult::hit(b.top);
        }
        if ball_y >= b.floor_edge() {
            return CollisionResult::hit(b.floor_edge());
        }
    }
    CollisionResult::default()
}
