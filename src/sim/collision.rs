//! Overlap tests and world bounds
//!
//! Every tracked body in the game is a circle, so overlap reduces to a
//! center-distance check.

use glam::Vec2;

/// True if two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Result of keeping a circular body inside the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsResult {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Clamp a body of `radius` into `[0, bounds]` with zero bounce: the velocity
/// component pointing into a touched wall is removed
pub fn clamp_to_bounds(pos: Vec2, vel: Vec2, radius: f32, bounds: Vec2) -> BoundsResult {
    let min = Vec2::splat(radius);
    let max = (bounds - Vec2::splat(radius)).max(min);
    let clamped = pos.clamp(min, max);
    let mut vel = vel;

    if (pos.x < min.x && vel.x < 0.0) || (pos.x > max.x && vel.x > 0.0) {
        vel.x = 0.0;
    }
    if (pos.y < min.y && vel.y < 0.0) || (pos.y > max.y && vel.y > 0.0) {
        vel.y = 0.0;
    }

    BoundsResult { pos: clamped, vel }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(100.0, 100.0);
        assert!(circles_overlap(a, 6.0, Vec2::new(110.0, 100.0), 5.0));
        assert!(!circles_overlap(a, 6.0, Vec2::new(120.0, 100.0), 5.0));
        // Touching is not overlapping
        assert!(!circles_overlap(a, 5.0, Vec2::new(110.0, 100.0), 5.0));
        // Point fully inside a large disc
        assert!(circles_overlap(a, 6.0, Vec2::new(130.0, 130.0), 60.0));
    }

    #[test]
    fn test_clamp_inside_is_untouched() {
        let bounds = Vec2::new(800.0, 600.0);
        let result = clamp_to_bounds(Vec2::new(400.0, 300.0), Vec2::new(50.0, -20.0), 6.0, bounds);
        assert_eq!(result.pos, Vec2::new(400.0, 300.0));
        assert_eq!(result.vel, Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_clamp_left_wall_kills_inward_velocity() {
        let bounds = Vec2::new(800.0, 600.0);
        let result = clamp_to_bounds(Vec2::new(2.0, 300.0), Vec2::new(-100.0, 30.0), 6.0, bounds);
        assert_eq!(result.pos, Vec2::new(6.0, 300.0));
        assert_eq!(result.vel, Vec2::new(0.0, 30.0));
    }

    #[test]
    fn test_clamp_corner() {
        let bounds = Vec2::new(800.0, 600.0);
        let result = clamp_to_bounds(Vec2::new(805.0, 610.0), Vec2::new(10.0, 10.0), 6.0, bounds);
        assert_eq!(result.pos, Vec2::new(794.0, 594.0));
        assert_eq!(result.vel, Vec2::ZERO);
    }
}
