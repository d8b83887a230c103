//! Mapping between world, screen and clip space
//!
//! The world is a fixed-size rectangle (top-left origin, y down). It is
//! letterboxed into whatever surface it is shown on, keeping aspect ratio.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World size in world units
    pub world: Vec2,
    /// Surface size in pixels
    pub size: (u32, u32),
}

impl Viewport {
    pub fn new(world: Vec2, width: u32, height: u32) -> Self {
        Self {
            world,
            size: (width, height),
        }
    }

    #[inline]
    fn size_vec(&self) -> Vec2 {
        Vec2::new(self.size.0.max(1) as f32, self.size.1.max(1) as f32)
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        let size = self.size_vec();
        (size.x / self.world.x).min(size.y / self.world.y)
    }

    /// World position to normalized device coordinates
    pub fn world_to_ndc(&self, pos: Vec2) -> Vec2 {
        let half = self.size_vec() * 0.5;
        let px = (pos - self.world * 0.5) * self.scale();
        Vec2::new(px.x / half.x, -px.y / half.y)
    }

    /// Surface pixel position (top-left origin) to world position
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let half = self.size_vec() * 0.5;
        (screen - half) / self.scale() + self.world * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_exact_fit() {
        let viewport = Viewport::new(world(), 800, 600);
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!(viewport.world_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(viewport.world_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(viewport.world_to_ndc(world()), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_wide_surface_letterboxes_sides() {
        let viewport = Viewport::new(world(), 1600, 600);
        assert_eq!(viewport.scale(), 1.0);
        let left = viewport.world_to_ndc(Vec2::new(0.0, 300.0));
        assert!((left.x + 0.5).abs() < 1e-6);
        assert_eq!(left.y, 0.0);
    }

    #[test]
    fn test_screen_to_world_inverts_mapping() {
        let viewport = Viewport::new(world(), 1200, 1200);
        let scale = viewport.scale();
        assert!((scale - 1.5).abs() < 1e-6);
        assert_eq!(viewport.screen_to_world(Vec2::new(600.0, 600.0)), Vec2::new(400.0, 300.0));
        let corner = viewport.screen_to_world(Vec2::new(0.0, 150.0));
        assert!((corner - Vec2::ZERO).length() < 1e-4);
    }
}
