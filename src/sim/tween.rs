//! Time-based interpolation of a 2D point

use glam::Vec2;

use super::ease::{Ease, progress};

/// Moves a point from `from` to `to` over a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, start_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            ease,
        }
    }

    /// Time at which the tween reaches `to`
    #[inline]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    #[inline]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Value at `now_ms`; held at the endpoints outside the active window
    pub fn sample(&self, now_ms: f64) -> Vec2 {
        let t = self.ease.apply(progress(now_ms - self.start_ms, self.duration_ms));
        self.from.lerp(self.to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_endpoints() {
        let tween = Tween::new(Vec2::ZERO, Vec2::new(100.0, 50.0), 1000.0, 500.0, Ease::Linear);
        assert_eq!(tween.sample(0.0), Vec2::ZERO);
        assert_eq!(tween.sample(1000.0), Vec2::ZERO);
        assert_eq!(tween.sample(1250.0), Vec2::new(50.0, 25.0));
        assert_eq!(tween.sample(9999.0), Vec2::new(100.0, 50.0));
        assert!(!tween.is_finished(1499.0));
        assert!(tween.is_finished(1500.0));
    }

    #[test]
    fn test_eased_tween_stays_on_segment() {
        let tween = Tween::new(
            Vec2::new(80.0, 80.0),
            Vec2::new(720.0, 80.0),
            0.0,
            7000.0,
            Ease::SineInOut,
        );
        let mut last_x = 80.0;
        for step in 0..=70 {
            let p = tween.sample(step as f64 * 100.0);
            assert!((p.y - 80.0).abs() < 1e-4);
            assert!(p.x >= last_x - 1e-3);
            last_x = p.x;
        }
    }
}
