//! Easing curves and interpolation helpers
//!
//! Every animation in the game is a pure function of a normalized time
//! fraction, so these stay free of any clock.

use serde::{Deserialize, Serialize};

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized progress of `elapsed` through `duration`, clamped to [0, 1]
#[inline]
pub fn progress(elapsed: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0) as f32
}

/// Named easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    /// Decelerating quadratic
    QuadOut,
    /// Symmetric sine in/out
    SineInOut,
}

impl Ease {
    /// Map t in [0, 1] through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::SineInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    0.5 * (1.0 - (std::f32::consts::PI * t).cos())
                }
            }
        }
    }

    /// There-and-back pulse: rises 0 -> 1 over `half_ms`, falls back over the
    /// next `half_ms`, then rests at 0
    pub fn yoyo(self, elapsed_ms: f64, half_ms: f64) -> f32 {
        if elapsed_ms < 0.0 || half_ms <= 0.0 || elapsed_ms >= half_ms * 2.0 {
            return 0.0;
        }
        if elapsed_ms < half_ms {
            self.apply(progress(elapsed_ms, half_ms))
        } else {
            self.apply(1.0 - progress(elapsed_ms - half_ms, half_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for ease in [Ease::Linear, Ease::QuadOut, Ease::SineInOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quad_out_leads_linear() {
        assert!(Ease::QuadOut.apply(0.25) > 0.25);
        assert!((Ease::QuadOut.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_sine_in_out_is_symmetric() {
        let a = Ease::SineInOut.apply(0.2);
        let b = Ease::SineInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-5);
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_yoyo_returns_to_rest() {
        assert_eq!(Ease::Linear.yoyo(0.0, 100.0), 0.0);
        assert!((Ease::Linear.yoyo(100.0, 100.0) - 1.0).abs() < 1e-6);
        assert!((Ease::Linear.yoyo(150.0, 100.0) - 0.5).abs() < 1e-6);
        assert_eq!(Ease::Linear.yoyo(200.0, 100.0), 0.0);
        assert_eq!(Ease::Linear.yoyo(-5.0, 100.0), 0.0);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(-10.0, 100.0), 0.0);
        assert_eq!(progress(250.0, 100.0), 1.0);
        assert_eq!(progress(5.0, 0.0), 1.0);
    }
}
