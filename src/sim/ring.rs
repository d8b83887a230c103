//! Ring entity
//!
//! A ring's geometry is a pure function of how far it is through its
//! lifetime. Two shapes exist: a flat ring that grows in place, and a
//! perspective ring that flies out of the tube toward the viewer.

use glam::Vec2;

use super::collision::circles_overlap;
use super::ease::{Ease, lerp, progress};

/// Lifetime used when the caller does not pick one
pub const DEFAULT_LIFETIME_MS: f64 = 4000.0;
/// Final radius of a flat ring when the caller does not pick one
pub const DEFAULT_FLAT_RADIUS: f32 = 40.0;
/// Smallest radius a flat ring starts at
pub const MIN_FLAT_START_RADIUS: f32 = 10.0;
/// Fraction of the final radius a flat ring starts at
pub const FLAT_START_FRACTION: f32 = 0.55;

/// Stroke of a flat ring
pub const FLAT_THICKNESS: f32 = 3.0;
/// Stroke of a perspective ring at birth and expiry
pub const NEAR_THICKNESS: f32 = 4.2;
pub const FAR_THICKNESS: f32 = 1.2;
/// Opacity of a perspective ring at birth
pub const FAR_ALPHA: f32 = 0.35;

/// Collect pulse: peak visual scale and duration of each half
pub const COLLECT_PULSE_SCALE: f32 = 1.08;
pub const COLLECT_PULSE_HALF_MS: f64 = 120.0;

/// Fixed 3D placement of a perspective ring inside the tube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen-space vanishing point
    pub center: Vec2,
    /// Lateral/vertical offset in 3D units
    pub offset: Vec2,
    /// Ring radius in 3D units
    pub base_radius: f32,
    /// Far plane depth at birth
    pub z_start: f32,
    /// Near plane depth at expiry
    pub z_end: f32,
    pub focal: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            offset: Vec2::ZERO,
            base_radius: 60.0,
            z_start: 1400.0,
            z_end: 160.0,
            focal: 340.0,
        }
    }
}

impl Projection {
    /// Depth at lifetime fraction `t`
    #[inline]
    pub fn depth(&self, t: f32) -> f32 {
        lerp(self.z_start, self.z_end, t)
    }

    /// Focal scale at lifetime fraction `t`; depth is floored at 1
    #[inline]
    pub fn scale(&self, t: f32) -> f32 {
        self.focal / self.depth(t).max(1.0)
    }

    #[inline]
    pub fn position(&self, t: f32) -> Vec2 {
        self.center + self.offset * self.scale(t)
    }

    #[inline]
    pub fn radius(&self, t: f32) -> f32 {
        self.base_radius * self.scale(t)
    }
}

/// Geometry mode of a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingShape {
    /// Grows in place from `start_radius` to `end_radius`
    Flat {
        center: Vec2,
        start_radius: f32,
        end_radius: f32,
    },
    /// Flies toward the viewer along the tube
    Perspective(Projection),
}

impl RingShape {
    /// Flat ring that ends at `radius`
    pub fn flat(center: Vec2, radius: f32) -> Self {
        let start_radius = (radius * FLAT_START_FRACTION).floor().max(MIN_FLAT_START_RADIUS);
        RingShape::Flat {
            center,
            start_radius,
            end_radius: radius,
        }
    }

    pub fn perspective(projection: Projection) -> Self {
        RingShape::Perspective(projection)
    }
}

/// Colour state of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingTint {
    Live,
    Collected,
}

impl RingTint {
    /// 0xRRGGBB colour
    pub fn rgb(self) -> u32 {
        match self {
            RingTint::Live => 0xffd34d,
            RingTint::Collected => 0x36d972,
        }
    }
}

/// Emitted once, on the first update past the ring's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingExpired {
    pub id: u32,
    pub collected: bool,
}

/// A ring flying through the scene
#[derive(Debug, Clone)]
pub struct Ring {
    pub id: u32,
    shape: RingShape,
    born_at_ms: f64,
    lifetime_ms: f64,
    collected_at_ms: Option<f64>,
    expired: bool,
    /// Screen position of the ring center (derived)
    pub pos: Vec2,
    /// Screen radius, also the collision radius (derived)
    pub radius: f32,
    /// Stroke thickness (derived)
    pub thickness: f32,
    /// Opacity (derived)
    pub alpha: f32,
}

impl Ring {
    /// Create a ring born at `now_ms`, with its geometry already evaluated
    pub fn new(id: u32, shape: RingShape, lifetime_ms: f64, now_ms: f64) -> Self {
        let mut ring = Self {
            id,
            shape,
            born_at_ms: now_ms,
            lifetime_ms,
            collected_at_ms: None,
            expired: false,
            pos: Vec2::ZERO,
            radius: 0.0,
            thickness: 0.0,
            alpha: 0.0,
        };
        ring.apply_fraction(0.0);
        ring
    }

    #[inline]
    pub fn shape(&self) -> &RingShape {
        &self.shape
    }

    #[inline]
    pub fn lifetime_ms(&self) -> f64 {
        self.lifetime_ms
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected_at_ms.is_some()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Lifetime fraction at `now_ms`, clamped to [0, 1]
    pub fn fraction(&self, now_ms: f64) -> f32 {
        progress(now_ms - self.born_at_ms, self.lifetime_ms)
    }

    fn apply_fraction(&mut self, t: f32) {
        match self.shape {
            RingShape::Flat {
                center,
                start_radius,
                end_radius,
            } => {
                self.pos = center;
                self.radius = lerp(start_radius, end_radius, Ease::QuadOut.apply(t));
                self.thickness = FLAT_THICKNESS;
                self.alpha = 1.0;
            }
            RingShape::Perspective(projection) => {
                self.pos = projection.position(t);
                self.radius = projection.radius(t);
                self.thickness = lerp(FAR_THICKNESS, NEAR_THICKNESS, t);
                self.alpha = lerp(FAR_ALPHA, 1.0, t);
            }
        }
    }

    /// Re-derive geometry for `now_ms`. Returns the expiry notice exactly
    /// once, on the first call where elapsed time exceeds the lifetime.
    pub fn update(&mut self, now_ms: f64) -> Option<RingExpired> {
        let t = self.fraction(now_ms);
        self.apply_fraction(t);

        if !self.expired && now_ms - self.born_at_ms > self.lifetime_ms {
            self.expired = true;
            return Some(RingExpired {
                id: self.id,
                collected: self.is_collected(),
            });
        }
        None
    }

    /// Mark the ring collected. Returns false if it already was.
    pub fn collect(&mut self, now_ms: f64) -> bool {
        if self.is_collected() {
            return false;
        }
        self.collected_at_ms = Some(now_ms);
        true
    }

    pub fn tint(&self) -> RingTint {
        if self.is_collected() {
            RingTint::Collected
        } else {
            RingTint::Live
        }
    }

    /// Visual scale from the collect pulse (1.0 at rest)
    pub fn pulse_scale(&self, now_ms: f64) -> f32 {
        match self.collected_at_ms {
            Some(at) => {
                let pulse = Ease::QuadOut.yoyo(now_ms - at, COLLECT_PULSE_HALF_MS);
                lerp(1.0, COLLECT_PULSE_SCALE, pulse)
            }
            None => 1.0,
        }
    }

    /// Whether a circular body overlaps this ring's collision disc
    #[inline]
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        circles_overlap(self.pos, self.radius, pos, radius)
    }
}
