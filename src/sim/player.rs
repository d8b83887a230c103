//! The player's dot
//!
//! Steers toward the pointer target each tick and can dash on a cooldown.
//! Steering only touches velocity; `integrate` moves the body.

use glam::Vec2;

use super::collision::clamp_to_bounds;
use crate::tuning::PlayerTuning;

/// Dashing toward a target closer than this is skipped (squared distance)
const DASH_MIN_DISTANCE_SQ: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last pointer position
    pub target: Vec2,
    last_dash_ms: Option<f64>,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            target: pos,
            last_dash_ms: None,
            tuning,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.tuning.radius
    }

    #[inline]
    pub fn last_dash_ms(&self) -> Option<f64> {
        self.last_dash_ms
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Whether the dash cooldown has elapsed at `now_ms`
    pub fn dash_ready(&self, now_ms: f64) -> bool {
        match self.last_dash_ms {
            Some(at) => now_ms - at >= self.tuning.dash_cooldown_ms,
            None => true,
        }
    }

    /// Snap velocity toward the target at dash speed.
    ///
    /// Returns true if an impulse was applied. The cooldown restarts even when
    /// the target is too close to give a direction.
    pub fn try_dash(&mut self, now_ms: f64) -> bool {
        if !self.dash_ready(now_ms) {
            return false;
        }
        self.last_dash_ms = Some(now_ms);

        let dir = self.target - self.pos;
        if dir.length_squared() > DASH_MIN_DISTANCE_SQ {
            self.vel = dir.normalize() * self.tuning.dash_speed;
            true
        } else {
            false
        }
    }

    /// Steering: accelerate toward the target outside the deadzone, brake
    /// gently inside it
    pub fn update(&mut self, dt: f32) {
        let to_target = self.target - self.pos;
        if to_target.length() > self.tuning.deadzone {
            self.vel += to_target.normalize() * self.tuning.acceleration * dt;
            self.vel = self.vel.clamp_length_max(self.tuning.max_speed);
        } else {
            self.vel *= self.tuning.brake;
        }
    }

    /// Body physics: per-axis drag, movement, world bounds
    pub fn integrate(&mut self, dt: f32, bounds: Vec2) {
        let drag = self.tuning.drag * dt;
        self.vel.x = apply_drag(self.vel.x, drag);
        self.vel.y = apply_drag(self.vel.y, drag);

        let moved = self.pos + self.vel * dt;
        let result = clamp_to_bounds(moved, self.vel, self.tuning.radius, bounds);
        self.pos = result.pos;
        self.vel = result.vel;
    }
}

/// Reduce the magnitude of one velocity component without flipping its sign
#[inline]
fn apply_drag(v: f32, drag: f32) -> f32 {
    if v > drag {
        v - drag
    } else if v < -drag {
        v + drag
    } else {
        0.0
    }
}
