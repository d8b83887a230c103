//! Data-driven game balance
//!
//! Every gameplay constant lives here. Tuning files are JSON; any section or
//! field left out falls back to the shipped defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Player steering and dash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Collision radius of the dot
    pub radius: f32,
    /// Steering acceleration (units/s²)
    pub acceleration: f32,
    /// Steering speed cap (units/s)
    pub max_speed: f32,
    /// Distance to target under which steering gives way to braking
    pub deadzone: f32,
    /// Per-tick velocity multiplier inside the deadzone
    pub brake: f32,
    /// Per-axis linear drag (units/s²)
    pub drag: f32,
    /// Speed set by a dash (units/s)
    pub dash_speed: f32,
    /// Minimum time between dashes
    pub dash_cooldown_ms: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 6.0,
            acceleration: 900.0,
            max_speed: 320.0,
            deadzone: 12.0,
            brake: 0.95,
            drag: 420.0,
            dash_speed: 520.0,
            dash_cooldown_ms: 700.0,
        }
    }
}

/// Geometry of spawned rings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingTuning {
    pub lifetime_ms: f64,
    /// Far plane depth at birth
    pub z_start: f32,
    /// Near plane depth at expiry
    pub z_end: f32,
    pub focal: f32,
    /// Max lateral/vertical jitter in 3D units
    pub wobble: i32,
    /// Final radius of flat rings
    pub flat_radius: f32,
}

impl Default for RingTuning {
    fn default() -> Self {
        Self {
            lifetime_ms: 4200.0,
            z_start: 1400.0,
            z_end: 140.0,
            focal: 340.0,
            wobble: 6,
            flat_radius: 40.0,
        }
    }
}

/// Which kind of ring the spawner emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnStyle {
    #[default]
    Perspective,
    Flat,
}

/// Spawn cadence, difficulty ramp and anchor drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub style: SpawnStyle,
    pub start_interval_ms: u32,
    pub min_interval_ms: u32,
    pub interval_factor: f32,
    pub start_base_radius: u32,
    pub min_base_radius: u32,
    pub radius_factor: f32,
    /// Inset of the corner waypoints from the screen edges
    pub waypoint_margin: f32,
    pub drift_min_ms: u32,
    pub drift_max_ms: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            style: SpawnStyle::Perspective,
            start_interval_ms: 1400,
            min_interval_ms: 650,
            interval_factor: 0.985,
            start_base_radius: 64,
            min_base_radius: 28,
            radius_factor: 0.995,
            waypoint_margin: 80.0,
            drift_min_ms: 6000,
            drift_max_ms: 8000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Misses allowed before the run ends
    pub max_misses: u32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self { max_misses: 3 }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub rings: RingTuning,
    pub spawn: SpawnTuning,
    pub session: SessionTuning,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        if p.radius <= 0.0 {
            return Err(invalid("player.radius", "must be positive"));
        }
        if p.max_speed <= 0.0 || p.dash_speed <= 0.0 {
            return Err(invalid("player.max_speed", "speeds must be positive"));
        }
        if !(0.0..=1.0).contains(&p.brake) {
            return Err(invalid("player.brake", "must be within [0, 1]"));
        }
        if p.drag < 0.0 || p.dash_cooldown_ms < 0.0 || p.deadzone < 0.0 {
            return Err(invalid("player.drag", "drag, cooldown and deadzone cannot be negative"));
        }

        let r = &self.rings;
        if r.lifetime_ms <= 0.0 {
            return Err(invalid("rings.lifetime_ms", "must be positive"));
        }
        if r.z_end <= 0.0 || r.z_start < r.z_end {
            return Err(invalid(
                "rings.z_start",
                format!("depth must run far to near, got {} -> {}", r.z_start, r.z_end),
            ));
        }
        if r.focal <= 0.0 || r.flat_radius <= 0.0 || r.wobble < 0 {
            return Err(invalid("rings.focal", "focal, flat radius and wobble must be positive"));
        }

        let s = &self.spawn;
        if s.min_interval_ms == 0 || s.min_interval_ms > s.start_interval_ms {
            return Err(invalid(
                "spawn.min_interval_ms",
                format!(
                    "must be in 1..={}, got {}",
                    s.start_interval_ms, s.min_interval_ms
                ),
            ));
        }
        if s.min_base_radius == 0 || s.min_base_radius > s.start_base_radius {
            return Err(invalid(
                "spawn.min_base_radius",
                format!(
                    "must be in 1..={}, got {}",
                    s.start_base_radius, s.min_base_radius
                ),
            ));
        }
        for (field, factor) in [
            ("spawn.interval_factor", s.interval_factor),
            ("spawn.radius_factor", s.radius_factor),
        ] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(invalid(field, format!("must be within (0, 1], got {factor}")));
            }
        }
        if s.drift_min_ms == 0 || s.drift_min_ms > s.drift_max_ms {
            return Err(invalid("spawn.drift_min_ms", "drift range must be non-empty and positive"));
        }
        if s.waypoint_margin < 0.0 {
            return Err(invalid("spawn.waypoint_margin", "cannot be negative"));
        }

        if self.session.max_misses == 0 {
            return Err(invalid("session.max_misses", "must allow at least one miss"));
        }
        Ok(())
    }
}
