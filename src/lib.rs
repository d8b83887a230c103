//! Flying Rings - chase the rings flying out of the tube
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rings, spawner, player, session)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD presentation model

pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (top-left origin, y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
}

/// World size as a vector
#[inline]
pub fn world_size() -> Vec2 {
    Vec2::new(consts::WORLD_WIDTH, consts::WORLD_HEIGHT)
}

/// Center of the world
#[inline]
pub fn world_center() -> Vec2 {
    world_size() * 0.5
}
