//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (rings in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod ease;
pub mod player;
pub mod ring;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;
pub mod tween;

pub use collision::{circles_overlap, clamp_to_bounds};
pub use player::Player;
pub use ring::{Projection, Ring, RingExpired, RingShape, RingTint};
pub use session::{ExpiryOutcome, GamePhase, Session};
pub use spawner::{AnchorDrift, RingSpawner, SpawnSchedule};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
