//! Scene state: everything one run of the game owns

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::player::Player;
use super::ring::Ring;
use super::session::{GamePhase, Session};
use super::spawner::RingSpawner;
use crate::tuning::Tuning;
use crate::ui::Hud;

/// Notable things that happened during a tick, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RingSpawned { id: u32 },
    RingCollected { id: u32, score: u32 },
    RingMissed { id: u32, misses: u32 },
    Dashed,
    GameOver { score: u32, misses: u32 },
    Restarted { seed: u64 },
}

/// Complete scene state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// World size
    pub bounds: Vec2,
    /// Simulation clock (ms since the run started)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub session: Session,
    pub player: Player,
    /// Live rings, in spawn order
    pub rings: Vec<Ring>,
    pub spawner: RingSpawner,
    pub hud: Hud,
    /// Events not yet drained by the frontend
    pub events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Fresh run with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Fresh run: player centered, spawner started at t = 0.
    ///
    /// Tuning that fails [`Tuning::validate`] is still accepted; timers and
    /// drift legs clamp their durations so every tick terminates.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        if let Err(e) = tuning.validate() {
            log::warn!("Running with invalid tuning: {}", e);
        }
        let bounds = crate::world_size();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut spawner = RingSpawner::new(bounds, &tuning);
        spawner.start(0.0, &mut rng);

        log::info!("Session started with seed {}", seed);

        Self {
            seed,
            rng,
            player: Player::new(bounds * 0.5, tuning.player.clone()),
            session: Session::new(tuning.session.max_misses),
            tuning,
            bounds,
            time_ms: 0.0,
            time_ticks: 0,
            rings: Vec::new(),
            spawner,
            hud: Hud::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Throw the run away and start over with a seed drawn from this run
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let pending = std::mem::take(&mut self.events);
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
        self.events = pending;
        self.events.push(GameEvent::Restarted { seed });
        log::info!("Restarted with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[inline]
    pub fn misses(&self) -> u32 {
        self.session.misses()
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn ring(&self, id: u32) -> Option<&Ring> {
        self.rings.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(5);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!((state.score(), state.misses()), (0, 0));
        assert!(state.rings.is_empty());
        assert!(state.spawner.is_running());
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_restart_is_deterministic() {
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        a.restart();
        b.restart();
        assert_eq!(a.seed, b.seed);
        assert_ne!(a.seed, 77);
        assert_eq!(a.drain_events(), vec![GameEvent::Restarted { seed: a.seed }]);
    }

    #[test]
    fn test_degenerate_tuning_still_ticks() {
        use crate::consts::SIM_DT;
        use crate::sim::tick::{TickInput, tick};

        let mut tuning = Tuning::default();
        tuning.spawn.start_interval_ms = 0;
        tuning.spawn.min_interval_ms = 0;
        tuning.spawn.drift_min_ms = 0;
        tuning.spawn.drift_max_ms = 0;
        tuning.rings.wobble = -3;
        assert!(tuning.validate().is_err());

        let mut state = GameState::with_tuning(9, tuning);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        // One spawn per millisecond at most
        assert!(state.spawner.spawned() as f64 <= state.time_ms + 1.0);
        assert!(state.spawner.spawned() > 0);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let first = state.next_entity_id();
        assert_eq!(state.next_entity_id(), first + 1);
    }
}
