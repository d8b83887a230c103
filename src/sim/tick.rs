//! Fixed timestep simulation tick
//!
//! Core game loop that advances the scene deterministically.

use glam::Vec2;

use super::ring::RingExpired;
use super::session::ExpiryOutcome;
use super::state::{GameEvent, GameState};

/// Autopilot dashes at rings farther away than this
pub const AUTOPILOT_DASH_DISTANCE: f32 = 120.0;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in world coordinates (from mouse/touch)
    pub pointer: Option<Vec2>,
    /// Pointer pressed this tick (dash, or restart after game over)
    pub pointer_down: bool,
    /// Any key pressed this tick (restart after game over)
    pub key_down: bool,
    /// Demo mode - the game chases rings by itself
    pub autopilot: bool,
}

impl TickInput {
    /// Record a key press. Every key counts as a press; `I` also toggles the
    /// autopilot.
    pub fn press_key(&mut self, key: &str) {
        if key.eq_ignore_ascii_case("i") {
            self.autopilot = !self.autopilot;
        }
        self.key_down = true;
    }
}

/// Advance the scene by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Any press after game over starts a fresh run
    if state.session.is_game_over() && (input.pointer_down || input.key_down) {
        state.restart();
        if let Some(pointer) = input.pointer {
            state.player.set_target(pointer);
        }
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;
    let now = state.time_ms;
    let playing = !state.session.is_game_over();

    if let Some(pointer) = input.pointer {
        state.player.set_target(pointer);
    }

    if playing {
        let mut dash = input.pointer_down;
        if input.autopilot {
            if let Some(target) = autopilot_target(state) {
                state.player.set_target(target);
                dash |= state.player.pos.distance(target) > AUTOPILOT_DASH_DISTANCE;
            }
        }
        // A dash overrides steering for the tick it lands on
        if dash && state.player.try_dash(now) {
            state.events.push(GameEvent::Dashed);
        } else {
            state.player.update(dt);
        }
    }
    state.player.integrate(dt, state.bounds);

    for ring in state.spawner.update(now, &mut state.rng, &mut state.next_id) {
        state.events.push(GameEvent::RingSpawned { id: ring.id });
        state.rings.push(ring);
    }

    let mut expired = Vec::new();
    for ring in &mut state.rings {
        if let Some(notice) = ring.update(now) {
            expired.push(notice);
        }
    }

    if playing {
        let (player_pos, player_radius) = (state.player.pos, state.player.radius());
        for ring in state.rings.iter_mut().filter(|r| !r.is_expired()) {
            if !ring.overlaps(player_pos, player_radius) || !ring.collect(now) {
                continue;
            }
            if let Some(score) = state.session.record_collect() {
                state.hud.update_score(score, now);
                state.events.push(GameEvent::RingCollected { id: ring.id, score });
            }
        }
    }

    for notice in expired {
        on_ring_expired(state, notice);
    }
    state.rings.retain(|r| !r.is_expired());
}

/// Expiry handler: an uncollected ring is a miss, enough misses end the run
fn on_ring_expired(state: &mut GameState, notice: RingExpired) {
    match state.session.record_expiry(notice.collected) {
        ExpiryOutcome::Ignored | ExpiryOutcome::Inert => {}
        ExpiryOutcome::Missed { misses } => {
            log::debug!("Ring {} missed ({}/{})", notice.id, misses, state.session.max_misses());
            state.events.push(GameEvent::RingMissed {
                id: notice.id,
                misses,
            });
        }
        ExpiryOutcome::GameOver { misses } => {
            state.events.push(GameEvent::RingMissed {
                id: notice.id,
                misses,
            });
            enter_game_over(state);
        }
    }
}

fn enter_game_over(state: &mut GameState) {
    let score = state.session.score();
    let misses = state.session.misses();
    state.spawner.stop();
    state.hud.show_game_over(score);
    state.events.push(GameEvent::GameOver { score, misses });
    log::info!("Game over: score {}, misses {}", score, misses);
}

/// Nearest ring still worth chasing
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let from = state.player.pos;
    state
        .rings
        .iter()
        .filter(|r| !r.is_collected() && !r.is_expired())
        .map(|r| r.pos)
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::ring::{Ring, RingShape, RingTint};
    use crate::sim::session::GamePhase;

    fn push_flat_ring(state: &mut GameState, center: Vec2, radius: f32, lifetime_ms: f64) -> u32 {
        let id = state.next_entity_id();
        let ring = Ring::new(id, RingShape::flat(center, radius), lifetime_ms, state.time_ms);
        state.rings.push(ring);
        id
    }

    fn run_until_gone(state: &mut GameState, id: u32) {
        for _ in 0..10_000 {
            if state.ring(id).is_none() {
                return;
            }
            tick(state, &TickInput::default(), SIM_DT);
        }
        panic!("ring {id} never expired");
    }

    const FAR_CORNER: Vec2 = Vec2::new(60.0, 60.0);

    #[test]
    fn test_full_session_scenario() {
        let mut state = GameState::new(12345);
        assert_eq!((state.score(), state.misses()), (0, 0));
        let center = state.player.pos;

        // Overlap scores once and recolours the ring, which stays alive
        let collected = push_flat_ring(&mut state, center, 40.0, 300.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score(), 1);
        let ring = state.ring(collected).unwrap();
        assert_eq!(ring.tint(), RingTint::Collected);
        assert!(!ring.is_expired());
        assert_eq!(state.hud.score_text(), "Score: 1");

        // Its expiry is not a miss
        run_until_gone(&mut state, collected);
        assert_eq!(state.misses(), 0);
        assert_eq!(state.score(), 1);

        // Uncollected expiries are
        let missed = push_flat_ring(&mut state, FAR_CORNER, 12.0, 100.0);
        run_until_gone(&mut state, missed);
        assert_eq!(state.misses(), 1);
        assert_eq!(state.phase(), GamePhase::Playing);

        let missed = push_flat_ring(&mut state, FAR_CORNER, 12.0, 100.0);
        run_until_gone(&mut state, missed);
        assert_eq!(state.misses(), 2);
        assert_eq!(state.phase(), GamePhase::Playing);

        let missed = push_flat_ring(&mut state, FAR_CORNER, 12.0, 100.0);
        run_until_gone(&mut state, missed);
        assert_eq!(state.misses(), 3);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.spawner.is_running());
        assert!(state.hud.is_restart_prompt_visible());
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 1, misses: 3 }));

        // Next press restarts from scratch
        let press = TickInput {
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!((state.score(), state.misses()), (0, 0));
        assert!(state.rings.is_empty());
        assert!(state.spawner.is_running());
        assert!(!state.hud.is_restart_prompt_visible());
        assert_eq!(state.time_ms, 0.0);
    }

    #[test]
    fn test_score_once_per_ring() {
        let mut state = GameState::new(1);
        let center = state.player.pos;
        push_flat_ring(&mut state, center, 40.0, 1000.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_game_over_is_inert() {
        let mut state = GameState::new(2);
        for _ in 0..3 {
            let id = push_flat_ring(&mut state, FAR_CORNER, 12.0, 50.0);
            run_until_gone(&mut state, id);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);

        // Further misses and overlaps change nothing, rings still get cleaned up
        let late_miss = push_flat_ring(&mut state, FAR_CORNER, 12.0, 50.0);
        let center = state.player.pos;
        let late_hit = push_flat_ring(&mut state, center, 40.0, 50.0);
        run_until_gone(&mut state, late_miss);
        run_until_gone(&mut state, late_hit);
        assert_eq!(state.misses(), 3);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_key_restarts_only_after_game_over() {
        let key = TickInput {
            key_down: true,
            ..Default::default()
        };
        let mut state = GameState::new(3);
        let seed = state.seed;
        tick(&mut state, &key, SIM_DT);
        assert_eq!(state.seed, seed);
        assert_eq!(state.time_ticks, 1);

        for _ in 0..3 {
            let id = push_flat_ring(&mut state, FAR_CORNER, 12.0, 50.0);
            run_until_gone(&mut state, id);
        }
        tick(&mut state, &key, SIM_DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_ne!(state.seed, seed);
    }

    #[test]
    fn test_autopilot_key_also_restarts() {
        let mut state = GameState::new(10);
        for _ in 0..3 {
            let id = push_flat_ring(&mut state, FAR_CORNER, 12.0, 50.0);
            run_until_gone(&mut state, id);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);

        let mut input = TickInput::default();
        input.press_key("I");
        assert!(input.autopilot && input.key_down);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase(), GamePhase::Playing);

        input.press_key("i");
        assert!(!input.autopilot);
    }

    #[test]
    fn test_pointer_steers_and_dashes() {
        let mut state = GameState::new(4);
        let input = TickInput {
            pointer: Some(Vec2::new(700.0, 300.0)),
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.drain_events().contains(&GameEvent::Dashed));
        // Dash speed minus one tick of drag
        assert!((state.player.vel.x - (520.0 - 420.0 * SIM_DT)).abs() < 1e-3);
        assert!(state.player.pos.x > 400.0);

        // Second press inside the cooldown does nothing
        tick(&mut state, &input, SIM_DT);
        assert!(!state.drain_events().contains(&GameEvent::Dashed));
    }

    #[test]
    fn test_spawner_feeds_rings() {
        let mut state = GameState::new(6);
        // Park the player in a corner far from the anchor's start
        state.player.pos = Vec2::new(20.0, 580.0);
        state.player.set_target(state.player.pos);
        for _ in 0..90 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.rings.len(), 1);
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::RingSpawned { .. })));
    }

    #[test]
    fn test_autopilot_collects() {
        let mut state = GameState::new(8);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..(60 * 4) {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.score() >= 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                pointer: Some(Vec2::new(120.0, 80.0)),
                ..Default::default()
            },
            TickInput {
                pointer_down: true,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];

        for step in 0..600 {
            let input = &inputs[(step / 200) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.rings.len(), state2.rings.len());
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.spawner.anchor(), state2.spawner.anchor());
        assert!((state1.player.pos - state2.player.pos).length() < 0.0001);
    }
}
