//! Scene to vertex list

use super::shapes;
use super::vertex::{Vertex, colors, hex};
use crate::sim::GameState;

/// Build world-space geometry for the current scene
///
/// Rings are emitted newest first so the older, nearer ones land on top.
/// The player is drawn last.
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let now = state.time_ms;
    let mut vertices = Vec::new();

    for ring in state.rings.iter().rev() {
        let color = hex(ring.tint().rgb(), ring.alpha);
        let radius = ring.radius * ring.pulse_scale(now);
        vertices.extend(shapes::stroked_circle(ring.pos, radius, ring.thickness, color));
    }

    let player = &state.player;
    vertices.extend(shapes::circle(
        player.pos,
        player.radius(),
        colors::PLAYER,
        shapes::segments_for(player.radius()),
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ring::{Ring, RingShape};
    use glam::Vec2;

    #[test]
    fn test_player_only() {
        let state = GameState::new(1);
        let vertices = build_frame(&state);
        assert_eq!(vertices.len(), shapes::segments_for(state.player.radius()) as usize * 3);
        assert!(vertices.iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_rings_drawn_newest_first_then_player() {
        let mut state = GameState::new(1);
        let older = Ring::new(1, RingShape::flat(Vec2::new(100.0, 100.0), 40.0), 4000.0, 0.0);
        let mut newer = Ring::new(2, RingShape::flat(Vec2::new(600.0, 400.0), 40.0), 4000.0, 0.0);
        newer.alpha = 0.5;
        state.rings = vec![older, newer];

        let vertices = build_frame(&state);
        assert_eq!(vertices[0].color[3], 0.5);
        assert!(vertices[0].position[0] > 500.0);
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::PLAYER));
    }
}
