//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segment count that keeps edges smooth at the given radius
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(16, 96)
}

#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + radius * Vec2::from_angle(theta)
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(segments as usize * 3);
    let step = TAU / segments as f32;

    for i in 0..segments {
        let a = on_circle(center, radius, i as f32 * step);
        let b = on_circle(center, radius, (i + 1) as f32 * step);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Annulus between two radii
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(segments as usize * 6);
    let step = TAU / segments as f32;

    for i in 0..segments {
        let (t1, t2) = (i as f32 * step, (i + 1) as f32 * step);
        let inner1 = on_circle(center, inner_radius, t1);
        let outer1 = on_circle(center, outer_radius, t1);
        let inner2 = on_circle(center, inner_radius, t2);
        let outer2 = on_circle(center, outer_radius, t2);

        for p in [inner1, outer1, inner2, inner2, outer1, outer2] {
            vertices.push(Vertex::new(p.x, p.y, color));
        }
    }

    vertices
}

/// Circle outline of the given stroke width, centered on the radius
pub fn stroked_circle(center: Vec2, radius: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = thickness * 0.5;
    ring(
        center,
        (radius - half).max(0.0),
        radius + half,
        color,
        segments_for(radius),
    )
}
