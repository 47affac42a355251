//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned square
pub fn square(center: Vec2, half_extent: f32, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - Vec2::splat(half_extent);
    let max = center + Vec2::splat(half_extent);

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, min.y, color),
    ]
}

/// Generate vertices for a filled regular polygon (triangle fan from the center)
pub fn polygon(center: Vec2, radius: f32, sides: u32, color: [f32; 4]) -> Vec<Vertex> {
    if sides < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((sides * 3) as usize);

    for i in 0..sides {
        let theta1 = (i as f32 / sides as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / sides as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
