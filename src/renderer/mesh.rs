//! CPU-side mesh building
//!
//! Collects every draw call of a frame into one triangle list.

use glam::Vec2;

use super::vertex::{Vertex, rgba};
use super::{Renderer, shapes};
use crate::Rgb;

/// Renderer that tessellates draw calls into a vertex list
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    pub vertices: Vec<Vertex>,
    /// Draw calls received since the last clear
    pub draw_calls: u32,
}

impl MeshRenderer {
    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draw_calls = 0;
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes for a vertex buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Renderer for MeshRenderer {
    fn draw_filled_square(&mut self, center: Vec2, half_extent: f32, color: Rgb) {
        self.vertices
            .extend(shapes::square(center, half_extent, rgba(color)));
        self.draw_calls += 1;
    }

    fn draw_filled_polygon(&mut self, center: Vec2, radius: f32, sides: u32, color: Rgb) {
        self.vertices
            .extend(shapes::polygon(center, radius, sides, rgba(color)));
        self.draw_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::DrawList;
    use crate::sim::World;

    #[test]
    fn test_world_mesh_sizes() {
        let mut world = World::with_seed(5);
        world.spawn_particle();
        world.spawn_particle();

        let mut mesh = MeshRenderer::default();
        world.draw(&mut mesh);

        assert_eq!(mesh.draw_calls as usize, BRICK_COUNT + 2);
        assert_eq!(
            mesh.triangle_count(),
            BRICK_COUNT * 2 + 2 * PARTICLE_SIDES as usize
        );
        assert_eq!(
            mesh.vertex_bytes().len(),
            mesh.vertices.len() * std::mem::size_of::<Vertex>()
        );
    }

    #[test]
    fn test_colors_are_clamped() {
        let mut mesh = MeshRenderer::default();
        mesh.draw_filled_polygon(Vec2::ZERO, 0.05, 8, [3.0, 2.0, 0.0]);
        assert!(mesh.vertices.iter().all(|v| v.color == [1.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_replay_matches_direct_draw() {
        let mut world = World::with_seed(17);
        world.spawn_particle();

        let mut list = DrawList::default();
        world.draw(&mut list);
        let mut replayed = MeshRenderer::default();
        list.replay(&mut replayed);

        let mut direct = MeshRenderer::default();
        world.draw(&mut direct);

        assert_eq!(replayed.vertices, direct.vertices);

        direct.clear();
        assert!(direct.vertices.is_empty());
        assert_eq!(direct.draw_calls, 0);
    }
}
