//! Rendering boundary
//!
//! The simulation only ever talks to a [`Renderer`]. Two sinks live here: a
//! [`DrawList`] that records calls as-is and a [`MeshRenderer`] that turns
//! them into colored triangles ready for upload.

pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use mesh::MeshRenderer;
pub use vertex::Vertex;

use glam::Vec2;

use crate::Rgb;

/// Receiver of draw calls. Calls never fail and return nothing.
pub trait Renderer {
    /// Filled axis-aligned square with sides `2 * half_extent`
    fn draw_filled_square(&mut self, center: Vec2, half_extent: f32, color: Rgb);

    /// Filled regular polygon approximating a circle
    fn draw_filled_polygon(&mut self, center: Vec2, radius: f32, sides: u32, color: Rgb);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Square {
        center: Vec2,
        half_extent: f32,
        color: Rgb,
    },
    Polygon {
        center: Vec2,
        radius: f32,
        sides: u32,
        color: Rgb,
    },
}

/// Renderer that just keeps every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Replay the recorded calls into another renderer
    pub fn replay<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for command in &self.commands {
            match *command {
                DrawCommand::Square {
                    center,
                    half_extent,
                    color,
                } => renderer.draw_filled_square(center, half_extent, color),
                DrawCommand::Polygon {
                    center,
                    radius,
                    sides,
                    color,
                } => renderer.draw_filled_polygon(center, radius, sides, color),
            }
        }
    }
}

impl Renderer for DrawList {
    fn draw_filled_square(&mut self, center: Vec2, half_extent: f32, color: Rgb) {
        self.commands.push(DrawCommand::Square {
            center,
            half_extent,
            color,
        });
    }

    fn draw_filled_polygon(&mut self, center: Vec2, radius: f32, sides: u32, color: Rgb) {
        self.commands.push(DrawCommand::Polygon {
            center,
            radius,
            sides,
            color,
        });
    }
}
