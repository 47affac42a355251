//! Coding Collisions - particles and bricks in a square arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bricks, particles, tick loop)
//! - `renderer`: Draw-call sink and CPU-side tessellation
//! - `settings`: JSON configuration for the world and the headless driver

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{DrawCommand, DrawList, MeshRenderer, Renderer};
pub use settings::{ConfigError, RecolorMode, SimConfig};
pub use sim::{Brick, BrickBehavior, Direction, Particle, TickInput, World, frame, tick};

/// RGB color with components nominally in `[0, 1]`
pub type Rgb = [f32; 3];

/// Simulation constants
pub mod consts {
    /// Arena half-size; the playfield is `[-ARENA_BOUND, ARENA_BOUND]` on both axes
    pub const ARENA_BOUND: f32 = 1.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 0.05;
    pub const PARTICLE_START_SPEED: f32 = 0.01;
    /// Speed lost every time a particle hits the arena wall
    pub const WALL_SPEED_DECAY: f32 = 0.002;
    /// Sides used when a particle is drawn as a polygon
    pub const PARTICLE_SIDES: u32 = 360;

    /// Brick defaults
    pub const BRICK_COUNT: usize = 9;
    pub const BRICK_HALF_EXTENT: f32 = 0.2;
    pub const BRICK_START_STRENGTH: i32 = 4000;
    pub const BRICK_DAMAGE: i32 = 200;
    /// Push applied to a particle that bounced off a reflective brick
    pub const REFLECT_NUDGE: (f32, f32) = (0.03, 0.04);

    /// Upper bound of the legacy 15-bit random source
    pub const LEGACY_RAND_MAX: u32 = 32767;
    /// Divisor used by legacy recoloring
    pub const LEGACY_COLOR_DIVISOR: u32 = 10_000;
}

pub mod colors {
    use crate::Rgb;

    pub const WHITE: Rgb = [1.0, 1.0, 1.0];
    pub const GREEN: Rgb = [0.0, 1.0, 0.0];
    pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
    pub const RED: Rgb = [1.0, 0.0, 0.0];
}
