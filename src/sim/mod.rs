//! Deterministic simulation module
//!
//! All simulation logic lives here. Given the same seed and the same inputs
//! a world always evolves the same way:
//! - Seeded RNG only, owned by the world
//! - Stable iteration order (spawn order for particles, declared order for bricks)
//! - No rendering or platform dependencies beyond the `Renderer` trait

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::BrickContact;
pub use state::{Brick, BrickBehavior, Direction, Particle, World};
pub use tick::{SimEvent, TickInput, TickReport, frame, tick};
