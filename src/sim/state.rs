//! World state and core simulation types
//!
//! Everything a tick touches lives here: the bricks, the particles and the
//! seeded RNG that drives every random choice.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Renderer;
use crate::settings::{BrickSpec, SimConfig};
use crate::{Rgb, colors};

/// One of the eight discrete headings a particle can travel along.
///
/// Each heading is a combination of at most one vertical and one horizontal
/// component. "Up" decreases `y` and "right" increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Right = 2,
    Down = 3,
    Left = 4,
    UpRight = 5,
    UpLeft = 6,
    DownRight = 7,
    DownLeft = 8,
}

impl Direction {
    /// All headings ordered by code
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    /// Decode a heading code in `1..=8`
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code).checked_sub(1)?).copied()
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Pick a heading uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn moves_up(self) -> bool {
        matches!(self, Direction::Up | Direction::UpRight | Direction::UpLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Direction::Right | Direction::UpRight | Direction::DownRight)
    }

    pub fn moves_down(self) -> bool {
        matches!(self, Direction::Down | Direction::DownRight | Direction::DownLeft)
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Direction::Left | Direction::UpLeft | Direction::DownLeft)
    }
}

/// How a brick reacts when a particle lands inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickBehavior {
    /// Bounces particles away; loses strength but never breaks
    Reflective,
    /// Loses strength on every hit and switches off once it is used up
    #[default]
    Destructible,
}

/// A static square obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub center: Vec2,
    /// Distance from the center to each edge
    pub half_extent: f32,
    pub behavior: BrickBehavior,
    strength: i32,
    active: bool,
    color: Rgb,
}

impl Brick {
    pub fn new(behavior: BrickBehavior, center: Vec2, half_extent: f32, strength: i32) -> Self {
        Self {
            center,
            half_extent,
            behavior,
            strength,
            active: true,
            color: Self::color_for_strength(strength).unwrap_or(colors::WHITE),
        }
    }

    /// Color band for an exact strength value.
    ///
    /// Only the three thresholds map to a color; every other value returns
    /// `None` and the brick keeps whatever band it showed last.
    pub fn color_for_strength(strength: i32) -> Option<Rgb> {
        match strength {
            4000 => Some(colors::GREEN),
            3000 => Some(colors::YELLOW),
            2000 => Some(colors::RED),
            _ => None,
        }
    }

    /// Whether `point` lies in the brick's square.
    ///
    /// The square is open on its low edges and closed on its high edges.
    /// Only the point is tested, so a particle's radius never counts.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.center - Vec2::splat(self.half_extent);
        let max = self.center + Vec2::splat(self.half_extent);
        point.x > min.x && point.x <= max.x && point.y > min.y && point.y <= max.y
    }

    /// Knock one damage step off the brick's strength
    pub fn apply_damage(&mut self) {
        self.strength -= BRICK_DAMAGE;
        if let Some(color) = Self::color_for_strength(self.strength) {
            self.color = color;
        }
    }

    /// Switch the brick off for good
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn strength(&self) -> i32 {
        self.strength
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Submit the brick to the renderer if it is still active
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if self.active {
            renderer.draw_filled_square(self.center, self.half_extent, self.color);
        }
    }
}

impl From<&BrickSpec> for Brick {
    fn from(spec: &BrickSpec) -> Self {
        Brick::new(spec.behavior, spec.center, spec.half_extent, spec.strength)
    }
}

/// A mobile disc
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Distance covered per tick on each moving axis; no floor is applied here
    pub speed: f32,
    pub direction: Direction,
    pub color: Rgb,
}

impl Particle {
    pub fn new(id: u32, pos: Vec2, direction: Direction, color: Rgb) -> Self {
        Self {
            id,
            pos,
            radius: PARTICLE_RADIUS,
            speed: PARTICLE_START_SPEED,
            direction,
            color,
        }
    }

    /// Advance one tick along the current heading.
    ///
    /// The four axis components are checked in the order up, right, down,
    /// left, each against the heading as it stands at that moment. A
    /// component that is blocked by the wall re-rolls the heading and costs
    /// `WALL_SPEED_DECAY` instead of moving. Returns the number of wall hits.
    pub fn move_one_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let mut wall_hits = 0;

        if self.direction.moves_up() {
            if self.pos.y > -ARENA_BOUND + self.radius {
                self.pos.y -= self.speed;
            } else {
                self.bounce_off_wall(rng);
                wall_hits += 1;
            }
        }

        if self.direction.moves_right() {
            if self.pos.x < ARENA_BOUND - self.radius {
                self.pos.x += self.speed;
            } else {
                self.bounce_off_wall(rng);
                wall_hits += 1;
            }
        }

        if self.direction.moves_down() {
            if self.pos.y < ARENA_BOUND - self.radius {
                self.pos.y += self.speed;
            } else {
                self.bounce_off_wall(rng);
                wall_hits += 1;
            }
        }

        if self.direction.moves_left() {
            if self.pos.x > -ARENA_BOUND + self.radius {
                self.pos.x -= self.speed;
            } else {
                self.bounce_off_wall(rng);
                wall_hits += 1;
            }
        }

        wall_hits
    }

    fn bounce_off_wall<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.direction = Direction::random(rng);
        self.speed -= WALL_SPEED_DECAY;
    }

    /// Raise speed and radius to the configured floors, if any
    pub fn apply_floors(&mut self, config: &SimConfig) {
        if let Some(min_speed) = config.min_speed {
            self.speed = self.speed.max(min_speed);
        }
        if let Some(min_radius) = config.min_radius {
            self.radius = self.radius.max(min_radius);
        }
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_filled_polygon(self.pos, self.radius, PARTICLE_SIDES, self.color);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Configuration the world was built from
    pub config: SimConfig,
    /// Seed the RNG started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Live particles in spawn order
    pub particles: Vec<Particle>,
    /// The fixed brick set, in declared order
    pub bricks: [Brick; BRICK_COUNT],
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl World {
    /// Create a world from a configuration.
    ///
    /// Without a configured seed one is drawn from the OS.
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let bricks = config.bricks.each_ref().map(Brick::from);
        log::info!(
            "World created: seed={}, bricks={}, max_particles={:?}",
            seed,
            bricks.len(),
            config.max_particles
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            particles: Vec::new(),
            bricks,
            time_ticks: 0,
            next_id: 1,
            config,
        }
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the configured particle ceiling has been reached
    pub fn at_capacity(&self) -> bool {
        self.config
            .max_particles
            .is_some_and(|max| self.particles.len() >= max)
    }

    /// Spawn a particle the way the spawn input does.
    ///
    /// Each coordinate is 0 or 1, so particles only appear on the corners
    /// of a 2-unit grid. Returns `None` when the world is at capacity.
    pub fn spawn_particle(&mut self) -> Option<u32> {
        if self.at_capacity() {
            log::warn!(
                "Spawn rejected: particle ceiling of {} reached",
                self.particles.len()
            );
            return None;
        }

        let direction = Direction::random(&mut self.rng);
        let x = self.rng.random_range(0..2u32) as f32;
        let y = self.rng.random_range(0..2u32) as f32;
        let color = self.config.recolor.sample(&mut self.rng);

        let id = self.next_entity_id();
        self.particles
            .push(Particle::new(id, Vec2::new(x, y), direction, color));
        log::info!(
            "Spawned particle {} at ({}, {}) heading {:?} ({} live)",
            id,
            x,
            y,
            direction,
            self.particles.len()
        );
        Some(id)
    }

    /// Place a particle at a chosen spot with default radius and speed.
    ///
    /// Bypasses the spawn ceiling.
    pub fn insert_particle(&mut self, pos: Vec2, direction: Direction) -> u32 {
        let id = self.next_entity_id();
        self.particles
            .push(Particle::new(id, pos, direction, colors::WHITE));
        id
    }

    pub fn particle(&self, id: u32) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    /// Submit active bricks first, then every particle on top of them
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for brick in &self.bricks {
            brick.draw(renderer);
        }
        for particle in &self.particles {
            particle.draw(renderer);
        }
    }
}
