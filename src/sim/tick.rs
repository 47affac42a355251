//! Per-frame simulation tick
//!
//! One tick is one rendered frame. Particles are updated one at a time in
//! spawn order, and each particle finishes its whole update (bricks, later
//! particles, movement) before the next one starts.

use glam::Vec2;

use super::collision::BrickContact;
use super::state::World;
use crate::renderer::Renderer;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn a new particle (space bar)
    pub spawn: bool,
    /// Stop the simulation (escape / window close)
    pub quit: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Spawned { particle: u32, pos: Vec2 },
    SpawnRejected { live: usize },
    BrickHit {
        brick: usize,
        particle: u32,
        contact: BrickContact,
        strength: i32,
    },
    ParticlesCollided { a: u32, b: u32 },
    WallBounce { particle: u32, speed: f32 },
}

/// Everything a tick did, in order
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub events: Vec<SimEvent>,
    /// The quit input was seen; nothing was simulated
    pub stopped: bool,
}

impl TickReport {
    pub fn bricks_deactivated(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    SimEvent::BrickHit {
                        contact: BrickContact::Deactivated,
                        ..
                    }
                )
            })
            .count()
    }

    pub fn particle_collisions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::ParticlesCollided { .. }))
            .count()
    }

    pub fn wall_bounces(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::WallBounce { .. }))
            .count()
    }
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    if input.quit {
        log::info!("Quit requested after {} ticks", world.time_ticks);
        report.stopped = true;
        return report;
    }

    if input.spawn {
        match world.spawn_particle() {
            Some(id) => {
                let pos = world.particles.last().map(|p| p.pos).unwrap_or(Vec2::ZERO);
                report.events.push(SimEvent::Spawned { particle: id, pos });
            }
            None => report.events.push(SimEvent::SpawnRejected {
                live: world.particles.len(),
            }),
        }
    }

    let recolor = world.config.recolor;

    for i in 0..world.particles.len() {
        let (head, later) = world.particles.split_at_mut(i + 1);
        let particle = &mut head[i];

        // --- BRICKS ---
        for (index, brick) in world.bricks.iter_mut().enumerate() {
            let contact = particle.check_brick_collision(brick, &mut world.rng);
            match contact {
                BrickContact::Miss => continue,
                BrickContact::Deactivated => {
                    log::info!("Brick {} destroyed by particle {}", index, particle.id)
                }
                _ => log::debug!(
                    "Particle {} hit brick {} ({:?}), strength now {}",
                    particle.id,
                    index,
                    contact,
                    brick.strength()
                ),
            }
            report.events.push(SimEvent::BrickHit {
                brick: index,
                particle: particle.id,
                contact,
                strength: brick.strength(),
            });
        }

        // --- LATER PARTICLES ---
        // Each unordered pair is checked once per tick
        for other in later.iter_mut() {
            if particle.check_particle_collision(other, &mut world.rng, recolor) {
                particle.apply_floors(&world.config);
                other.apply_floors(&world.config);
                log::debug!(
                    "Particles {} and {} collided, radii now {} / {}",
                    particle.id,
                    other.id,
                    particle.radius,
                    other.radius
                );
                report.events.push(SimEvent::ParticlesCollided {
                    a: particle.id,
                    b: other.id,
                });
            }
        }

        // --- MOVEMENT ---
        let wall_hits = particle.move_one_step(&mut world.rng);
        particle.apply_floors(&world.config);
        for _ in 0..wall_hits {
            report.events.push(SimEvent::WallBounce {
                particle: particle.id,
                speed: particle.speed,
            });
        }
    }

    world.time_ticks += 1;
    report
}

/// Run one frame: tick, then draw unless the tick stopped the simulation
pub fn frame<R: Renderer + ?Sized>(
    world: &mut World,
    input: &TickInput,
    renderer: &mut R,
) -> TickReport {
    let report = tick(world, input);
    if !report.stopped {
        world.draw(renderer);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::settings::{BrickSpec, SimConfig};
    use crate::sim::{BrickBehavior, Direction};

    /// A world whose bricks all sit far outside the arena, for isolating
    /// particle behavior
    fn empty_world(seed: u64) -> World {
        let mut config = SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        };
        for spec in config.bricks.iter_mut() {
            spec.center = Vec2::new(5.0, 5.0);
        }
        World::new(config)
    }

    #[test]
    fn test_tick_spawns_on_input() {
        let mut world = World::with_seed(12345);
        assert!(world.particles.is_empty());

        tick(&mut world, &TickInput::default());
        assert!(world.particles.is_empty());
        assert_eq!(world.time_ticks, 1);

        let report = tick(
            &mut world,
            &TickInput {
                spawn: true,
                ..Default::default()
            },
        );
        assert_eq!(world.particles.len(), 1);
        assert!(matches!(report.events[0], SimEvent::Spawned { particle: 1, .. }));
    }

    #[test]
    fn test_quit_stops_without_mutation() {
        let mut world = World::with_seed(1);
        world.spawn_particle();
        let before = world.particles.clone();

        let mut list = DrawList::default();
        let report = frame(
            &mut world,
            &TickInput {
                spawn: true,
                quit: true,
            },
            &mut list,
        );
        assert!(report.stopped);
        assert_eq!(world.particles, before);
        assert_eq!(world.time_ticks, 0);
        assert!(list.commands.is_empty());
    }

    #[test]
    fn test_spawn_rejected_at_ceiling() {
        let mut world = World::new(SimConfig {
            seed: Some(5),
            max_particles: Some(1),
            ..SimConfig::default()
        });
        let spawn = TickInput {
            spawn: true,
            ..Default::default()
        };
        tick(&mut world, &spawn);
        let report = tick(&mut world, &spawn);
        assert_eq!(world.particles.len(), 1);
        assert!(matches!(report.events[0], SimEvent::SpawnRejected { live: 1 }));
    }

    #[test]
    fn test_single_particle_moves_one_step_per_tick() {
        let mut world = empty_world(3);
        let id = world.insert_particle(Vec2::ZERO, Direction::Up);
        tick(&mut world, &TickInput::default());
        let p = world.particle(id).unwrap();
        assert_eq!(p.pos, Vec2::new(0.0, -0.01));
    }

    #[test]
    fn test_each_pair_checked_once() {
        // Stacked particles: every unordered pair is resolved at most once
        let mut world = empty_world(4);
        for _ in 0..3 {
            world.insert_particle(Vec2::new(0.5, 0.5), Direction::Up);
        }
        let report = tick(&mut world, &TickInput::default());
        let mut pairs: Vec<(u32, u32)> = report
            .events
            .iter()
            .filter_map(|e| match e {
                SimEvent::ParticlesCollided { a, b } => Some((*a, *b)),
                _ => None,
            })
            .collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), report.particle_collisions());
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn test_overlapping_pair_halves_in_tick() {
        let mut world = empty_world(10);
        let a = world.insert_particle(Vec2::new(0.3, 0.3), Direction::Up);
        let b = world.insert_particle(Vec2::new(0.32, 0.3), Direction::Down);

        let report = tick(&mut world, &TickInput::default());
        assert_eq!(report.particle_collisions(), 1);
        assert_eq!(world.particle(a).unwrap().radius, PARTICLE_RADIUS / 2.0);
        assert_eq!(world.particle(b).unwrap().radius, PARTICLE_RADIUS / 2.0);
    }

    #[test]
    fn test_radius_floor_applies_in_tick() {
        let mut config = SimConfig {
            seed: Some(10),
            min_radius: Some(0.04),
            ..SimConfig::default()
        };
        for spec in config.bricks.iter_mut() {
            spec.center = Vec2::new(5.0, 5.0);
        }
        let mut world = World::new(config);
        world.insert_particle(Vec2::new(0.3, 0.3), Direction::Up);
        world.insert_particle(Vec2::new(0.32, 0.3), Direction::Down);

        tick(&mut world, &TickInput::default());
        assert!(world.particles.iter().all(|p| p.radius == 0.04));
    }

    #[test]
    fn test_brick_destroyed_through_ticks() {
        // One destructible brick sitting on a parked particle
        let mut config = SimConfig {
            seed: Some(77),
            min_speed: Some(0.0),
            ..SimConfig::default()
        };
        for spec in config.bricks.iter_mut() {
            spec.center = Vec2::new(5.0, 5.0);
        }
        config.bricks[0] = BrickSpec::destructible(0.0, 0.0);
        let mut world = World::new(config);
        let id = world.insert_particle(Vec2::ZERO, Direction::Up);

        let mut destroyed_at = None;
        for n in 1..=21 {
            // Park the particle back inside the brick every tick
            if let Some(p) = world.particles.iter_mut().find(|p| p.id == id) {
                p.pos = Vec2::ZERO;
            }
            let report = tick(&mut world, &TickInput::default());
            if report.bricks_deactivated() > 0 {
                destroyed_at = Some(n);
                break;
            }
        }
        assert_eq!(destroyed_at, Some(21));
        assert!(!world.bricks[0].is_active());
        assert_eq!(world.bricks[0].strength(), 0);
    }

    #[test]
    fn test_reflective_brick_survives_ticks() {
        let mut config = SimConfig {
            seed: Some(8),
            ..SimConfig::default()
        };
        for spec in config.bricks.iter_mut() {
            spec.center = Vec2::new(5.0, 5.0);
        }
        config.bricks[2].behavior = BrickBehavior::Reflective;
        config.bricks[2].center = Vec2::ZERO;
        let mut world = World::new(config);
        let id = world.insert_particle(Vec2::ZERO, Direction::Up);

        for _ in 0..40 {
            if let Some(p) = world.particles.iter_mut().find(|p| p.id == id) {
                p.pos = Vec2::ZERO;
            }
            tick(&mut world, &TickInput::default());
        }
        assert!(world.bricks[2].is_active());
        assert_eq!(world.bricks[2].strength(), BRICK_START_STRENGTH - 40 * BRICK_DAMAGE);
    }

    #[test]
    fn test_frame_draws_bricks_then_particles() {
        let mut world = World::with_seed(3);
        let mut list = DrawList::default();
        frame(
            &mut world,
            &TickInput {
                spawn: true,
                ..Default::default()
            },
            &mut list,
        );
        assert_eq!(list.commands.len(), BRICK_COUNT + 1);
        assert!(list.commands[..BRICK_COUNT]
            .iter()
            .all(|c| matches!(c, DrawCommand::Square { .. })));
        assert!(matches!(list.commands[BRICK_COUNT], DrawCommand::Polygon { .. }));
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut world1 = World::with_seed(99999);
        let mut world2 = World::with_seed(99999);

        for n in 0..600u32 {
            let input = TickInput {
                spawn: n.is_multiple_of(20),
                ..Default::default()
            };
            tick(&mut world1, &input);
            tick(&mut world2, &input);
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.particles, world2.particles);
        assert_eq!(world1.bricks, world2.bricks);
    }

    #[test]
    fn test_long_run_keeps_brick_invariants() {
        let mut world = World::with_seed(31337);
        let mut last_strength: Vec<i32> = world.bricks.iter().map(|b| b.strength()).collect();
        let mut was_inactive = [false; BRICK_COUNT];

        for n in 0..1500u32 {
            let input = TickInput {
                spawn: n.is_multiple_of(15),
                ..Default::default()
            };
            tick(&mut world, &input);

            for (i, brick) in world.bricks.iter().enumerate() {
                assert!(brick.strength() <= last_strength[i]);
                if was_inactive[i] {
                    assert!(!brick.is_active());
                    assert_eq!(brick.strength(), last_strength[i]);
                }
                was_inactive[i] = !brick.is_active();
                last_strength[i] = brick.strength();
            }
        }
    }
}
