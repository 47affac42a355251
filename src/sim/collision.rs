//! Collision response for particles
//!
//! Neither response is physical. A brick hit re-rolls the particle's heading
//! instead of reflecting it, and two overlapping particles flip their
//! coordinates through the origin and shrink.

use glam::Vec2;
use rand::Rng;

use super::state::{Brick, BrickBehavior, Direction, Particle};
use crate::consts::REFLECT_NUDGE;
use crate::settings::RecolorMode;

/// Outcome of testing a particle against one brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickContact {
    /// Particle center is outside the brick, or the brick is already off
    Miss,
    /// Reflective brick hit: heading re-rolled, brick damaged, particle nudged
    Reflected,
    /// Destructible brick hit while it still had strength
    Damaged,
    /// Destructible brick hit with no strength left; it is now off
    Deactivated,
}

impl Particle {
    /// Resolve contact with a single brick.
    ///
    /// Strength is checked before damage, so a destructible brick that
    /// reaches zero on one hit only switches off on the next.
    pub fn check_brick_collision<R: Rng + ?Sized>(
        &mut self,
        brick: &mut Brick,
        rng: &mut R,
    ) -> BrickContact {
        if !brick.is_active() || !brick.contains(self.pos) {
            return BrickContact::Miss;
        }

        match brick.behavior {
            BrickBehavior::Reflective => {
                self.direction = Direction::random(rng);
                brick.apply_damage();
                self.pos += Vec2::new(REFLECT_NUDGE.0, REFLECT_NUDGE.1);
                BrickContact::Reflected
            }
            BrickBehavior::Destructible => {
                if brick.strength() > 0 {
                    brick.apply_damage();
                    self.direction = Direction::random(rng);
                    BrickContact::Damaged
                } else {
                    brick.deactivate();
                    BrickContact::Deactivated
                }
            }
        }
    }

    /// Resolve overlap with another particle.
    ///
    /// On overlap each position is negated and then pushed along the negated
    /// vector by `radius - distance / 2`, both radii are halved, and `other`
    /// gets a fresh color. Returns whether the discs overlapped.
    pub fn check_particle_collision<R: Rng + ?Sized>(
        &mut self,
        other: &mut Particle,
        rng: &mut R,
        recolor: RecolorMode,
    ) -> bool {
        let distance = self.pos.distance(other.pos);
        if distance >= self.radius + other.radius {
            return false;
        }

        self.pos = scatter(self.pos, self.radius, distance);
        other.pos = scatter(other.pos, other.radius, distance);

        self.radius /= 2.0;
        other.radius /= 2.0;

        other.color = recolor.sample(rng);
        true
    }
}

#[inline]
fn scatter(pos: Vec2, radius: f32, distance: f32) -> Vec2 {
    let flipped = -pos;
    flipped + flipped * (radius - distance / 2.0)
}
