//! Motion profiles: random wander (enemies) and input steering (player).

use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone)]
pub enum MotionProfile {
    Wander(Wander),
    Steered(Steering),
}

/// Random drift, re-rolled every `interval` seconds.
///
/// `direction` is a velocity in world units per second, not a unit vector: each axis is
/// drawn uniformly from `[-range, range]`.
#[derive(Debug, Clone)]
pub struct Wander {
    pub range: Vec2,
    pub interval: f32,
    direction: Vec2,
    next_change_at: f32,
}

impl Wander {
    /// The first `step` always rolls a direction.
    pub fn new(range: Vec2, interval: f32) -> Self {
        Self {
            range,
            interval,
            direction: Vec2::ZERO,
            next_change_at: 0.0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    #[inline]
    pub fn next_change_at(&self) -> f32 {
        self.next_change_at
    }

    /// Advance to `now` and return the translation for this tick.
    pub fn step<R: Rng + ?Sized>(&mut self, now: f32, dt: f32, rng: &mut R) -> Vec2 {
        if now >= self.next_change_at {
            self.direction = roll_direction(self.range, rng);
            self.next_change_at = now + self.interval;
        }
        self.direction * dt
    }
}

fn roll_direction<R: Rng + ?Sized>(range: Vec2, rng: &mut R) -> Vec2 {
    let r = range.abs();
    Vec2::new(rng.gen_range(-r.x..=r.x), rng.gen_range(-r.y..=r.y))
}

/// Input-driven movement with a slower speed while recovering from a hit.
#[derive(Debug, Clone, Copy)]
pub struct Steering {
    pub speed: f32,
    pub recovery_speed: f32,
    direction: Vec2,
    facing: Vec2,
}

impl Steering {
    pub fn new(speed: f32, recovery_speed: f32) -> Self {
        Self {
            speed,
            recovery_speed,
            direction: Vec2::ZERO,
            facing: Vec2::X,
        }
    }

    /// Unit (or zero) movement direction from the last `steer`.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Last non-zero direction; starts facing +X.
    #[inline]
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn steer(&mut self, axis: Vec2) {
        self.direction = axis.normalize_or_zero();
        if self.direction != Vec2::ZERO {
            self.facing = self.direction;
        }
    }

    pub fn velocity(&self, recovering: bool) -> Vec2 {
        let speed = if recovering { self.recovery_speed } else { self.speed };
        self.direction * speed
    }
}
