//! Tunable gameplay constants.
//!
//! World units are pixels; `pixels_per_meter` only feeds the physics length unit.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Fixed simulation rate (movement, firing, physics).
    pub fixed_hz: f64,
    /// Half size of the playable area, centred on the origin.
    pub playfield_half_extents: Vec2,
    pub player: PlayerTunables,
    pub grunt: ArchetypeTunables,
    pub boss: ArchetypeTunables,
    /// Seconds of play per score point.
    pub score_interval: f32,
    pub projectile_pool_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub max_health: u32,
    pub speed: f32,
    pub recovery_speed: f32,
    pub recovery_secs: f32,
    pub projectile_speed: f32,
    pub projectile_damage: u32,
    /// Distance from the player centre to the muzzle.
    pub shoot_offset: f32,
    pub radius: f32,
}

/// Per-archetype enemy settings.
///
/// `fire_duration` / `pause_duration` are only read for archetypes with a fire cycle.
#[derive(Debug, Clone)]
pub struct ArchetypeTunables {
    pub max_health: u32,
    pub wander_range: Vec2,
    pub wander_interval: f32,
    pub fire_rate: f32,
    pub fire_duration: f32,
    pub pause_duration: f32,
    pub projectile_speed: f32,
    pub projectile_damage: u32,
    pub volley_offset: f32,
    pub radius: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            fixed_hz: 64.0,
            playfield_half_extents: Vec2::new(640.0, 360.0),
            player: PlayerTunables::default(),
            grunt: ArchetypeTunables::grunt(),
            boss: ArchetypeTunables::boss(),
            score_interval: 1.0,
            projectile_pool_capacity: 256,
        }
    }
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 100.0,
            recovery_speed: 60.0,
            recovery_secs: 0.1,
            projectile_speed: 200.0,
            projectile_damage: 1,
            shoot_offset: 18.0,
            radius: 13.0,
        }
    }
}

impl ArchetypeTunables {
    pub fn grunt() -> Self {
        Self {
            max_health: 30,
            wander_range: Vec2::new(60.0, 40.0),
            wander_interval: 1.0,
            fire_rate: 2.0,
            fire_duration: 0.0,
            pause_duration: 0.0,
            projectile_speed: 200.0,
            projectile_damage: 10,
            volley_offset: 10.0,
            radius: 16.0,
        }
    }

    pub fn boss() -> Self {
        Self {
            fire_rate: 0.5,
            fire_duration: 5.0,
            pause_duration: 6.0,
            radius: 32.0,
            ..Self::grunt()
        }
    }
}
