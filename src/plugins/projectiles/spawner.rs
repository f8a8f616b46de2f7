//! Spawn request builders.
//!
//! Pure functions: they only compute where a projectile starts and how fast it moves.
//! Writing the request and activating an entity is left to the caller and the allocator.

use bevy::prelude::*;

use crate::plugins::actors::{Faction, ProjectileSpec, VolleyPattern};

use super::messages::SpawnProjectileRequest;

/// One projectile from `origin` moving along `direction` at `speed`.
///
/// A zero direction yields a projectile at rest.
pub fn spawn(
    origin: Vec2,
    direction: Vec2,
    speed: f32,
    damage: u32,
    faction: Faction,
) -> SpawnProjectileRequest {
    SpawnProjectileRequest {
        faction,
        pos: origin,
        vel: direction.normalize_or_zero() * speed,
        damage,
    }
}

/// Player-style shot: leaves the muzzle `muzzle_offset` ahead of `origin` along `facing`.
pub fn aimed(
    origin: Vec2,
    facing: Vec2,
    projectile: ProjectileSpec,
    muzzle_offset: f32,
    faction: Faction,
) -> SpawnProjectileRequest {
    let dir = facing.normalize_or_zero();
    spawn(origin + dir * muzzle_offset, dir, projectile.speed, projectile.damage, faction)
}

/// Enemy-style volley: one shot up, one shot down, regardless of where the shooter faces.
pub fn volley(origin: Vec2, pattern: VolleyPattern, faction: Faction) -> [SpawnProjectileRequest; 2] {
    [Vec2::Y, Vec2::NEG_Y].map(|dir| {
        spawn(
            origin + dir * pattern.offset,
            dir,
            pattern.projectile.speed,
            pattern.projectile.damage,
            faction,
        )
    })
}
