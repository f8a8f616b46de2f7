//! Spawn consumer: activate projectiles from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled projectile entities.
//! - Therefore, a pooled entity must match the projectile query.
//!
//! If this is violated, we `expect()` and crash loudly.
//! An empty or missing pool is a configuration/capacity matter: the shot is logged and dropped.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileHandle, ProjectileState};
use super::messages::SpawnProjectileRequest;
use super::pool::{active_projectile_layers, projectile_color, ProjectilePool};

pub fn allocate_projectiles(
    pool: Option<ResMut<ProjectilePool>>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    mut q: Query<
        (
            &mut ProjectileState,
            &mut Projectile,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
            &mut Sprite,
        ),
        With<PooledProjectile>,
    >,
) {
    let Some(mut pool) = pool else {
        let dropped = reader.read().count();
        if dropped > 0 {
            warn!("No ProjectilePool resource; dropping {dropped} spawn request(s)");
        }
        return;
    };

    for req in reader.read() {
        let Some(ProjectileHandle(e)) = pool.pop_free() else {
            warn!("Projectile pool exhausted; dropping {:?} shot", req.faction);
            continue;
        };

        let (mut state, mut projectile, mut tf, mut vel, mut vis, mut layers, mut sprite) = q
            .get_mut(e)
            .expect("ProjectilePool contained an entity missing pooled projectile components");

        *state = ProjectileState::Active;
        projectile.reset_for_fire(req.damage, req.faction);
        tf.translation = req.pos.extend(2.0);
        vel.0 = req.vel;
        *vis = Visibility::Visible;
        *layers = active_projectile_layers(req.faction);
        sprite.color = projectile_color(req.faction);
    }
}
