//! Return commit: recycle projectiles back into the pool.
//!
//! This module is the "owner" of the *Inactive invariants*.
//!
//! Invariant: Inactive projectiles must be:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//!
//! Centralizing these writes here prevents inconsistencies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{PooledProjectile, ProjectileHandle, ProjectileState};
use super::pool::{inactive_projectile_layers, ProjectilePool};

/// Margin past the playfield edge before a projectile counts as escaped.
const ESCAPE_MARGIN: f32 = 64.0;

type ReturnQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut ProjectileState,
        &'static mut Visibility,
        &'static mut LinearVelocity,
        &'static mut CollisionLayers,
    ),
    With<PooledProjectile>,
>;

pub fn return_to_pool_commit(mut pool: ResMut<ProjectilePool>, mut q: ReturnQuery) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }
        *state = ProjectileState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_projectile_layers();

        pool.push_free(ProjectileHandle(e));
    }
}

/// Leaving a level: everything still in flight goes back to the pool.
pub fn recall_all_projectiles(mut pool: ResMut<ProjectilePool>, mut q: ReturnQuery) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state == ProjectileState::Inactive {
            continue;
        }
        *state = ProjectileState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_projectile_layers();

        pool.push_free(ProjectileHandle(e));
    }
}

/// Projectiles that slipped past the border walls are returned too.
pub fn cull_escaped_projectiles(
    tunables: Res<Tunables>,
    mut q: Query<(&Transform, &mut ProjectileState), With<PooledProjectile>>,
) {
    let limit = tunables.playfield_half_extents + Vec2::splat(ESCAPE_MARGIN);

    for (tf, mut state) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }
        let p = tf.translation.truncate().abs();
        if p.x > limit.x || p.y > limit.y {
            *state = ProjectileState::PendingReturn;
        }
    }
}
