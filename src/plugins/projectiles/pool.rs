use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::actors::Faction;

use super::components::{PooledProjectile, Projectile, ProjectileHandle, ProjectileState};

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    free: Vec<ProjectileHandle>,
    pub capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<ProjectileHandle> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, handle: ProjectileHandle) {
        self.free.push(handle);
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

/// Layers for a projectile in flight: it meets the border, obstacles, and the other
/// faction's actors and projectiles. Never its own side.
pub fn active_projectile_layers(faction: Faction) -> CollisionLayers {
    let opposing = faction.opposing();
    CollisionLayers::new(
        faction.projectile_layer(),
        [
            Layer::World,
            Layer::Obstacle,
            opposing.actor_layer(),
            opposing.projectile_layer(),
        ],
    )
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Default, [] as [Layer; 0])
}

/// Pre-spawn pooled projectiles (inactive).
///
/// Physics components stay present for the whole lifetime; inactive projectiles never
/// collide because their filters are empty.
pub fn init_projectile_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Projectile(Pooled)"),
                PooledProjectile,
                ProjectileState::Inactive,
                Projectile {
                    damage: 0,
                    faction: Faction::Enemy,
                },
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::circle(4.0),
                inactive_projectile_layers(),
                Restitution::new(0.0),
                Friction::ZERO,
                LinearVelocity(Vec2::ZERO),
                // Avian only emits CollisionStart if one of the colliders opts in.
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(ProjectileHandle(e));
    }
}

#[inline]
pub fn projectile_color(faction: Faction) -> Color {
    match faction {
        Faction::Player => Color::srgb(1.0, 0.85, 0.3),
        Faction::Enemy => Color::srgb(1.0, 0.35, 0.55),
    }
}
