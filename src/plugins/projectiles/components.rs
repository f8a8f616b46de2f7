use bevy::prelude::*;

use crate::plugins::actors::Faction;

/// Marker for entities owned by the projectile pool.
#[derive(Component)]
pub struct PooledProjectile;

/// Handle to a pooled projectile entity.
///
/// Only the pool and the allocator hand these out; producers never see one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileHandle(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub damage: u32,
    pub faction: Faction,
}

impl Projectile {
    #[inline]
    pub fn reset_for_fire(&mut self, damage: u32, faction: Faction) {
        self.damage = damage;
        self.faction = faction;
    }
}

/// Short-lived impact marker left by player shots.
#[derive(Component)]
pub struct HitSpark;

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);
