//! Buffered projectile messages.
//!
//! Producers (player trigger, enemy fire profiles) create *intent*; the allocator is the
//! single consumer that turns intent into an active pooled projectile.

use bevy::prelude::*;

use crate::plugins::actors::Faction;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub faction: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: u32,
}

/// A projectile was consumed by a contact. Presentation hooks (sparks) read this.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileImpact {
    pub faction: Faction,
    pub pos: Vec2,
}
