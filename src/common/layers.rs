//! Collision layers.
//!
//! Layers double as the contact tag taxonomy: a collider's membership tells the
//! contact dispatcher what it touched. `World` is the playfield border.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Obstacle,
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}
