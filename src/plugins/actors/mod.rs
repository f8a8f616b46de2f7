//! Actors: everything that moves on its own, can be hit and can be defeated.
//!
//! There is one actor model, parameterised by capabilities instead of per-archetype
//! scripts:
//!
//! | component       | player                  | grunt              | boss                    |
//! |-----------------|-------------------------|--------------------|-------------------------|
//! | `Faction`       | `Player`                | `Enemy`            | `Enemy`                 |
//! | `MotionProfile` | `Steered`               | `Wander`           | `Wander`                |
//! | `FireProfile`   | `Aimed` (on trigger)    | `Volley`           | `CycledVolley`          |
//! | `Health`        | 100                     | 30                 | 30                      |
//!
//! This module owns the capability components and the systems that are identical for
//! every actor (wander, autonomous fire). Archetype-specific reactions (player recovery,
//! enemy death animation) live in the player and enemies plugins and are driven by the
//! `ActorHit` / `ActorDefeated` messages written by the projectile contact dispatcher.

pub mod fire;
pub mod health;
pub mod motion;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::core::GameRng;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;
use crate::plugins::projectiles::spawner;

pub use fire::{FireCycle, FirePhase, FireProfile, ProjectileSpec, ShotClock, VolleyPattern};
pub use health::{DamageOutcome, Health};
pub use motion::{MotionProfile, Steering, Wander};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    #[inline]
    pub fn opposing(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }

    #[inline]
    pub fn actor_layer(self) -> Layer {
        match self {
            Faction::Player => Layer::Player,
            Faction::Enemy => Layer::Enemy,
        }
    }

    #[inline]
    pub fn projectile_layer(self) -> Layer {
        match self {
            Faction::Player => Layer::PlayerProjectile,
            Faction::Enemy => Layer::EnemyProjectile,
        }
    }
}

/// An actor took damage.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorHit {
    pub entity: Entity,
    pub faction: Faction,
    pub outcome: DamageOutcome,
}

/// An actor's health reached zero. Written exactly once per actor.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorDefeated {
    pub entity: Entity,
    pub faction: Faction,
}

/// Ordering handle for actor systems in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorSystems {
    Move,
    Fire,
}

pub fn plugin(app: &mut App) {
    app.add_message::<ActorHit>()
        .add_message::<ActorDefeated>()
        .configure_sets(
            FixedUpdate,
            (ActorSystems::Move, ActorSystems::Fire)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, wander_actors.in_set(ActorSystems::Move))
        .add_systems(FixedUpdate, fire_volleys.in_set(ActorSystems::Fire));
}

/// Drift wandering actors. Defeated actors stay where they fell.
pub fn wander_actors(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut q: Query<(&mut Transform, &mut MotionProfile, &Health)>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (mut tf, mut motion, health) in &mut q {
        if health.is_depleted() {
            continue;
        }
        let MotionProfile::Wander(wander) = &mut *motion else {
            continue;
        };
        let delta = wander.step(now, dt, &mut rng.0);
        tf.translation += delta.extend(0.0);
    }
}

/// Tick autonomous fire profiles and request volleys.
pub fn fire_volleys(
    time: Res<Time>,
    mut q: Query<(&Transform, &Faction, &Health, &mut FireProfile)>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (tf, faction, health, mut profile) in &mut q {
        if health.is_depleted() {
            continue;
        }
        let Some(pattern) = profile.tick(now, dt) else {
            continue;
        };
        let origin = tf.translation.truncate();
        for req in spawner::volley(origin, pattern, *faction) {
            writer.write(req);
        }
    }
}

#[cfg(test)]
mod tests;
