//! Contact dispatch for projectiles.
//!
//! Avian reports `CollisionStart` for pairs of colliders. The other side's collision-layer
//! membership is its tag; `resolve_contact` decides what the projectile does with it:
//!
//! | other side                     | outcome                                   |
//! |--------------------------------|-------------------------------------------|
//! | border (`World`) / obstacle    | projectile returns to the pool            |
//! | actor of the opposing faction  | damage the actor, projectile returns      |
//! | projectile of opposing faction | both return                               |
//! | anything of its own faction    | ignored                                   |
//!
//! Damage and the defeat check happen in the same call (`Health::apply_damage`), so an
//! actor cannot be reported defeated twice even when several projectiles land in one step.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::actors::{ActorDefeated, ActorHit, DamageOutcome, Faction, Health};

use super::components::{PooledProjectile, Projectile, ProjectileState};
use super::messages::ProjectileImpact;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactTag {
    Border,
    Obstacle,
    Actor(Faction),
    Projectile(Faction),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    Ignore,
    Consume,
    Damage,
    ConsumeBoth,
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

pub fn classify(layers: &CollisionLayers) -> ContactTag {
    if is_in_layer(layers, Layer::World) {
        ContactTag::Border
    } else if is_in_layer(layers, Layer::Obstacle) {
        ContactTag::Obstacle
    } else if is_in_layer(layers, Layer::Player) {
        ContactTag::Actor(Faction::Player)
    } else if is_in_layer(layers, Layer::Enemy) {
        ContactTag::Actor(Faction::Enemy)
    } else if is_in_layer(layers, Layer::PlayerProjectile) {
        ContactTag::Projectile(Faction::Player)
    } else if is_in_layer(layers, Layer::EnemyProjectile) {
        ContactTag::Projectile(Faction::Enemy)
    } else {
        ContactTag::Other
    }
}

pub fn resolve_contact(projectile: Faction, other: ContactTag) -> ContactOutcome {
    match other {
        ContactTag::Border | ContactTag::Obstacle => ContactOutcome::Consume,
        ContactTag::Actor(f) if f != projectile => ContactOutcome::Damage,
        ContactTag::Projectile(f) if f != projectile => ContactOutcome::ConsumeBoth,
        _ => ContactOutcome::Ignore,
    }
}

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn process_projectile_contacts(
    mut started: MessageReader<CollisionStart>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState, &Transform), With<PooledProjectile>>,
    q_layers: Query<&CollisionLayers>,
    mut q_actors: Query<(&mut Health, &Faction)>,
    mut hits: MessageWriter<ActorHit>,
    mut defeats: MessageWriter<ActorDefeated>,
    mut impacts: MessageWriter<ProjectileImpact>,
    // Per-step dedupe: a projectile resolves at most one contact.
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        let (shot, other) = match (p1, p2) {
            (true, false) => (t1, t2),
            (false, true) => (t2, t1),
            (true, true) => {
                resolve_projectile_pair(t1.collider, t2.collider, &mut q_projectiles, &mut *seen, &mut impacts);
                continue;
            }
            (false, false) => continue,
        };

        if seen.contains(&shot.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other.collider) else {
            continue;
        };

        let Ok((projectile, mut state, tf)) = q_projectiles.get_mut(shot.collider) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }
        let projectile = *projectile;
        let pos = tf.translation.truncate();

        match resolve_contact(projectile.faction, classify(other_layers)) {
            ContactOutcome::Ignore | ContactOutcome::ConsumeBoth => continue,
            ContactOutcome::Consume => {}
            ContactOutcome::Damage => {
                let target = other.gameplay_owner();
                if let Ok((mut health, faction)) = q_actors.get_mut(target) {
                    let outcome = health.apply_damage(projectile.damage);
                    if outcome != DamageOutcome::AlreadyDefeated {
                        hits.write(ActorHit {
                            entity: target,
                            faction: *faction,
                            outcome,
                        });
                    }
                    if outcome == DamageOutcome::Defeated {
                        defeats.write(ActorDefeated {
                            entity: target,
                            faction: *faction,
                        });
                    }
                }
            }
        }

        seen.insert(shot.collider);
        *state = ProjectileState::PendingReturn;
        impacts.write(ProjectileImpact {
            faction: projectile.faction,
            pos,
        });
    }
}

/// Two projectiles met: opposing shots cancel each other out.
fn resolve_projectile_pair(
    a: Entity,
    b: Entity,
    q_projectiles: &mut Query<(&Projectile, &mut ProjectileState, &Transform), With<PooledProjectile>>,
    seen: &mut HashSet<Entity>,
    impacts: &mut MessageWriter<ProjectileImpact>,
) {
    if seen.contains(&a) || seen.contains(&b) {
        return;
    }
    let (Ok((pa, sa, _)), Ok((pb, sb, _))) = (q_projectiles.get(a), q_projectiles.get(b)) else {
        return;
    };
    if *sa != ProjectileState::Active || *sb != ProjectileState::Active {
        return;
    }
    let tag_b = ContactTag::Projectile(pb.faction);
    if resolve_contact(pa.faction, tag_b) != ContactOutcome::ConsumeBoth {
        return;
    }

    for e in [a, b] {
        if let Ok((projectile, mut state, tf)) = q_projectiles.get_mut(e) {
            *state = ProjectileState::PendingReturn;
            impacts.write(ProjectileImpact {
                faction: projectile.faction,
                pos: tf.translation.truncate(),
            });
        }
        seen.insert(e);
    }
}
