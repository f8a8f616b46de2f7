//! Enemies plugin: grunt and boss archetypes, per-level spawning, and a short death state.
//!
//! Both archetypes are the same actor with different capabilities (see `actors`):
//! a grunt fires a volley every `fire_rate` seconds for as long as it lives, a boss
//! wraps the same volley in a fire/pause cycle.
//!
//! Lifecycle:
//! ```text
//! Alive --health hits 0--> Dying (collisions off, shrink + fade) --> Dead + PendingDespawn
//! ```
//! We avoid despawning physics entities inside the fixed physics step. Instead, we mark
//! `PendingDespawn` and despawn later in PostUpdate.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    layers::Layer,
    state::GameState,
    tunables::{ArchetypeTunables, Tunables},
};
use crate::plugins::actors::{
    Faction, FireCycle, FireProfile, Health, MotionProfile, ProjectileSpec, ShotClock,
    VolleyPattern, Wander,
};
use crate::plugins::progression::LevelRegistry;
use crate::plugins::projectiles::collision;

const DEATH_SECS: f32 = 0.35;

#[derive(Component)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Grunt,
    Boss,
}

/// Enemy lifecycle state machine.
///
/// - Alive: normal gameplay.
/// - Dying: short transition animation.
/// - Dead: terminal marker to stop further state transitions.
#[derive(Component, Debug, Clone)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

/// Marker: enemy should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_level_enemies);

    // Death trigger runs after collision resolution so it sees updated Health.
    app.add_systems(
        FixedPostUpdate,
        (
            enemy_death_trigger.after(collision::process_projectile_contacts),
            enemy_death_progress,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}

#[inline]
fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Obstacle, Layer::Player, Layer::PlayerProjectile],
    )
}

/// Collision layers for an enemy that should no longer interact with anything.
#[inline]
fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

impl EnemyKind {
    fn tunables(self, tunables: &Tunables) -> &ArchetypeTunables {
        match self {
            EnemyKind::Grunt => &tunables.grunt,
            EnemyKind::Boss => &tunables.boss,
        }
    }

    fn color(self) -> Color {
        match self {
            EnemyKind::Grunt => Color::srgb(0.9, 0.25, 0.25),
            EnemyKind::Boss => Color::srgb(0.62, 0.2, 0.85),
        }
    }

    pub fn fire_profile(self, t: &ArchetypeTunables) -> FireProfile {
        let pattern = VolleyPattern {
            projectile: ProjectileSpec {
                speed: t.projectile_speed,
                damage: t.projectile_damage,
            },
            offset: t.volley_offset,
        };
        let clock = ShotClock::new(t.fire_rate);

        match self {
            EnemyKind::Grunt => FireProfile::Volley { pattern, clock },
            EnemyKind::Boss => FireProfile::CycledVolley {
                pattern,
                clock,
                cycle: FireCycle::new(t.fire_duration, t.pause_duration),
            },
        }
    }
}

/// Where the `i`-th of `count` grunts starts: up to 6 per row, rows stacked downwards
/// from the upper part of the playfield.
fn grunt_slot(i: u32, count: u32, half: Vec2) -> Vec2 {
    const PER_ROW: u32 = 6;
    let row = i / PER_ROW;
    let in_row = (count - row * PER_ROW).min(PER_ROW);
    let col = i % PER_ROW;
    let spacing = half.x * 2.0 / (in_row + 1) as f32;
    Vec2::new(
        -half.x + spacing * (col + 1) as f32,
        half.y * 0.45 - row as f32 * 72.0,
    )
}

fn spawn_enemy(commands: &mut Commands, kind: EnemyKind, tunables: &Tunables, pos: Vec2, index: u32) {
    let t = kind.tunables(tunables);

    commands.spawn((
        Name::new(format!("{kind:?}{index}")),
        Enemy,
        kind,
        Faction::Enemy,
        Health::new(t.max_health),
        EnemyLifeState::Alive,
        MotionProfile::Wander(Wander::new(t.wander_range, t.wander_interval)),
        kind.fire_profile(t),
        Sprite {
            color: kind.color(),
            custom_size: Some(Vec2::splat(t.radius * 2.0)),
            ..default()
        },
        Transform::from_translation(pos.extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(t.radius),
        enemy_layers(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_level_enemies(mut commands: Commands, tunables: Res<Tunables>, levels: Res<LevelRegistry>) {
    let level = levels.current();
    let half = tunables.playfield_half_extents;

    for i in 0..level.grunts {
        let pos = grunt_slot(i, level.grunts, half);
        spawn_enemy(&mut commands, EnemyKind::Grunt, &tunables, pos, i);
    }
    for i in 0..level.bosses {
        let x = (i as f32 - (level.bosses as f32 - 1.0) * 0.5) * 160.0;
        let pos = Vec2::new(x, half.y * 0.7);
        spawn_enemy(&mut commands, EnemyKind::Boss, &tunables, pos, i);
    }

    debug!("{}: {} grunt(s), {} boss(es)", level.name, level.grunts, level.bosses);
}

/// Transition Alive -> Dying when health reaches 0.
///
/// Note: this system does not despawn.
/// It only transitions state and enforces "dying invariants" (stop collision interaction).
fn enemy_death_trigger(
    mut q: Query<
        (&Health, &mut EnemyLifeState, &mut CollisionLayers, &mut Sprite),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (health, mut life, mut layers, mut sprite) in &mut q {
        if !matches!(*life, EnemyLifeState::Alive) || !health.is_depleted() {
            continue;
        }

        *life = EnemyLifeState::Dying {
            timer: Timer::from_seconds(DEATH_SECS, TimerMode::Once),
        };
        *layers = non_interacting_enemy_layers();
        sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
    }
}

/// Animate Dying state and mark PendingDespawn once finished.
fn enemy_death_progress(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &mut EnemyLifeState, &mut Sprite, &mut Transform),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (e, mut life, mut sprite, mut tf) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());
        let t = timer.fraction();

        tf.scale = Vec3::splat(1.0 - t);
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

/// Despawn enemies marked for removal.
fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
