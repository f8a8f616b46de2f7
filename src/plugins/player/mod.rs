//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput`, turn the trigger into a spawn request
//! - FixedUpdate: steer the body (normal or recovery speed)
//! - FixedPostUpdate: react to hits (recovery window or destruction), end recovery windows
//!
//! The recovery window is a `Recovery` component holding a timer. Despawning the player
//! drops the component with it, so an unfinished window is cancelled rather than left
//! pointing at a dead entity.
//!
//! The body is dynamic so the solver stops it at obstacles and walls; steering writes the
//! velocity every tick and rotation is locked.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::actors::{
    ActorHit, ActorSystems, DamageOutcome, Faction, FireProfile, Health, MotionProfile,
    ProjectileSpec, Steering,
};
use crate::plugins::projectiles::{allocator, collision, messages::SpawnProjectileRequest, spawner};

#[derive(Component)]
pub struct Player;

/// Present while the player recovers from a hit.
#[derive(Component, Debug)]
pub struct Recovery {
    timer: Timer,
}

impl Recovery {
    pub fn new(secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(secs, TimerMode::Once),
        }
    }
}

#[derive(Resource, Default, Debug)]
pub(crate) struct PlayerInput {
    move_axis: Vec2,
    fire: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, shoot.before(allocator::allocate_projectiles))
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement.in_set(ActorSystems::Move))
        .add_systems(
            FixedPostUpdate,
            (
                react_to_hits.after(collision::process_projectile_contacts),
                end_recovery,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Obstacle, Layer::Enemy, Layer::EnemyProjectile],
    )
}

/// While recovering only the border still stops the player; obstacles are passed through.
#[inline]
pub fn recovering_player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World])
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.player;

    commands.spawn((
        Name::new("Player"),
        Player,
        Faction::Player,
        Health::new(t.max_health),
        MotionProfile::Steered(Steering::new(t.speed, t.recovery_speed)),
        FireProfile::Aimed {
            projectile: ProjectileSpec {
                speed: t.projectile_speed,
                damage: t.projectile_damage,
            },
            muzzle_offset: t.shoot_offset,
        },
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(t.radius * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 1.0),
        (
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            SleepingDisabled,
            Collider::circle(t.radius),
            Restitution::new(0.0),
            Friction::ZERO,
            player_layers(),
            LinearVelocity::ZERO,
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis;
    input.fire = keys.just_pressed(KeyCode::Space);
}

/// Producer: one aimed shot per trigger press.
fn shoot(
    mut input: ResMut<PlayerInput>,
    q_player: Query<(&Transform, &MotionProfile, &FireProfile), With<Player>>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    if !std::mem::take(&mut input.fire) {
        return;
    }

    let (tf, motion, fire) = match q_player.single() {
        Ok(v) => v,
        Err(e) => {
            debug!("No single Player to shoot from: {e:?}");
            return;
        }
    };

    let FireProfile::Aimed {
        projectile,
        muzzle_offset,
    } = *fire
    else {
        return;
    };
    let facing = match motion {
        MotionProfile::Steered(steering) => steering.facing(),
        MotionProfile::Wander(_) => Vec2::X,
    };

    writer.write(spawner::aimed(
        tf.translation.truncate(),
        facing,
        projectile,
        muzzle_offset,
        Faction::Player,
    ));
}

fn apply_movement(
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut MotionProfile, &mut LinearVelocity, Has<Recovery>), With<Player>>,
) {
    let Ok((mut motion, mut vel, recovering)) = q_player.single_mut() else {
        return;
    };
    let MotionProfile::Steered(steering) = &mut *motion else {
        return;
    };
    steering.steer(input.move_axis);
    vel.0 = steering.velocity(recovering);
}

/// A hurt player enters recovery; a player at zero health is destroyed instead.
fn react_to_hits(
    mut commands: Commands,
    mut hits: MessageReader<ActorHit>,
    tunables: Res<Tunables>,
    mut q_player: Query<(&mut LinearVelocity, &mut CollisionLayers), With<Player>>,
) {
    for hit in hits.read() {
        if hit.faction != Faction::Player {
            continue;
        }
        let Ok((mut vel, mut layers)) = q_player.get_mut(hit.entity) else {
            continue;
        };

        match hit.outcome {
            DamageOutcome::Hurt { remaining } => {
                debug!("Player hit, {remaining} health left");
                vel.0 = Vec2::ZERO;
                *layers = recovering_player_layers();
                commands
                    .entity(hit.entity)
                    .insert(Recovery::new(tunables.player.recovery_secs));
            }
            DamageOutcome::Defeated => {
                info!("Player destroyed");
                commands.entity(hit.entity).despawn();
            }
            DamageOutcome::AlreadyDefeated => {}
        }
    }
}

fn end_recovery(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Recovery, &mut CollisionLayers), With<Player>>,
) {
    for (e, mut recovery, mut layers) in &mut q {
        recovery.timer.tick(time.delta());
        if recovery.timer.is_finished() {
            *layers = player_layers();
            commands.entity(e).remove::<Recovery>();
        }
    }
}

#[cfg(test)]
mod tests;
