//! World plugin: border walls, per-level obstacles, floor, and playfield confinement.
//!
//! The four walls carry the `World` layer, which is what the rest of the game calls the
//! border. Projectiles touching it are returned; actors are kept inside it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::actors::Faction;
use crate::plugins::progression::LevelRegistry;

const TILE: f32 = 64.0;
const WALL_THICKNESS: f32 = 30.0;
const OBSTACLE_SIZE: f32 = 48.0;
/// How far actor centres stay from the border.
const ACTOR_MARGIN: f32 = 16.0;

/// Marker for the border walls.
#[derive(Component)]
pub struct Border;

#[derive(Component)]
pub struct Obstacle;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_border, spawn_obstacles, spawn_floor),
    );
    // After writeback, so the clamped transform is what the next step reads back.
    app.add_systems(
        FixedPostUpdate,
        confine_to_playfield
            .after(PhysicsSystems::Writeback)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_border(mut commands: Commands, tunables: Res<Tunables>) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let half = tunables.playfield_half_extents;
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerProjectile,
            Layer::EnemyProjectile,
        ],
    );

    let mut spawn_wall = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(format!("Border{name}")),
            Border,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let horizontal = Vec2::new(half.x * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, half.y * 2.0);
    spawn_wall("Top", Vec2::new(0.0, half.y + t * 0.5), horizontal);
    spawn_wall("Bottom", Vec2::new(0.0, -half.y - t * 0.5), horizontal);
    spawn_wall("Left", Vec2::new(-half.x - t * 0.5, 0.0), vertical);
    spawn_wall("Right", Vec2::new(half.x + t * 0.5, 0.0), vertical);
}

fn spawn_obstacles(mut commands: Commands, levels: Res<LevelRegistry>) {
    let layers = CollisionLayers::new(
        Layer::Obstacle,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerProjectile,
            Layer::EnemyProjectile,
        ],
    );

    for (i, pos) in levels.current().obstacles.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Obstacle{i}")),
            Obstacle,
            Sprite {
                color: Color::srgb(0.32, 0.3, 0.28),
                custom_size: Some(Vec2::splat(OBSTACLE_SIZE)),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(OBSTACLE_SIZE, OBSTACLE_SIZE),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Checkerboard floor built from solid-colour sprites, so the project has no assets.
fn spawn_floor(mut commands: Commands, tunables: Res<Tunables>) {
    let cols = (tunables.playfield_half_extents.x / TILE) as i32;
    let rows = (tunables.playfield_half_extents.y / TILE) as i32;

    (-rows..=rows)
        .flat_map(|y| (-cols..=cols).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE)),
                Transform::from_xyz(x as f32 * TILE, y as f32 * TILE, 0.0),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

/// Actors stop at the border: position is clamped and outward velocity dropped.
///
/// Kinematic enemies are not pushed back by static walls, so this is what keeps wanderers
/// on screen. The player is also stopped by the walls but is clamped to the same margin.
pub fn confine_to_playfield(
    tunables: Res<Tunables>,
    mut q: Query<(&mut Transform, Option<&mut LinearVelocity>), With<Faction>>,
) {
    let limit = (tunables.playfield_half_extents - Vec2::splat(ACTOR_MARGIN)).max(Vec2::ZERO);

    for (mut tf, vel) in &mut q {
        let p = tf.translation.truncate();
        let clamped = p.clamp(-limit, limit);
        if clamped == p {
            continue;
        }
        tf.translation.x = clamped.x;
        tf.translation.y = clamped.y;

        if let Some(mut vel) = vel {
            if p.x != clamped.x && vel.0.x.signum() == p.x.signum() {
                vel.0.x = 0.0;
            }
            if p.y != clamped.y && vel.0.y.signum() == p.y.signum() {
                vel.0.y = 0.0;
            }
        }
    }
}
