//! Hit sparks: a small fading square where a player shot landed.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::actors::Faction;

use super::components::{HitSpark, Lifetime};
use super::messages::ProjectileImpact;

const SPARK_SECS: f32 = 0.25;

pub fn spawn_hit_sparks(mut commands: Commands, mut impacts: MessageReader<ProjectileImpact>) {
    for impact in impacts.read() {
        if impact.faction != Faction::Player {
            continue;
        }
        commands.spawn((
            Name::new("HitSpark"),
            HitSpark,
            Lifetime(Timer::from_seconds(SPARK_SECS, TimerMode::Once)),
            Sprite {
                color: Color::srgb(1.0, 0.95, 0.6),
                custom_size: Some(Vec2::splat(12.0)),
                ..default()
            },
            Transform::from_translation(impact.pos.extend(3.0)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

pub fn fade_hit_sparks(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime, &mut Sprite), With<HitSpark>>,
) {
    for (e, mut lifetime, mut sprite) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() {
            commands.entity(e).despawn();
            continue;
        }
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - lifetime.fraction();
        sprite.color = c.into();
    }
}
