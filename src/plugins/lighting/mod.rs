//! Lighting plugin (Firefly) (render-only): a light that follows the player and dims while
//! the player is recovering from a hit.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::{Player, Recovery};

const LIGHT_COLOR: Color = Color::srgb(1.0, 0.9, 0.75);
const RECOVERY_COLOR: Color = Color::srgb(0.45, 0.35, 0.3);

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            Update,
            follow_player_light.run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: LIGHT_COLOR,
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<(&Transform, Has<Recovery>), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, recovering)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;

    let color = if recovering { RECOVERY_COLOR } else { LIGHT_COLOR };
    if light.color != color {
        light.color = color;
    }
}
