//! HUD plugin (render-only): player health and score in the top-left corner.
//!
//! Health follows the player's `ActorHit` messages rather than the `Health` component: the
//! lethal hit despawns the player in the same fixed step, and the HUD must still read 0.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::actors::{ActorHit, DamageOutcome, Faction};
use crate::plugins::score::Score;

#[derive(Component)]
pub struct HealthText;

#[derive(Component)]
pub struct ScoreText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            (update_health_text, update_score_text).run_if(in_state(GameState::InGame)),
        );
}

pub fn health_label(current: u32, max: u32) -> String {
    format!("{current}/{max}")
}

pub fn score_label(score: &Score) -> String {
    format!("Score: {}", score.value)
}

fn spawn_hud(mut commands: Commands, tunables: Res<Tunables>) {
    let max = tunables.player.max_health;

    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|hud| {
            hud.spawn((
                HealthText,
                Text::new(health_label(max, max)),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.9, 0.5)),
            ));
            hud.spawn((
                ScoreText,
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
            ));
        });
}

pub fn update_health_text(
    mut hits: MessageReader<ActorHit>,
    tunables: Res<Tunables>,
    mut q_text: Query<&mut Text, With<HealthText>>,
) {
    let Some(current) = hits
        .read()
        .filter(|hit| hit.faction == Faction::Player)
        .filter_map(|hit| match hit.outcome {
            DamageOutcome::Hurt { remaining } => Some(remaining),
            DamageOutcome::Defeated => Some(0),
            DamageOutcome::AlreadyDefeated => None,
        })
        .last()
    else {
        return;
    };

    let label = health_label(current, tunables.player.max_health);
    for mut text in &mut q_text {
        text.0 = label.clone();
    }
}

fn update_score_text(score: Res<Score>, mut q_text: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut q_text {
        text.0 = score_label(&score);
    }
}
