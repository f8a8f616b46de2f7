//! Screens plugin: title, loading hop, game over, end.
//!
//! ```text
//! Title   --Enter-->  select level 0, Loading
//! Loading ---------->  InGame (next transition)
//! InGame  --no Player--> game-over panel, virtual time paused
//!         --R--------> resume time, Loading (reloads the current level)
//! End     --Enter-->  Title
//! ```
//!
//! Screen text is plain UI `Text`, scoped to the state it belongs to.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::core::ActiveScene;
use crate::plugins::player::Player;
use crate::plugins::progression::LevelRegistry;

pub const TITLE_SCENE: &str = "Title";
pub const END_SCENE: &str = "End";

/// Present while the game-over panel is up.
#[derive(Component)]
pub struct GameOverPanel;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Title), (enter_title, spawn_title_text))
        .add_systems(Update, start_game.run_if(in_state(GameState::Title)))
        .add_systems(OnEnter(GameState::Loading), finish_loading)
        .add_systems(OnEnter(GameState::InGame), resume_time)
        .add_systems(
            Update,
            (detect_game_over, restart_level)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnEnter(GameState::End), (enter_end, spawn_end_text))
        .add_systems(Update, back_to_title.run_if(in_state(GameState::End)));
}

fn screen_text(commands: &mut Commands, text: &str, size: f32, top: Val, state: GameState) {
    commands.spawn((
        Name::new(format!("ScreenText({text})")),
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        Node {
            position_type: PositionType::Absolute,
            top,
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        DespawnOnExit(state),
    ));
}

fn enter_title(mut scene: ResMut<ActiveScene>) {
    scene.set_if_neq(ActiveScene(TITLE_SCENE.into()));
}

fn spawn_title_text(mut commands: Commands) {
    screen_text(&mut commands, "Top-Down Shooter", 64.0, Val::Percent(30.0), GameState::Title);
    screen_text(&mut commands, "Press Enter", 28.0, Val::Percent(55.0), GameState::Title);
}

pub fn start_game(
    keys: Res<ButtonInput<KeyCode>>,
    mut levels: ResMut<LevelRegistry>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    levels.select(0);
    info!("Starting {}", levels.current().name);
    next.set(GameState::Loading);
}

pub fn finish_loading(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::InGame);
}

/// A reload out of the game-over panel arrives with virtual time still paused.
pub fn resume_time(mut time: ResMut<Time<Virtual>>) {
    if time.is_paused() {
        time.unpause();
    }
}

pub fn detect_game_over(
    mut commands: Commands,
    mut time: ResMut<Time<Virtual>>,
    q_player: Query<(), With<Player>>,
    q_panel: Query<(), With<GameOverPanel>>,
) {
    if !q_player.is_empty() || !q_panel.is_empty() {
        return;
    }

    info!("Game over");
    time.pause();

    commands.spawn((
        Name::new("GameOverPanel"),
        GameOverPanel,
        Text::new("Game Over\nPress R to restart"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.3, 0.3)),
        TextLayout::new_with_justify(Justify::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn restart_level(
    keys: Res<ButtonInput<KeyCode>>,
    mut time: ResMut<Time<Virtual>>,
    q_panel: Query<(), With<GameOverPanel>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if q_panel.is_empty() || !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    time.unpause();
    next.set(GameState::Loading);
}

fn enter_end(mut scene: ResMut<ActiveScene>) {
    scene.set_if_neq(ActiveScene(END_SCENE.into()));
}

fn spawn_end_text(mut commands: Commands) {
    screen_text(&mut commands, "The End", 64.0, Val::Percent(30.0), GameState::End);
    screen_text(&mut commands, "Press Enter", 28.0, Val::Percent(55.0), GameState::End);
}

pub fn back_to_title(keys: Res<ButtonInput<KeyCode>>, mut next: ResMut<NextState<GameState>>) {
    if keys.just_pressed(KeyCode::Enter) {
        next.set(GameState::Title);
    }
}
