//! Score: one point on entering a level, then one per `score_interval` seconds survived.

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};

#[derive(Resource, Debug)]
pub struct Score {
    pub value: u32,
    timer: Timer,
}

impl Score {
    pub fn new(interval: f32) -> Self {
        Self {
            value: 0,
            timer: Timer::from_seconds(interval.max(f32::EPSILON), TimerMode::Repeating),
        }
    }

    /// A fresh level score; the first point is awarded on arrival.
    pub fn for_level(interval: f32) -> Self {
        Self {
            value: 1,
            ..Self::new(interval)
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(Tunables::default().score_interval)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Score>()
        .add_systems(OnEnter(GameState::InGame), reset_score)
        .add_systems(Update, tick_score.run_if(in_state(GameState::InGame)));
}

fn reset_score(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(Score::for_level(tunables.score_interval));
}

/// Driven by virtual time, so the game-over pause also stops the score.
pub fn tick_score(time: Res<Time<Virtual>>, mut score: ResMut<Score>) {
    score.timer.tick(time.delta());
    let points = score.timer.times_finished_this_tick();
    score.value = score.value.saturating_add(points);
}
