//! Progression plugin: defeat counting and level transitions.
//!
//! ```text
//! OnEnter(InGame):   arm ProgressionCounter from the current LevelSpec, publish ActiveScene
//! FixedPostUpdate:   ActorDefeated(Enemy) -> counter.on_defeat()
//!                      Some(NextLevel) -> registry.advance(), GameState::Loading
//!                      Some(EndScreen) -> GameState::End
//! ```
//!
//! The counter is only consulted when a defeat arrives, never polled, so one crossing
//! produces one transition.

pub mod counter;
pub mod levels;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::actors::{ActorDefeated, Faction};
use crate::plugins::core::ActiveScene;
use crate::plugins::projectiles::collision;

pub use counter::{Destination, ProgressionCounter};
pub use levels::{LevelRegistry, LevelSpec};

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelRegistry>()
        .add_systems(OnEnter(GameState::InGame), (arm_counter, publish_level_scene))
        .add_systems(
            FixedPostUpdate,
            count_defeats
                .after(collision::process_projectile_contacts)
                .run_if(in_state(GameState::InGame)),
        );
}

fn arm_counter(mut commands: Commands, levels: Res<LevelRegistry>) {
    let level = levels.current();
    commands.insert_resource(ProgressionCounter::new(level.defeat_threshold, level.destination));
}

fn publish_level_scene(levels: Res<LevelRegistry>, mut scene: ResMut<ActiveScene>) {
    scene.set_if_neq(ActiveScene(levels.current().name.clone()));
}

pub fn count_defeats(
    mut defeats: MessageReader<ActorDefeated>,
    counter: Option<ResMut<ProgressionCounter>>,
    mut levels: ResMut<LevelRegistry>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(mut counter) = counter else {
        let dropped = defeats.read().filter(|d| d.faction == Faction::Enemy).count();
        if dropped > 0 {
            warn!("No ProgressionCounter; ignoring {dropped} enemy defeat(s)");
        }
        return;
    };

    for defeat in defeats.read() {
        if defeat.faction != Faction::Enemy {
            continue;
        }
        let Some(destination) = counter.on_defeat() else {
            continue;
        };
        go_to(destination, &mut levels, &mut next);
    }
}

fn go_to(destination: Destination, levels: &mut LevelRegistry, next: &mut NextState<GameState>) {
    match destination {
        Destination::NextLevel => {
            if levels.advance() {
                info!("No more levels. Returning to the first level.");
            }
            info!("Loading {}", levels.current().name);
            next.set(GameState::Loading);
        }
        Destination::EndScreen => {
            info!("Level cleared, showing the end screen");
            next.set(GameState::End);
        }
    }
}
