//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `InputPlugin` provides `ButtonInput<KeyCode>` for the player and screens.
//! - `AssetPlugin` + `ScenePlugin` so SceneSpawner exists.
//! - we then call `topdown_shooter::game::configure_headless` to install gameplay plugins.
//!
//! Time advances by exactly one fixed step per `app.update()`, so every frame runs the
//! fixed schedules once.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use topdown_shooter::common::state::GameState;

/// 1/64 s, the default fixed rate.
pub const STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        InputPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    topdown_shooter::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update()` directly.
    app.finish();
    app.cleanup();
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Request `target` and tick until it is the current state (Loading hops included).
pub fn enter(app: &mut App, target: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(target);
    for _ in 0..4 {
        app.update();
        if state(app) == target {
            return;
        }
    }
    panic!("never reached {target:?}, stuck in {:?}", state(app));
}

/// Start the current level from the title screen and let it settle.
pub fn start_level(app: &mut App) {
    app.update();
    enter(app, GameState::Loading);
    for _ in 0..4 {
        app.update();
        if state(app) == GameState::InGame {
            app.update();
            return;
        }
    }
    panic!("level never started");
}

pub fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count()
}
