//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod actors;
pub mod core;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod progression;
pub mod projectiles;
pub mod score;
pub mod screens;
pub mod world;

// Render-only
pub mod camera;
pub mod hud;
pub mod lighting;
pub mod music;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    actors::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    progression::plugin(app);
    score::plugin(app);
    screens::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    hud::plugin(app);
    music::plugin(app);
}
