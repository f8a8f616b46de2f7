//! Core plugin: shared resources and global settings.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::tunables::Tunables;

/// Random source for gameplay rolls (enemy wander directions).
///
/// Entropy-seeded at startup; tests insert a fixed seed instead.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Name of the scene currently presented (`"Title"`, `"Level 0"`, ..., `"End"`).
///
/// Written by the screens and progression plugins, read by presentation (music).
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveScene(pub String);

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.init_resource::<GameRng>();
    app.init_resource::<ActiveScene>();
}
