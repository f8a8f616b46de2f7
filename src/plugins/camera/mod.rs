//! Camera plugin (render-only).
//!
//! One camera for the whole app: the title and end screens need it as much as the levels
//! do, so it is spawned at startup and never state-scoped.
//!
//! The playfield is exactly one screen, so the camera sits at its centre and never moves.
//! The view size is pinned to the playfield rather than the window, which keeps the
//! border on screen if the window is ever resized.

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

/// Projection that shows the whole playfield and nothing more.
pub fn playfield_projection(playfield_half: Vec2) -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::Fixed {
            width: playfield_half.x * 2.0,
            height: playfield_half.y * 2.0,
        },
        ..OrthographicProjection::default_2d()
    })
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        playfield_projection(tunables.playfield_half_extents),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
