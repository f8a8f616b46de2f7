//! Physics plugin: top-down avian2d world.
//!
//! No gravity, and the fixed clock drives both gameplay (`FixedUpdate`) and the
//! physics step (`FixedPostUpdate`), so movement, firing and contacts share one tick.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let (ppm, hz) = {
        let tunables = app.world().resource::<Tunables>();
        (tunables.pixels_per_meter, tunables.fixed_hz)
    };
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
    app.insert_resource(Time::<Fixed>::from_hz(hz));
}
