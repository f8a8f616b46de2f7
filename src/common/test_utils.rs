//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()` after
//! running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, MessageReader, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::plugins::core::GameRng;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Make sure a message buffer exists so readers/writers validate.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Collect every message of type `M` still held in the buffers.
pub fn read_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    run_system_once(world, |mut reader: MessageReader<M>| {
        reader.read().cloned().collect::<Vec<M>>()
    })
}

/// Insert (or replace) the generic clock, advanced to `elapsed` with a last delta of `dt`.
pub fn set_clock(world: &mut World, elapsed: f32, dt: f32) {
    let mut time = Time::<()>::default();
    let before = (elapsed - dt).max(0.0);
    if before > 0.0 {
        time.advance_by(Duration::from_secs_f32(before));
    }
    time.advance_by(Duration::from_secs_f32(elapsed - before));
    world.insert_resource(time);
}

/// Deterministic RNG resource.
pub fn seeded_rng(seed: u64) -> GameRng {
    GameRng(StdRng::seed_from_u64(seed))
}
