use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{ensure_messages, read_messages, run_system_once, set_clock};

fn player_world() -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    ensure_messages::<ActorHit>(&mut world);
    ensure_messages::<SpawnProjectileRequest>(&mut world);
    run_system_once(&mut world, spawn);

    let player = world
        .query_filtered::<Entity, With<Player>>()
        .single(&world)
        .expect("one player");
    (world, player)
}

fn hit(world: &mut World, entity: Entity, outcome: DamageOutcome) {
    world.write_message(ActorHit {
        entity,
        faction: Faction::Player,
        outcome,
    });
}

#[test]
fn spawn_creates_player_with_full_health() {
    let (world, player) = player_world();
    let health = world.get::<Health>(player).unwrap();
    assert_eq!(health.current(), 100);
    assert_eq!(*world.get::<Faction>(player).unwrap(), Faction::Player);
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), player_layers());
}

#[test]
fn player_body_is_solid_but_never_spins() {
    let (world, player) = player_world();
    assert!(world.get::<RigidBody>(player).unwrap().is_dynamic());
    assert_eq!(
        world.get::<LockedAxes>(player).unwrap().to_bits(),
        LockedAxes::ROTATION_LOCKED.to_bits()
    );
    assert!(player_layers().filters.has_all(Layer::Obstacle));
    assert!(!recovering_player_layers().filters.has_all(Layer::Obstacle));
}

#[test]
fn apply_movement_sets_velocity() {
    let (mut world, player) = player_world();
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(1.0, 0.0),
        fire: false,
    });

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::new(100.0, 0.0));
}

#[test]
fn recovering_player_moves_slower() {
    let (mut world, player) = player_world();
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(0.0, -1.0),
        fire: false,
    });
    world.entity_mut(player).insert(Recovery::new(0.1));

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::new(0.0, -60.0));
}

#[test]
fn diagonal_input_is_not_faster() {
    let (mut world, player) = player_world();
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(1.0, 1.0),
        fire: false,
    });

    run_system_once(&mut world, apply_movement);

    let speed = world.get::<LinearVelocity>(player).unwrap().0.length();
    assert!((speed - 100.0).abs() < 1e-3);
}

#[test]
fn shoot_writes_one_request_along_facing() {
    let (mut world, _) = player_world();
    world.insert_resource(PlayerInput {
        move_axis: Vec2::ZERO,
        fire: true,
    });

    run_system_once(&mut world, shoot);

    let reqs = read_messages::<SpawnProjectileRequest>(&mut world);
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].faction, Faction::Player);
    assert_eq!(reqs[0].damage, 1);
    // Facing starts at +X; the shot leaves the muzzle 18 units ahead.
    assert_eq!(reqs[0].pos, Vec2::new(18.0, -200.0));
    assert_eq!(reqs[0].vel, Vec2::new(200.0, 0.0));

    // The trigger is consumed.
    assert!(!world.resource::<PlayerInput>().fire);
}

#[test]
fn no_trigger_no_shot() {
    let (mut world, _) = player_world();
    world.insert_resource(PlayerInput::default());

    run_system_once(&mut world, shoot);

    assert!(read_messages::<SpawnProjectileRequest>(&mut world).is_empty());
}

#[test]
fn hurt_player_enters_recovery() {
    let (mut world, player) = player_world();
    world.get_mut::<LinearVelocity>(player).unwrap().0 = Vec2::new(100.0, 0.0);
    hit(&mut world, player, DamageOutcome::Hurt { remaining: 90 });

    run_system_once(&mut world, react_to_hits);

    assert!(world.get::<Recovery>(player).is_some());
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), recovering_player_layers());
}

#[test]
fn defeated_player_is_destroyed() {
    let (mut world, player) = player_world();
    hit(&mut world, player, DamageOutcome::Defeated);

    run_system_once(&mut world, react_to_hits);

    assert!(world.get_entity(player).is_err());
}

#[test]
fn recovery_window_ends_and_restores_layers() {
    let (mut world, player) = player_world();
    world
        .entity_mut(player)
        .insert((Recovery::new(0.1), recovering_player_layers()));

    set_clock(&mut world, 0.0625, 0.0625);
    run_system_once(&mut world, end_recovery);
    assert!(world.get::<Recovery>(player).is_some());

    set_clock(&mut world, 0.125, 0.0625);
    run_system_once(&mut world, end_recovery);
    assert!(world.get::<Recovery>(player).is_none());
    assert_eq!(*world.get::<CollisionLayers>(player).unwrap(), player_layers());
}

#[test]
fn recovery_is_dropped_with_the_player() {
    let (mut world, player) = player_world();
    world.entity_mut(player).insert(Recovery::new(0.1));
    world.entity_mut(player).despawn();

    // Nothing left to tick; the system must simply find no work.
    set_clock(&mut world, 1.0, 1.0);
    run_system_once(&mut world, end_recovery);

    let mut q = world.query::<&Recovery>();
    assert_eq!(q.iter(&world).count(), 0);
}
