//! Actor capability tests.
//!
//! The timing scenarios step with dt = 0.25, which is exact in f32, so phase boundaries
//! land on the tick they are expected on.

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{
    ensure_messages, read_messages, run_system_once, seeded_rng, set_clock,
};
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

const DT: f32 = 0.25;

fn pattern() -> VolleyPattern {
    VolleyPattern {
        projectile: ProjectileSpec {
            speed: 200.0,
            damage: 10,
        },
        offset: 10.0,
    }
}

fn boss_profile() -> FireProfile {
    FireProfile::CycledVolley {
        pattern: pattern(),
        clock: ShotClock::new(0.5),
        cycle: FireCycle::new(5.0, 6.0),
    }
}

// --------------------------------------------------------------------------------------
// Health
// --------------------------------------------------------------------------------------

#[test]
fn thirty_unit_hits_defeat_on_the_last() {
    let mut health = Health::new(30);

    for expected in (1..30).rev() {
        assert_eq!(health.apply_damage(1), DamageOutcome::Hurt { remaining: expected });
    }
    assert_eq!(health.apply_damage(1), DamageOutcome::Defeated);
    assert_eq!(health.current(), 0);
    assert!(health.is_depleted());
}

#[test]
fn overkill_saturates_at_zero_and_defeats_once() {
    let mut health = Health::new(100);
    assert_eq!(health.apply_damage(250), DamageOutcome::Defeated);
    assert_eq!(health.current(), 0);

    assert_eq!(health.apply_damage(10), DamageOutcome::AlreadyDefeated);
    assert_eq!(health.current(), 0);
}

#[test]
fn zero_damage_is_a_hurt_without_change() {
    let mut health = Health::new(5);
    assert_eq!(health.apply_damage(0), DamageOutcome::Hurt { remaining: 5 });
}

#[test]
fn zero_max_health_is_raised_to_one() {
    let health = Health::new(0);
    assert_eq!(health.max(), 1);
    assert_eq!(health.current(), 1);
}

// --------------------------------------------------------------------------------------
// Fire cycle
// --------------------------------------------------------------------------------------

#[test]
fn cycle_starts_paused_and_alternates() {
    let mut cycle = FireCycle::new(5.0, 6.0);
    assert_eq!(cycle.phase(), FirePhase::Paused);

    let mut transitions = Vec::new();
    for i in 1..=68 {
        if let Some(phase) = cycle.advance(DT) {
            transitions.push((i as f32 * DT, phase));
        }
    }

    assert_eq!(
        transitions,
        vec![
            (6.0, FirePhase::Firing),
            (11.0, FirePhase::Paused),
            (17.0, FirePhase::Firing),
        ]
    );
}

#[test]
fn huge_dt_switches_only_once() {
    let mut cycle = FireCycle::new(5.0, 6.0);
    assert_eq!(cycle.advance(100.0), Some(FirePhase::Firing));
    assert_eq!(cycle.phase_elapsed(), 0.0);
}

#[test]
fn boss_fires_only_inside_firing_windows() {
    let mut profile = boss_profile();
    let mut shots = Vec::new();

    for i in 1..=80 {
        let now = i as f32 * DT;
        if profile.tick(now, DT).is_some() {
            shots.push(now);
        }
    }

    // First window [6, 11): one shot every 0.5s.
    let first: Vec<f32> = (0..10).map(|k| 6.0 + k as f32 * 0.5).collect();
    assert_eq!(&shots[..10], first.as_slice());

    // Nothing in the pause [11, 17).
    assert!(shots.iter().all(|&t| !(11.0..17.0).contains(&t)));

    // The second window opens with a shot: the shot clock ran out while paused.
    assert_eq!(shots[10], 17.0);
}

#[test]
fn boss_firing_fraction_converges_to_duty_cycle() {
    let mut cycle = FireCycle::new(5.0, 6.0);
    let ticks = 11 * 4 * 40;
    let mut firing = 0;

    for _ in 0..ticks {
        cycle.advance(DT);
        if cycle.phase() == FirePhase::Firing {
            firing += 1;
        }
    }

    let fraction = firing as f32 / ticks as f32;
    assert!((fraction - 5.0 / 11.0).abs() < 0.01, "fraction = {fraction}");
}

#[test]
fn grunt_volley_respects_rate() {
    let mut profile = FireProfile::Volley {
        pattern: pattern(),
        clock: ShotClock::new(2.0),
    };

    let shots: Vec<f32> = (0..=32)
        .map(|i| i as f32 * DT)
        .filter(|&now| profile.tick(now, DT).is_some())
        .collect();

    assert_eq!(shots, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn aimed_profile_never_fires_on_its_own() {
    let mut profile = FireProfile::Aimed {
        projectile: pattern().projectile,
        muzzle_offset: 18.0,
    };
    assert!((0..100).all(|i| profile.tick(i as f32, 1.0).is_none()));
}

// --------------------------------------------------------------------------------------
// Motion
// --------------------------------------------------------------------------------------

#[test]
fn wander_rerolls_on_interval_and_stays_in_range() {
    let mut rng = seeded_rng(11);
    let range = Vec2::new(60.0, 40.0);
    let mut wander = Wander::new(range, 1.0);

    let mut rolls = 0;
    let mut last = None;
    for i in 0..40 {
        let now = i as f32 * DT;
        wander.step(now, DT, &mut rng.0);

        let d = wander.direction();
        assert!(d.x.abs() <= range.x && d.y.abs() <= range.y);

        if last != Some(wander.next_change_at()) {
            rolls += 1;
            last = Some(wander.next_change_at());
        }
    }

    // 10 seconds at a 1 second interval.
    assert_eq!(rolls, 10);
}

#[test]
fn wander_translation_scales_with_dt() {
    let mut rng = seeded_rng(3);
    let mut wander = Wander::new(Vec2::new(60.0, 40.0), 1.0);
    let delta = wander.step(0.0, 0.5, &mut rng.0);
    assert_eq!(delta, wander.direction() * 0.5);
}

#[test]
fn steering_normalizes_and_remembers_facing() {
    let mut steering = Steering::new(100.0, 60.0);
    assert_eq!(steering.facing(), Vec2::X);

    steering.steer(Vec2::new(1.0, 1.0));
    let v = steering.velocity(false);
    assert!((v.length() - 100.0).abs() < 1e-3);
    assert!((steering.velocity(true).length() - 60.0).abs() < 1e-3);

    steering.steer(Vec2::ZERO);
    assert_eq!(steering.velocity(false), Vec2::ZERO);
    assert!((steering.facing() - Vec2::new(1.0, 1.0).normalize()).length() < 1e-6);
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

#[test]
fn fire_volleys_writes_two_opposite_requests() {
    let mut world = World::new();
    ensure_messages::<SpawnProjectileRequest>(&mut world);
    set_clock(&mut world, 1.0, DT);

    world.spawn((
        Transform::from_xyz(100.0, 50.0, 1.0),
        Faction::Enemy,
        Health::new(30),
        FireProfile::Volley {
            pattern: pattern(),
            clock: ShotClock::new(2.0),
        },
    ));

    run_system_once(&mut world, fire_volleys);

    let reqs = read_messages::<SpawnProjectileRequest>(&mut world);
    assert_eq!(reqs.len(), 2);
    assert!(reqs.iter().all(|r| r.faction == Faction::Enemy && r.damage == 10));
    assert_eq!(reqs[0].vel, -reqs[1].vel);
    assert_eq!(reqs[0].pos.x, 100.0);
    assert_eq!((reqs[0].pos.y - 50.0).abs(), 10.0);
    assert_eq!(reqs[0].pos.y - 50.0, -(reqs[1].pos.y - 50.0));
}

#[test]
fn defeated_actors_neither_fire_nor_move() {
    let mut world = World::new();
    ensure_messages::<SpawnProjectileRequest>(&mut world);
    world.insert_resource(seeded_rng(1));
    set_clock(&mut world, 1.0, DT);

    let mut health = Health::new(1);
    health.apply_damage(1);

    let e = world
        .spawn((
            Transform::from_xyz(5.0, 5.0, 1.0),
            Faction::Enemy,
            health,
            FireProfile::Volley {
                pattern: pattern(),
                clock: ShotClock::new(2.0),
            },
            MotionProfile::Wander(Wander::new(Vec2::new(60.0, 40.0), 1.0)),
        ))
        .id();

    run_system_once(&mut world, fire_volleys);
    run_system_once(&mut world, wander_actors);

    assert!(read_messages::<SpawnProjectileRequest>(&mut world).is_empty());
    assert_eq!(world.get::<Transform>(e).unwrap().translation, Vec3::new(5.0, 5.0, 1.0));
}

#[test]
fn wander_actors_moves_only_wanderers() {
    let mut world = World::new();
    world.insert_resource(seeded_rng(5));
    set_clock(&mut world, 1.0, DT);

    let wanderer = world
        .spawn((
            Transform::default(),
            Health::new(30),
            MotionProfile::Wander(Wander::new(Vec2::new(60.0, 40.0), 1.0)),
        ))
        .id();
    let steered = world
        .spawn((
            Transform::default(),
            Health::new(100),
            MotionProfile::Steered(Steering::new(100.0, 60.0)),
        ))
        .id();

    run_system_once(&mut world, wander_actors);

    let MotionProfile::Wander(w) = world.get::<MotionProfile>(wanderer).unwrap() else {
        panic!("wanderer lost its profile");
    };
    let expected = (w.direction() * DT).extend(0.0);
    assert_eq!(world.get::<Transform>(wanderer).unwrap().translation, expected);
    assert_eq!(world.get::<Transform>(steered).unwrap().translation, Vec3::ZERO);
}

#[test]
fn factions_oppose_each_other() {
    assert_eq!(Faction::Player.opposing(), Faction::Enemy);
    assert_eq!(Faction::Enemy.opposing(), Faction::Player);
    assert_ne!(Faction::Player.projectile_layer(), Faction::Enemy.projectile_layer());
}
