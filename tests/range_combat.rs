//! Combat pipeline tests against a real World: the shoot/reload state
//! machine end-to-end and the enemy damage/death flow through the event
//! pipeline.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use weapon_foundry::config::tuning::Tuning;
use weapon_foundry::game::blueprint::default_blueprint;
use weapon_foundry::game::blueprint::stats::EffectiveStats;
use weapon_foundry::game::combat::{self, AmmoState, RecoilState};
use weapon_foundry::game::components::{Health, Hittable, PlayerRig, ViewAngles};
use weapon_foundry::game::enemy::{self, DebrisVelocity, Enemy, EnemyState};
use weapon_foundry::game::events::{DamageSource, GameEvent};
use weapon_foundry::game::intent::Intent;
use weapon_foundry::game::weapon::{AssembledWeapon, CurrentWeapon};

fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tuning::default());
    world.insert_resource(Assets::<Mesh>::default());
    world.insert_resource(Assets::<StandardMaterial>::default());
    world.init_resource::<Messages<GameEvent>>();
    world
}

/// Player rig at the origin looking down -Z, holding the default rifle.
fn spawn_armed_player(world: &mut World) -> (Entity, EffectiveStats) {
    let blueprint = default_blueprint("ranger");
    let effective = EffectiveStats::compute(&blueprint);
    let weapon = world
        .spawn(AssembledWeapon {
            blueprint,
            effective: effective.clone(),
        })
        .id();
    let player = world
        .spawn((
            PlayerRig,
            Transform::default(),
            ViewAngles::default(),
            Intent::default(),
            RecoilState::default(),
            AmmoState::new(effective.magazine_size, effective.reserve_ammo),
            CurrentWeapon(weapon),
        ))
        .id();
    (player, effective)
}

fn write_event(world: &mut World, event: GameEvent) {
    let mut state: SystemState<MessageWriter<GameEvent>> = SystemState::new(world);
    state.get_mut(world).write(event);
    state.apply(world);
}

#[test]
fn firing_damages_the_target_and_spends_ammo() {
    let mut world = test_world();
    let (player, effective) = spawn_armed_player(&mut world);

    let eye = world.resource::<Tuning>().eye_height;
    let enemy = world
        .spawn((
            Enemy::default(),
            Health::new(100.0),
            Hittable { radius: 0.8 },
            Transform::from_translation(Vec3::new(0.0, eye, -10.0)),
            GlobalTransform::from_translation(Vec3::new(0.0, eye, -10.0)),
        ))
        .id();

    world.get_mut::<Intent>(player).unwrap().fire = true;

    let mut schedule = Schedule::default();
    schedule.add_systems((combat::player_shoot, combat::apply_damage_events).chain());
    schedule.run(&mut world);

    let ammo = world.get::<AmmoState>(player).unwrap();
    assert_eq!(ammo.current, effective.magazine_size - 1);

    let health = world.get::<Health>(enemy).unwrap();
    assert!((health.current - (100.0 - effective.damage)).abs() < 1e-4);

    // the shot advanced the recoil pattern
    assert_eq!(world.get::<RecoilState>(player).unwrap().pattern_index, 1);
    // the fire intent was consumed
    assert!(!world.get::<Intent>(player).unwrap().fire);
}

#[test]
fn dry_trigger_redirects_to_reload() {
    let mut world = test_world();
    let (player, _) = spawn_armed_player(&mut world);

    {
        let mut ammo = world.get_mut::<AmmoState>(player).unwrap();
        ammo.current = 0;
    }
    world.get_mut::<Intent>(player).unwrap().fire = true;

    let mut schedule = Schedule::default();
    schedule.add_systems(combat::player_shoot);
    schedule.run(&mut world);

    let ammo = world.get::<AmmoState>(player).unwrap();
    assert_eq!(ammo.current, 0, "a dry trigger must not fire");
    assert!(ammo.is_reloading());
}

#[test]
fn reload_completes_through_the_timer() {
    let mut world = test_world();
    let (player, effective) = spawn_armed_player(&mut world);

    {
        let mut ammo = world.get_mut::<AmmoState>(player).unwrap();
        ammo.current = 0;
        ammo.reserve = 75;
    }
    world.get_mut::<Intent>(player).unwrap().reload = true;

    let mut schedule = Schedule::default();
    schedule.add_systems(combat::reload_system);

    // first tick starts the reload
    schedule.run(&mut world);
    assert!(world.get::<AmmoState>(player).unwrap().is_reloading());

    // drive fixed ticks past the reload duration (default 2.5s at 60Hz)
    let ticks = (effective.reload_time * 60.0) as usize + 5;
    for _ in 0..ticks {
        schedule.run(&mut world);
    }

    let ammo = world.get::<AmmoState>(player).unwrap();
    assert!(!ammo.is_reloading());
    assert_eq!(ammo.current, effective.magazine_size);
    assert_eq!(ammo.reserve, 75 - effective.magazine_size);
}

#[test]
fn enemy_damage_pipeline_aggros_then_kills_exactly_once() {
    let mut world = test_world();

    let enemy = world
        .spawn((
            Enemy::default(),
            Health::new(100.0),
            Transform::from_translation(Vec3::new(0.0, 0.9, -20.0)),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            combat::apply_damage_events,
            enemy::enemy_damage_reactions,
            enemy::enemy_death,
        )
            .chain(),
    );

    // nonlethal damage aggros an idle enemy
    write_event(
        &mut world,
        GameEvent::DealDamage {
            src: None,
            dst: enemy,
            amount: 40.0,
            source: DamageSource::PlayerWeapon,
        },
    );
    schedule.run(&mut world);

    assert!((world.get::<Health>(enemy).unwrap().current - 60.0).abs() < 1e-4);
    assert_eq!(world.get::<Enemy>(enemy).unwrap().state, EnemyState::Chase);

    // lethal damage: the body is disposed and debris spawned
    write_event(
        &mut world,
        GameEvent::DealDamage {
            src: None,
            dst: enemy,
            amount: 60.0,
            source: DamageSource::PlayerWeapon,
        },
    );
    schedule.run(&mut world);

    assert!(world.get_entity(enemy).is_err(), "dead body not disposed");
    let mut debris = world.query::<&DebrisVelocity>();
    assert!(debris.iter(&world).count() > 0, "death burst missing");

    // damage addressed to the dead entity is a no-op
    write_event(
        &mut world,
        GameEvent::DealDamage {
            src: None,
            dst: enemy,
            amount: 10.0,
            source: DamageSource::PlayerWeapon,
        },
    );
    schedule.run(&mut world);
}
