use bevy::prelude::*;

use super::combat::{AmmoState, CombatAssets, RecoilState};
use super::components::{
    GamePhase, Health, Hittable, InRange, MoveVelocity, PlayerCamera, PlayerRig, VerticalMotion,
    ViewAngles,
};
use super::enemy::Enemy;
use super::fps::InputLock;
use super::intent::Intent;
use crate::config::tuning::Tuning;
use crate::game::blueprint::{default_blueprint, WeaponBlueprint};
use crate::game::parts::library::PartLibrary;
use crate::game::weapon::assembler;
use crate::game::weapon::CurrentWeapon;

/// The blueprint the player takes into the range. Written by the foundry,
/// read on range entry.
#[derive(Resource)]
pub struct ActiveLoadout(pub WeaponBlueprint);

impl Default for ActiveLoadout {
    fn default() -> Self {
        Self(default_blueprint("ranger"))
    }
}

const ENEMY_SPAWNS: [Vec3; 4] = [
    Vec3::new(-8.0, 0.0, -15.0),
    Vec3::new(8.0, 0.0, -18.0),
    Vec3::new(0.0, 0.0, -26.0),
    Vec3::new(-16.0, 0.0, -8.0),
];

const CRATE_SPAWNS: [Vec3; 5] = [
    Vec3::new(-4.0, 0.75, -10.0),
    Vec3::new(5.0, 0.75, -12.0),
    Vec3::new(-10.0, 0.75, -20.0),
    Vec3::new(12.0, 0.75, -6.0),
    Vec3::new(2.0, 0.75, -22.0),
];

const GROUND_HALF: f32 = 40.0;

/// Build the training scene: ground, walls, crates, enemies, the player
/// rig and its assembled weapon.
pub fn setup_range(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<Tuning>,
    library: Res<PartLibrary>,
    loadout: Res<ActiveLoadout>,
) {
    // Shared tracer/impact assets (unit shapes scaled per spawn)
    commands.insert_resource(CombatAssets {
        tracer_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        tracer_player: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.2),
            emissive: LinearRgba::rgb(1.0, 0.9, 0.2),
            unlit: true,
            ..default()
        }),
        tracer_enemy: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.2, 0.2),
            emissive: LinearRgba::rgb(1.0, 0.1, 0.1),
            unlit: true,
            ..default()
        }),
        impact_mesh: meshes.add(Sphere::new(1.0)),
        impact_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.3, 0.1),
            emissive: LinearRgba::rgb(1.0, 0.3, 0.1),
            unlit: true,
            ..default()
        }),
    });

    // Lighting
    commands.spawn((
        InRange,
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    // Ground
    commands.spawn((
        InRange,
        Mesh3d(meshes.add(Cuboid::new(GROUND_HALF * 2.0, 0.1, GROUND_HALF * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.22, 0.24, 0.22))),
        Transform::from_translation(Vec3::new(0.0, -0.05, 0.0)),
    ));

    // Boundary walls
    let wall_material = materials.add(Color::srgb(0.3, 0.3, 0.34));
    let wall_mesh = meshes.add(Cuboid::new(GROUND_HALF * 2.0, 4.0, 0.5));
    for (pos, rot) in [
        (Vec3::new(0.0, 2.0, -GROUND_HALF), 0.0_f32),
        (Vec3::new(0.0, 2.0, GROUND_HALF), 0.0),
        (Vec3::new(-GROUND_HALF, 2.0, 0.0), std::f32::consts::FRAC_PI_2),
        (Vec3::new(GROUND_HALF, 2.0, 0.0), std::f32::consts::FRAC_PI_2),
    ] {
        commands.spawn((
            InRange,
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(pos).with_rotation(Quat::from_rotation_y(rot)),
        ));
    }

    // Cover crates: hittable but not damageable (cosmetic hits only)
    let crate_mesh = meshes.add(Cuboid::new(1.5, 1.5, 1.5));
    let crate_material = materials.add(Color::srgb(0.45, 0.35, 0.2));
    for pos in CRATE_SPAWNS {
        commands.spawn((
            InRange,
            Hittable { radius: 1.1 },
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(pos),
        ));
    }

    // Enemies
    let enemy_mesh = meshes.add(Capsule3d::new(0.4, 1.0));
    let enemy_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.1, 0.1),
        emissive: LinearRgba::rgb(0.15, 0.0, 0.0),
        ..default()
    });
    for pos in ENEMY_SPAWNS {
        commands.spawn((
            InRange,
            Enemy::default(),
            Health::new(100.0),
            Hittable { radius: 0.8 },
            Mesh3d(enemy_mesh.clone()),
            MeshMaterial3d(enemy_material.clone()),
            Transform::from_translation(pos + Vec3::Y * 0.9),
        ));
    }

    // Player rig with first-person camera and the active weapon
    let weapon_root = assembler::assemble_from_blueprint(
        &mut commands,
        &mut meshes,
        &mut materials,
        &library,
        &loadout.0,
    );
    let blueprint_scale = loadout.0.scale.unwrap_or(1.0);
    commands.entity(weapon_root).insert(Transform {
        translation: Vec3::new(tuning.weapon_view_x, tuning.weapon_view_y, tuning.weapon_view_z),
        scale: Vec3::splat(tuning.weapon_view_scale * blueprint_scale),
        ..default()
    });

    let effective = crate::game::blueprint::stats::EffectiveStats::compute(&loadout.0);
    let camera = commands
        .spawn((
            PlayerCamera,
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: 1.2,
                ..default()
            }),
            Transform::from_translation(Vec3::new(0.0, tuning.eye_height, 0.0)),
            Visibility::default(),
        ))
        .add_child(weapon_root)
        .id();

    commands
        .spawn((
            PlayerRig,
            InRange,
            Transform::from_translation(Vec3::new(0.0, 0.0, 10.0)),
            Visibility::default(),
            ViewAngles::default(),
            MoveVelocity::default(),
            VerticalMotion::default(),
            Intent::default(),
            RecoilState::default(),
            AmmoState::new(effective.magazine_size, effective.reserve_ammo),
            Health::new(tuning.player_max_health),
            CurrentWeapon(weapon_root),
        ))
        .add_child(camera);

    info!("Range ready: {} enemies, loadout '{}'", ENEMY_SPAWNS.len(), loadout.0.name);
}

/// Despawn everything tagged for the range session.
pub fn teardown_range(mut commands: Commands, query: Query<Entity, With<InRange>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

/// Escape while the pointer is already released returns to the menu.
/// Runs before the pointer-lock system so the unlocking press is not
/// also treated as an exit.
pub fn range_exit_input(
    lock: Res<InputLock>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GamePhase>>,
) {
    if !lock.locked && keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GamePhase::MainMenu);
    }
}
