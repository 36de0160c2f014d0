use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use super::profile::ReceiverProfile;
use super::{MountPoint, ReceiverRoot, WeaponPart, WeaponVisual};
use crate::game::blueprint::WeaponSlot;
use crate::game::parts::configs::{
    BarrelConfig, GripConfig, MagazineConfig, MagazineStyle, ScopeConfig, StockConfig,
};
use crate::game::parts::{PartKind, PartSpec};

/// A built part subtree: the root to parent onto a mount, plus every
/// renderable mesh underneath it (skin application targets).
pub struct PartHandle {
    pub root: Entity,
    pub visuals: Vec<Entity>,
}

/// A built receiver: exposes its mount points by slot.
pub struct ReceiverHandle {
    pub root: Entity,
    pub visuals: Vec<Entity>,
    mounts: HashMap<WeaponSlot, Entity>,
}

impl ReceiverHandle {
    /// Mount-point lookup. A miss is non-fatal; callers skip attachment.
    pub fn mount(&self, slot: WeaponSlot) -> Option<Entity> {
        self.mounts.get(&slot).copied()
    }
}

/// Marker on the barrel tip, used as the tracer origin.
#[derive(Component)]
pub struct MuzzlePoint;

fn part_material(base: Color, metallic: f32, roughness: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: base,
        metallic,
        perceptual_roughness: roughness,
        ..default()
    }
}

fn spawn_visual(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    transform: Transform,
) -> Entity {
    commands
        .spawn((WeaponVisual, Mesh3d(mesh), MeshMaterial3d(material), transform))
        .id()
}

/// Build a receiver for a style and expose its mount points.
///
/// Weapons are built muzzle-forward along -Z. Every call allocates fresh
/// mesh and material assets; nothing is cached across calls.
pub fn create_receiver(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    style: &str,
    tint_override: Option<[f32; 3]>,
) -> ReceiverHandle {
    let profile = ReceiverProfile::for_style(style);
    let dims = spec.resolve(PartKind::Receiver);
    let (w, h, l) = (dims.width, dims.height, dims.length);

    let tint = tint_override.unwrap_or(profile.tint);
    let material = materials.add(part_material(
        Color::srgb(tint[0], tint[1], tint[2]),
        0.4,
        0.6,
    ));

    let root = commands
        .spawn((
            ReceiverRoot,
            WeaponPart { kind: PartKind::Receiver },
            Name::new(format!("receiver_{}", profile.id)),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let mut visuals = Vec::new();

    let body = spawn_visual(
        commands,
        meshes.add(Cuboid::new(w, h, l)),
        material.clone(),
        Transform::IDENTITY,
    );
    visuals.push(body);
    commands.entity(root).add_child(body);

    if profile.rail > 0.0 {
        let rail_h = h * profile.rail;
        let rail = spawn_visual(
            commands,
            meshes.add(Cuboid::new(w * 0.7, rail_h, l * 0.6)),
            material,
            Transform::from_translation(Vec3::new(0.0, h * 0.5 + rail_h * 0.5, 0.0)),
        );
        visuals.push(rail);
        commands.entity(root).add_child(rail);
    }

    let mut mounts = HashMap::new();
    for def in profile.mounts {
        let offset = Vec3::new(
            def.offset[0] * w,
            def.offset[1] * h,
            def.offset[2] * l,
        );
        let mount = commands
            .spawn((
                MountPoint { slot: def.slot },
                Name::new(def.slot.mount_name()),
                Transform::from_translation(offset),
                Visibility::default(),
            ))
            .id();
        commands.entity(root).add_child(mount);
        mounts.insert(def.slot, mount);
    }

    ReceiverHandle { root, visuals, mounts }
}

/// Build a barrel. The library config scales the spec length; silenced
/// barrels grow a suppressor sleeve.
pub fn create_barrel(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    config: Option<&BarrelConfig>,
) -> PartHandle {
    let dims = spec.resolve(PartKind::Barrel);
    let length = dims.length * config.map_or(1.0, |c| c.length);
    let radius = dims.diameter * 0.5;

    let material = materials.add(part_material(Color::srgb(0.1, 0.1, 0.1), 0.7, 0.35));

    let root = commands
        .spawn((
            WeaponPart { kind: PartKind::Barrel },
            Name::new("barrel"),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let mut visuals = Vec::new();

    // cylinder axis is Y; lay it along Z, muzzle at -Z
    let tube = spawn_visual(
        commands,
        meshes.add(Cylinder::new(radius, length)),
        material.clone(),
        Transform::from_translation(Vec3::new(0.0, 0.0, -length * 0.5))
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    );
    visuals.push(tube);
    commands.entity(root).add_child(tube);

    if config.is_some_and(|c| c.id == "silenced") {
        let sleeve = spawn_visual(
            commands,
            meshes.add(Cylinder::new(radius * 1.6, length * 0.35)),
            material,
            Transform::from_translation(Vec3::new(0.0, 0.0, -length * 0.8))
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        );
        visuals.push(sleeve);
        commands.entity(root).add_child(sleeve);
    }

    let muzzle = commands
        .spawn((
            MuzzlePoint,
            Name::new("muzzle"),
            Transform::from_translation(Vec3::new(0.0, 0.0, -length)),
            Visibility::default(),
        ))
        .id();
    commands.entity(root).add_child(muzzle);

    PartHandle { root, visuals }
}

/// Build a stock extending back along +Z.
pub fn create_stock(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    _config: Option<&StockConfig>,
) -> PartHandle {
    let dims = spec.resolve(PartKind::Stock);
    let (w, h, l) = (dims.width, dims.height, dims.length);

    let material = materials.add(part_material(Color::srgb(0.18, 0.16, 0.14), 0.1, 0.8));

    let root = commands
        .spawn((
            WeaponPart { kind: PartKind::Stock },
            Name::new("stock"),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let mut visuals = Vec::new();

    let strut = spawn_visual(
        commands,
        meshes.add(Cuboid::new(w * 0.6, h * 0.4, l * 0.8)),
        material.clone(),
        Transform::from_translation(Vec3::new(0.0, 0.0, l * 0.4)),
    );
    visuals.push(strut);
    commands.entity(root).add_child(strut);

    let butt_plate = spawn_visual(
        commands,
        meshes.add(Cuboid::new(w, h, l * 0.2)),
        material,
        Transform::from_translation(Vec3::new(0.0, -h * 0.1, l * 0.9)),
    );
    visuals.push(butt_plate);
    commands.entity(root).add_child(butt_plate);

    PartHandle { root, visuals }
}

/// Build a magazine extending down from its mount. Geometry follows the
/// configured style: straight box, curved two-segment, or drum.
pub fn create_magazine(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    config: Option<&MagazineConfig>,
) -> PartHandle {
    let dims = spec.resolve(PartKind::Magazine);
    let (w, h, l) = (dims.width, dims.height, dims.length);
    let style = config.map_or(MagazineStyle::Straight, |c| c.style);

    let material = materials.add(part_material(Color::srgb(0.12, 0.12, 0.12), 0.5, 0.5));

    let root = commands
        .spawn((
            WeaponPart { kind: PartKind::Magazine },
            Name::new("magazine"),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let mut visuals = Vec::new();

    match style {
        MagazineStyle::Straight => {
            let body = spawn_visual(
                commands,
                meshes.add(Cuboid::new(w, l, h)),
                material,
                Transform::from_translation(Vec3::new(0.0, -l * 0.5, 0.0))
                    .with_rotation(Quat::from_rotation_x(PI / 16.0)),
            );
            visuals.push(body);
            commands.entity(root).add_child(body);
        }
        MagazineStyle::Curved => {
            // banana mag: two segments, the lower one swept forward
            let curve = spec.curve.unwrap_or(PI / 6.0);
            let upper = spawn_visual(
                commands,
                meshes.add(Cuboid::new(w, l * 0.55, h)),
                material.clone(),
                Transform::from_translation(Vec3::new(0.0, -l * 0.27, 0.0)),
            );
            visuals.push(upper);
            commands.entity(root).add_child(upper);

            let lower = spawn_visual(
                commands,
                meshes.add(Cuboid::new(w, l * 0.55, h)),
                material,
                Transform::from_translation(Vec3::new(0.0, -l * 0.68, -h * 0.25))
                    .with_rotation(Quat::from_rotation_x(curve)),
            );
            visuals.push(lower);
            commands.entity(root).add_child(lower);
        }
        MagazineStyle::Drum => {
            let drum = spawn_visual(
                commands,
                meshes.add(Cylinder::new(h * 0.7, w * 1.4)),
                material,
                Transform::from_translation(Vec3::new(0.0, -h * 0.8, 0.0))
                    .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            );
            visuals.push(drum);
            commands.entity(root).add_child(drum);
        }
    }

    PartHandle { root, visuals }
}

/// Build a scope tube with lens rings, sitting above its mount.
pub fn create_scope(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    _config: Option<&ScopeConfig>,
) -> PartHandle {
    let dims = spec.resolve(PartKind::Scope);
    let length = dims.length;
    let radius = dims.diameter * 0.5;

    let material = materials.add(part_material(Color::srgb(0.05, 0.05, 0.06), 0.6, 0.4));

    let root = commands
        .spawn((
            WeaponPart { kind: PartKind::Scope },
            Name::new("scope"),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let mut visuals = Vec::new();

    let tube = spawn_visual(
        commands,
        meshes.add(Cylinder::new(radius * 0.7, length)),
        material.clone(),
        Transform::from_translation(Vec3::new(0.0, radius, 0.0))
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    );
    visuals.push(tube);
    commands.entity(root).add_child(tube);

    for z in [-length * 0.45, length * 0.45] {
        let ring = spawn_visual(
            commands,
            meshes.add(Cylinder::new(radius, length * 0.12)),
            material.clone(),
            Transform::from_translation(Vec3::new(0.0, radius, z))
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        );
        visuals.push(ring);
        commands.entity(root).add_child(ring);
    }

    PartHandle { root, visuals }
}

/// Build a grip hanging below its mount, angled back for angled grips.
pub fn create_grip(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PartSpec,
    config: Option<&GripConfig>,
) -> PartHandle {
    let dims = spec.resolve(PartKind::Grip);
    let (w, h, d) = (dims.width, dims.height, dims.depth);

    let material = materials.add(part_material(Color::srgb(0.1, 0.1, 0.1), 0.2, 0.7));

    let root = commands
        .spawn((
            WeaponPart { kind: PartKind::Grip },
            Name::new("grip"),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();

    let tilt = if config.is_some_and(|c| c.id == "angled") {
        PI / 6.0
    } else {
        PI / 16.0
    };

    let body = spawn_visual(
        commands,
        meshes.add(Cuboid::new(w, h, d)),
        material,
        Transform::from_translation(Vec3::new(0.0, -h * 0.5, 0.0))
            .with_rotation(Quat::from_rotation_x(tilt)),
    );
    let visuals = vec![body];
    commands.entity(root).add_child(body);

    PartHandle { root, visuals }
}
