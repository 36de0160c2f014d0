use bevy::prelude::*;

use super::factory::{self, PartHandle};
use super::AssembledWeapon;
use crate::game::blueprint::stats::EffectiveStats;
use crate::game::blueprint::{default_blueprint, WeaponBlueprint, WeaponSlot};
use crate::game::parts::configs::{SkinConfig, SkinFinish};
use crate::game::parts::library::PartLibrary;
use crate::game::weapon::profile::DEFAULT_STYLE;

/// Assemble a weapon entity tree from a blueprint.
///
/// The receiver is always built first; every later mount lookup depends on
/// it. Parts whose slot is absent from the blueprint are skipped; a present
/// part whose mount is missing on the receiver style is dropped with a log
/// instead of failing the assembly — the validator, not the assembler, is
/// the gate for malformed blueprints.
pub fn assemble_from_blueprint(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    library: &PartLibrary,
    blueprint: &WeaponBlueprint,
) -> Entity {
    let scale = blueprint.scale.unwrap_or(1.0);
    let root = commands
        .spawn((
            Name::new(format!("{}_root", blueprint.id)),
            Transform::from_scale(Vec3::splat(scale)),
            Visibility::default(),
            AssembledWeapon {
                blueprint: blueprint.clone(),
                effective: EffectiveStats::compute(blueprint),
            },
        ))
        .id();

    let Some(receiver_config) = &blueprint.components.receiver else {
        error!(
            "Blueprint '{}' has no receiver; returning an empty root",
            blueprint.id
        );
        return root;
    };

    let receiver = factory::create_receiver(
        commands,
        meshes,
        materials,
        &blueprint.specs.receiver,
        &receiver_config.style,
        receiver_config.color,
    );
    commands.entity(root).add_child(receiver.root);

    let mut skin_targets = receiver.visuals.clone();

    for slot in WeaponSlot::ALL {
        let part = build_part(commands, meshes, materials, blueprint, slot);
        let Some(part) = part else {
            debug!("Slot {:?} empty on blueprint '{}'", slot, blueprint.id);
            continue;
        };

        match receiver.mount(slot) {
            Some(mount) => {
                // parenting with an identity transform zeroes the local offset
                commands.entity(mount).add_child(part.root);
                skin_targets.extend(part.visuals);
            }
            None => {
                if slot.is_required() {
                    warn!(
                        "Receiver style '{}' is missing {}; skipping attachment",
                        receiver_config.style,
                        slot.mount_name()
                    );
                } else {
                    debug!(
                        "Receiver style '{}' has no {}, skipping",
                        receiver_config.style,
                        slot.mount_name()
                    );
                }
                commands.entity(part.root).despawn();
            }
        }
    }

    if let Some(skin_id) = &blueprint.skin {
        match library.skin(skin_id) {
            Some(skin) => {
                let handle = materials.add(skin_material(skin));
                for visual in &skin_targets {
                    commands.entity(*visual).insert(MeshMaterial3d(handle.clone()));
                }
            }
            None => warn!("Unknown skin '{skin_id}' on blueprint '{}'", blueprint.id),
        }
    }

    info!(
        "Assembled '{}' ({} style)",
        blueprint.name, receiver_config.style
    );
    root
}

fn build_part(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    blueprint: &WeaponBlueprint,
    slot: WeaponSlot,
) -> Option<PartHandle> {
    let c = &blueprint.components;
    let specs = &blueprint.specs;
    match slot {
        WeaponSlot::Barrel => c.barrel.as_ref().map(|config| {
            factory::create_barrel(commands, meshes, materials, &specs.barrel, Some(config))
        }),
        WeaponSlot::Stock => c.stock.as_ref().map(|config| {
            factory::create_stock(commands, meshes, materials, &specs.stock, Some(config))
        }),
        WeaponSlot::Magazine => c.magazine.as_ref().map(|config| {
            factory::create_magazine(commands, meshes, materials, &specs.magazine, Some(config))
        }),
        WeaponSlot::Scope => c.scope.as_ref().map(|config| {
            factory::create_scope(commands, meshes, materials, &specs.scope, Some(config))
        }),
        WeaponSlot::Grip => c.grip.as_ref().map(|config| {
            factory::create_grip(commands, meshes, materials, &specs.grip, Some(config))
        }),
    }
}

/// Skins are whole-weapon materials. Gradient and pattern finishes render
/// as a flat blend of the two colors; texture synthesis is a content
/// concern, not carried here.
fn skin_material(skin: &SkinConfig) -> StandardMaterial {
    let primary = skin.primary;
    let base = match (skin.finish, skin.secondary) {
        (SkinFinish::Solid, _) | (_, None) => primary,
        (_, Some(secondary)) => [
            (primary[0] + secondary[0]) * 0.5,
            (primary[1] + secondary[1]) * 0.5,
            (primary[2] + secondary[2]) * 0.5,
        ],
    };

    let mut material = StandardMaterial {
        base_color: Color::srgb(base[0], base[1], base[2]),
        metallic: skin.metallic,
        perceptual_roughness: skin.roughness,
        ..default()
    };
    if let Some([r, g, b]) = skin.emissive {
        material.emissive = LinearRgba::rgb(r, g, b);
    }
    material
}

/// State captured from the outgoing weapon and restored onto the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapRestore {
    pub transform: Transform,
    pub parent: Option<Entity>,
}

/// Blueprint recovered from the old root's metadata, or the canonical
/// default when the metadata is gone.
fn stored_blueprint(current: Option<&AssembledWeapon>) -> WeaponBlueprint {
    match current {
        Some(assembled) => assembled.blueprint.clone(),
        None => {
            warn!("Weapon root has no blueprint metadata; rebuilding from defaults");
            default_blueprint(DEFAULT_STYLE)
        }
    }
}

/// Destroy-and-rebuild core shared by every swap flavor: dispose the old
/// subtree, assemble the edited blueprint, restore placement and parent.
fn rebuild(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    library: &PartLibrary,
    current_root: Entity,
    restore: SwapRestore,
    blueprint: &WeaponBlueprint,
) -> Entity {
    commands.entity(current_root).despawn();

    let new_root = assemble_from_blueprint(commands, meshes, materials, library, blueprint);
    commands.entity(new_root).insert(restore.transform);
    if let Some(parent) = restore.parent {
        commands.entity(new_root).insert(ChildOf(parent));
    }
    new_root
}

/// Hot-swap one component slot.
///
/// Mount geometry is baked into the meshes at build time, so the whole
/// subtree is disposed and reassembled from the stored blueprint with
/// exactly one slot changed; world position, rotation and parent carry
/// over from the old root.
pub fn swap_component(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    library: &PartLibrary,
    current_root: Entity,
    current: Option<&AssembledWeapon>,
    restore: SwapRestore,
    slot: WeaponSlot,
    part_id: &str,
) -> Entity {
    let mut blueprint = stored_blueprint(current);
    if let Err(e) = blueprint.set_component(slot, part_id, library) {
        warn!("Component swap rejected: {e}; rebuilding unchanged");
    }
    rebuild(commands, meshes, materials, library, current_root, restore, &blueprint)
}

/// Remove a part from its slot; same rebuild strategy. The mount point is
/// left empty on the new receiver.
pub fn remove_component(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    library: &PartLibrary,
    current_root: Entity,
    current: Option<&AssembledWeapon>,
    restore: SwapRestore,
    slot: WeaponSlot,
) -> Entity {
    let mut blueprint = stored_blueprint(current);
    blueprint.clear_component(slot);
    rebuild(commands, meshes, materials, library, current_root, restore, &blueprint)
}

/// Swap the skin rather than a part slot; same rebuild strategy.
pub fn swap_skin(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    library: &PartLibrary,
    current_root: Entity,
    current: Option<&AssembledWeapon>,
    restore: SwapRestore,
    skin_id: Option<&str>,
) -> Entity {
    let mut blueprint = stored_blueprint(current);
    blueprint.skin = skin_id.map(str::to_string);
    rebuild(commands, meshes, materials, library, current_root, restore, &blueprint)
}
