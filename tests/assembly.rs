//! Assembly pipeline tests against a real World: structure, swap
//! semantics, and uniform skin application.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use weapon_foundry::game::blueprint::{default_blueprint, WeaponBlueprint, WeaponSlot};
use weapon_foundry::game::parts::library::PartLibrary;
use weapon_foundry::game::parts::PartKind;
use weapon_foundry::game::weapon::assembler::{
    assemble_from_blueprint, swap_component, SwapRestore,
};
use weapon_foundry::game::weapon::{AssembledWeapon, MountPoint, ReceiverRoot, WeaponPart};

type AssemblyParams<'w, 's> = SystemState<(
    Commands<'w, 's>,
    ResMut<'w, Assets<Mesh>>,
    ResMut<'w, Assets<StandardMaterial>>,
)>;

fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(Assets::<Mesh>::default());
    world.insert_resource(Assets::<StandardMaterial>::default());
    world
}

fn assemble(world: &mut World, library: &PartLibrary, blueprint: &WeaponBlueprint) -> Entity {
    let mut state: AssemblyParams = SystemState::new(world);
    let (mut commands, mut meshes, mut materials) = state.get_mut(world);
    let root = assemble_from_blueprint(&mut commands, &mut meshes, &mut materials, library, blueprint);
    state.apply(world);
    root
}

fn descendants(world: &World, root: Entity) -> Vec<Entity> {
    let mut stack = vec![root];
    let mut out = Vec::new();
    while let Some(entity) = stack.pop() {
        if let Some(children) = world.get::<Children>(entity) {
            for child in children.iter() {
                out.push(child);
                stack.push(child);
            }
        }
    }
    out
}

fn part_kinds(world: &World, root: Entity) -> Vec<PartKind> {
    let mut kinds: Vec<PartKind> = descendants(world, root)
        .into_iter()
        .filter_map(|e| world.get::<WeaponPart>(e).map(|p| p.kind))
        .collect();
    kinds.sort_by_key(|k| format!("{k:?}"));
    kinds
}

#[test]
fn minimal_blueprint_assembles_receiver_plus_two_parts() {
    let library = PartLibrary::with_defaults();
    let blueprint = default_blueprint("ranger");
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    // exactly one receiver directly under the root
    let root_children: Vec<Entity> = world
        .get::<Children>(root)
        .map(|c| c.iter().collect())
        .unwrap_or_default();
    let receivers: Vec<Entity> = root_children
        .iter()
        .copied()
        .filter(|e| world.get::<ReceiverRoot>(*e).is_some())
        .collect();
    assert_eq!(receivers.len(), 1);

    // exactly barrel + magazine attached besides the receiver
    let kinds = part_kinds(&world, root);
    assert_eq!(kinds, vec![PartKind::Barrel, PartKind::Magazine, PartKind::Receiver]);

    // each attached part hangs under its slot's mount with a zeroed local transform
    for entity in descendants(&world, root) {
        let Some(part) = world.get::<WeaponPart>(entity) else {
            continue;
        };
        if part.kind == PartKind::Receiver {
            continue;
        }
        let parent = world.get::<ChildOf>(entity).expect("part detached").parent();
        let mount = world.get::<MountPoint>(parent).expect("part not on a mount");
        let expected = match part.kind {
            PartKind::Barrel => WeaponSlot::Barrel,
            PartKind::Magazine => WeaponSlot::Magazine,
            other => panic!("unexpected part {other:?}"),
        };
        assert_eq!(mount.slot, expected);
        let local = world.get::<Transform>(entity).unwrap();
        assert_eq!(local.translation, Vec3::ZERO);
        assert_eq!(local.rotation, Quat::IDENTITY);
    }
}

#[test]
fn assembly_is_structurally_idempotent() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint
        .set_component(WeaponSlot::Scope, "acog", &library)
        .unwrap();
    let mut world = test_world();

    let first = assemble(&mut world, &library, &blueprint);
    let second = assemble(&mut world, &library, &blueprint);

    assert_ne!(first, second);
    assert_eq!(part_kinds(&world, first), part_kinds(&world, second));
    assert_eq!(
        descendants(&world, first).len(),
        descendants(&world, second).len()
    );
}

#[test]
fn full_loadout_attaches_every_slot() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint.set_component(WeaponSlot::Stock, "heavy", &library).unwrap();
    blueprint.set_component(WeaponSlot::Scope, "holo", &library).unwrap();
    blueprint.set_component(WeaponSlot::Grip, "angled", &library).unwrap();
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    let kinds = part_kinds(&world, root);
    assert_eq!(
        kinds,
        vec![
            PartKind::Barrel,
            PartKind::Grip,
            PartKind::Magazine,
            PartKind::Receiver,
            PartKind::Scope,
            PartKind::Stock,
        ]
    );
}

#[test]
fn compact_receiver_drops_parts_without_mounts() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("compact");
    // stock configured, but the compact frame has no stock mount
    blueprint.set_component(WeaponSlot::Stock, "fixed", &library).unwrap();
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    let kinds = part_kinds(&world, root);
    assert_eq!(kinds, vec![PartKind::Barrel, PartKind::Magazine, PartKind::Receiver]);
}

#[test]
fn missing_receiver_yields_empty_root() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint.components.receiver = None;
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    assert!(world.get::<Children>(root).is_none());
    // metadata still present so a later swap can recover
    assert!(world.get::<AssembledWeapon>(root).is_some());
}

#[test]
fn swap_scope_disposes_old_tree_and_preserves_placement() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint.set_component(WeaponSlot::Scope, "red_dot", &library).unwrap();
    let mut world = test_world();

    let holder = world.spawn(Transform::IDENTITY).id();
    let old_root = assemble(&mut world, &library, &blueprint);
    let placement = Transform::from_translation(Vec3::new(0.3, -0.25, -0.6))
        .with_rotation(Quat::from_rotation_y(1.25))
        .with_scale(Vec3::splat(0.02));
    world.entity_mut(old_root).insert(placement);
    world.entity_mut(old_root).insert(ChildOf(holder));
    let old_entities = descendants(&world, old_root);

    let assembled = world.get::<AssembledWeapon>(old_root).cloned();
    let new_root = {
        let mut state: AssemblyParams = SystemState::new(&mut world);
        let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
        let root = swap_component(
            &mut commands,
            &mut meshes,
            &mut materials,
            &library,
            old_root,
            assembled.as_ref(),
            SwapRestore {
                transform: placement,
                parent: Some(holder),
            },
            WeaponSlot::Scope,
            "sniper_8x",
        );
        state.apply(&mut world);
        root
    };

    // the old subtree is gone entirely
    assert!(world.get_entity(old_root).is_err());
    for entity in old_entities {
        assert!(world.get_entity(entity).is_err(), "orphaned node {entity:?}");
    }

    // the swapped slot changed and nothing else did
    let assembled = world.get::<AssembledWeapon>(new_root).unwrap();
    assert_eq!(assembled.blueprint.component_id(WeaponSlot::Scope), Some("sniper_8x"));
    assert_eq!(assembled.blueprint.component_id(WeaponSlot::Barrel), Some("standard"));

    // placement restored bit-for-bit, parent preserved
    assert_eq!(*world.get::<Transform>(new_root).unwrap(), placement);
    assert_eq!(world.get::<ChildOf>(new_root).unwrap().parent(), holder);
}

#[test]
fn skin_applies_uniformly_to_every_mesh() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint.set_component(WeaponSlot::Scope, "acog", &library).unwrap();
    blueprint.skin = Some("flux".into());
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    let materials: Vec<_> = descendants(&world, root)
        .into_iter()
        .filter(|e| world.get::<Mesh3d>(*e).is_some())
        .filter_map(|e| world.get::<MeshMaterial3d<StandardMaterial>>(e).cloned())
        .collect();

    assert!(materials.len() >= 4, "expected meshes for every part");
    let first = &materials[0].0;
    assert!(
        materials.iter().all(|m| &m.0 == first),
        "skin was not applied uniformly"
    );
}

#[test]
fn unknown_style_still_assembles_via_default_profile() {
    let library = PartLibrary::with_defaults();
    let mut blueprint = default_blueprint("ranger");
    blueprint.base_model = "railgun_mk9".into();
    if let Some(receiver) = &mut blueprint.components.receiver {
        receiver.style = "railgun_mk9".into();
    }
    let mut world = test_world();

    let root = assemble(&mut world, &library, &blueprint);

    let kinds = part_kinds(&world, root);
    assert!(kinds.contains(&PartKind::Receiver));
    assert!(kinds.contains(&PartKind::Barrel));
}
