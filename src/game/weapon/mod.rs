pub mod assembler;
pub mod factory;
pub mod profile;

use bevy::prelude::*;

use crate::game::blueprint::stats::EffectiveStats;
use crate::game::blueprint::{WeaponBlueprint, WeaponSlot};
use crate::game::parts::PartKind;

/// Root of an assembled weapon. Carries the originating blueprint and the
/// folded stats so swaps and gameplay never rely on untyped node metadata.
#[derive(Component, Debug, Clone)]
pub struct AssembledWeapon {
    pub blueprint: WeaponBlueprint,
    pub effective: EffectiveStats,
}

/// A named attachment frame on a receiver. Established at receiver
/// creation time and never moved afterward.
#[derive(Component, Debug, Clone, Copy)]
pub struct MountPoint {
    pub slot: WeaponSlot,
}

/// Root entity of one built part subtree.
#[derive(Component, Debug, Clone, Copy)]
pub struct WeaponPart {
    pub kind: PartKind,
}

/// Marker on the receiver subtree root.
#[derive(Component)]
pub struct ReceiverRoot;

/// Marker for renderable weapon meshes (skin application targets).
#[derive(Component)]
pub struct WeaponVisual;

/// The one live weapon owned by a controller.
#[derive(Component, Debug, Clone, Copy)]
pub struct CurrentWeapon(pub Entity);
