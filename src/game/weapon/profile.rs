use bevy::prelude::*;

use crate::game::blueprint::WeaponSlot;

/// Style id used when a blueprint references an unknown receiver style.
pub const DEFAULT_STYLE: &str = "ranger";

/// Mount frame definition: offsets are fractions of the receiver's
/// resolved (width, height, length), so style data stays dimension-free.
#[derive(Debug, Clone, Copy)]
pub struct MountDef {
    pub slot: WeaponSlot,
    pub offset: [f32; 3],
}

/// Per-style receiver construction data. Weapons are built muzzle-forward
/// along -Z: barrel mounts sit at negative Z, stocks at positive Z.
#[derive(Debug, Clone, Copy)]
pub struct ReceiverProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Bare receiver tint (linear RGB) before any skin is applied.
    pub tint: [f32; 3],
    /// Height fraction of the top rail block; 0 = no rail.
    pub rail: f32,
    pub mounts: &'static [MountDef],
}

const RANGER_MOUNTS: &[MountDef] = &[
    MountDef { slot: WeaponSlot::Barrel, offset: [0.0, 0.17, -0.5] },
    MountDef { slot: WeaponSlot::Stock, offset: [0.0, 0.0, 0.5] },
    MountDef { slot: WeaponSlot::Magazine, offset: [0.0, -0.5, -0.1] },
    MountDef { slot: WeaponSlot::Scope, offset: [0.0, 0.55, 0.05] },
    MountDef { slot: WeaponSlot::Grip, offset: [0.0, -0.5, -0.3] },
];

const SPECTRE_MOUNTS: &[MountDef] = &[
    MountDef { slot: WeaponSlot::Barrel, offset: [0.0, 0.25, -0.45] },
    MountDef { slot: WeaponSlot::Stock, offset: [0.0, 0.08, 0.5] },
    MountDef { slot: WeaponSlot::Magazine, offset: [0.0, -0.5, -0.15] },
    MountDef { slot: WeaponSlot::Scope, offset: [0.0, 0.5, 0.0] },
    MountDef { slot: WeaponSlot::Grip, offset: [0.0, -0.5, -0.25] },
];

/// Pistol frame: barrel and magazine only.
const COMPACT_MOUNTS: &[MountDef] = &[
    MountDef { slot: WeaponSlot::Barrel, offset: [0.0, 0.25, -0.4] },
    MountDef { slot: WeaponSlot::Magazine, offset: [0.0, -0.5, 0.2] },
];

pub const PROFILES: &[ReceiverProfile] = &[
    ReceiverProfile {
        id: "ranger",
        display_name: "Ranger",
        tint: [0.15, 0.15, 0.18],
        rail: 0.18,
        mounts: RANGER_MOUNTS,
    },
    ReceiverProfile {
        id: "spectre",
        display_name: "Spectre",
        tint: [0.2, 0.25, 0.2],
        rail: 0.22,
        mounts: SPECTRE_MOUNTS,
    },
    ReceiverProfile {
        id: "compact",
        display_name: "Compact",
        tint: [0.1, 0.1, 0.1],
        rail: 0.0,
        mounts: COMPACT_MOUNTS,
    },
];

impl ReceiverProfile {
    /// Resolve a style id. Unknown styles fall back to the default style
    /// rather than erroring.
    pub fn for_style(style: &str) -> &'static ReceiverProfile {
        if let Some(profile) = PROFILES.iter().find(|p| p.id == style) {
            return profile;
        }
        warn!("Unknown receiver style '{style}', falling back to '{DEFAULT_STYLE}'");
        PROFILES
            .iter()
            .find(|p| p.id == DEFAULT_STYLE)
            .expect("default receiver profile missing")
    }

    pub fn mount_offset(&self, slot: WeaponSlot) -> Option<[f32; 3]> {
        self.mounts.iter().find(|m| m.slot == slot).map(|m| m.offset)
    }

    pub fn style_ids() -> Vec<&'static str> {
        PROFILES.iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_mounts_barrel_and_magazine() {
        for profile in PROFILES {
            assert!(
                profile.mount_offset(WeaponSlot::Barrel).is_some(),
                "{} lacks a barrel mount",
                profile.id
            );
            assert!(
                profile.mount_offset(WeaponSlot::Magazine).is_some(),
                "{} lacks a magazine mount",
                profile.id
            );
        }
    }

    #[test]
    fn compact_omits_optional_mounts() {
        let compact = ReceiverProfile::for_style("compact");
        assert!(compact.mount_offset(WeaponSlot::Stock).is_none());
        assert!(compact.mount_offset(WeaponSlot::Scope).is_none());
        assert!(compact.mount_offset(WeaponSlot::Grip).is_none());
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        let profile = ReceiverProfile::for_style("plasma_cannon");
        assert_eq!(profile.id, DEFAULT_STYLE);
    }
}
