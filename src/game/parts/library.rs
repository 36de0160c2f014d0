use std::collections::HashMap;

use bevy::prelude::*;

use super::configs::{
    BarrelConfig, GripConfig, MagazineConfig, MagazineStyle, ScopeConfig, SkinConfig, SkinFinish,
    StockConfig,
};

/// Registry of all attachable parts and skins, indexed by ID.
/// Static game-balance data, never mutated at runtime.
#[derive(Resource, Default)]
pub struct PartLibrary {
    pub barrels: HashMap<String, BarrelConfig>,
    pub stocks: HashMap<String, StockConfig>,
    pub magazines: HashMap<String, MagazineConfig>,
    pub scopes: HashMap<String, ScopeConfig>,
    pub grips: HashMap<String, GripConfig>,
    pub skins: HashMap<String, SkinConfig>,
}

impl PartLibrary {
    /// Populate with the stock part catalog.
    pub fn with_defaults() -> Self {
        let mut lib = Self::default();

        // ── Barrels ────────────────────────────────────────────────
        lib.barrels.insert("standard".into(), BarrelConfig::default());
        lib.barrels.insert(
            "long".into(),
            BarrelConfig {
                id: "long".into(),
                name: "Long Barrel".into(),
                length: 1.3,
                range_modifier: 1.2,
                velocity_modifier: 1.1,
            },
        );
        lib.barrels.insert(
            "short".into(),
            BarrelConfig {
                id: "short".into(),
                name: "Short Barrel".into(),
                length: 0.7,
                range_modifier: 0.85,
                velocity_modifier: 0.95,
            },
        );
        lib.barrels.insert(
            "silenced".into(),
            BarrelConfig {
                id: "silenced".into(),
                name: "Silenced Barrel".into(),
                length: 1.2,
                range_modifier: 0.95,
                velocity_modifier: 0.98,
            },
        );

        // ── Stocks ─────────────────────────────────────────────────
        lib.stocks.insert("fixed".into(), StockConfig::default());
        lib.stocks.insert(
            "collapsible".into(),
            StockConfig {
                id: "collapsible".into(),
                name: "Collapsible Stock".into(),
                recoil_reduction: 0.10,
                aim_stability: 0.05,
            },
        );
        lib.stocks.insert(
            "heavy".into(),
            StockConfig {
                id: "heavy".into(),
                name: "Heavy Stock".into(),
                recoil_reduction: 0.25,
                aim_stability: 0.20,
            },
        );

        // ── Magazines ──────────────────────────────────────────────
        lib.magazines.insert("standard_25".into(), MagazineConfig::default());
        lib.magazines.insert(
            "extended_30".into(),
            MagazineConfig {
                id: "extended_30".into(),
                name: "Extended 30".into(),
                capacity: 30,
                reload_speed: 0.95,
                style: MagazineStyle::Straight,
            },
        );
        lib.magazines.insert(
            "drum_50".into(),
            MagazineConfig {
                id: "drum_50".into(),
                name: "Drum 50".into(),
                capacity: 50,
                reload_speed: 0.75,
                style: MagazineStyle::Drum,
            },
        );
        lib.magazines.insert(
            "curved_30".into(),
            MagazineConfig {
                id: "curved_30".into(),
                name: "Curved 30".into(),
                capacity: 30,
                reload_speed: 1.0,
                style: MagazineStyle::Curved,
            },
        );
        lib.magazines.insert(
            "pistol_12".into(),
            MagazineConfig {
                id: "pistol_12".into(),
                name: "Pistol 12".into(),
                capacity: 12,
                reload_speed: 1.1,
                style: MagazineStyle::Straight,
            },
        );

        // ── Scopes ─────────────────────────────────────────────────
        lib.scopes.insert("red_dot".into(), ScopeConfig::default());
        lib.scopes.insert(
            "holo".into(),
            ScopeConfig {
                id: "holo".into(),
                name: "Holo Sight".into(),
                magnification: 1.5,
                ads_speed: 0.85,
                clarity: 0.95,
            },
        );
        lib.scopes.insert(
            "acog".into(),
            ScopeConfig {
                id: "acog".into(),
                name: "ACOG 4x".into(),
                magnification: 4.0,
                ads_speed: 0.65,
                clarity: 0.9,
            },
        );
        lib.scopes.insert(
            "sniper_8x".into(),
            ScopeConfig {
                id: "sniper_8x".into(),
                name: "Sniper 8x".into(),
                magnification: 8.0,
                ads_speed: 0.5,
                clarity: 1.0,
            },
        );

        // ── Grips ──────────────────────────────────────────────────
        lib.grips.insert("vertical".into(), GripConfig::default());
        lib.grips.insert(
            "angled".into(),
            GripConfig {
                id: "angled".into(),
                name: "Angled Grip".into(),
                recoil_reduction: 0.15,
                ads_movement: 0.92,
            },
        );
        lib.grips.insert(
            "stub".into(),
            GripConfig {
                id: "stub".into(),
                name: "Stub Grip".into(),
                recoil_reduction: 0.05,
                ads_movement: 0.98,
            },
        );

        // ── Skins ──────────────────────────────────────────────────
        lib.skins.insert("default".into(), SkinConfig::default());
        lib.skins.insert(
            "flux".into(),
            SkinConfig {
                id: "flux".into(),
                name: "Flux".into(),
                finish: SkinFinish::Gradient,
                primary: [0.0, 0.6, 1.0],
                secondary: Some([0.0, 1.0, 0.8]),
                metallic: 0.8,
                roughness: 0.2,
                emissive: Some([0.0, 0.33, 0.67]),
            },
        );
        lib.skins.insert(
            "gaia".into(),
            SkinConfig {
                id: "gaia".into(),
                name: "Gaia".into(),
                finish: SkinFinish::Solid,
                primary: [0.29, 0.21, 0.13],
                secondary: None,
                metallic: 0.1,
                roughness: 0.9,
                emissive: None,
            },
        );
        lib.skins.insert(
            "voxel".into(),
            SkinConfig {
                id: "voxel".into(),
                name: "Voxel".into(),
                finish: SkinFinish::Pattern,
                primary: [1.0, 0.0, 1.0],
                secondary: Some([0.0, 1.0, 1.0]),
                metallic: 0.5,
                roughness: 0.5,
                emissive: None,
            },
        );
        lib.skins.insert(
            "zebra".into(),
            SkinConfig {
                id: "zebra".into(),
                name: "Zebra".into(),
                finish: SkinFinish::Pattern,
                primary: [0.0, 0.0, 0.0],
                secondary: Some([1.0, 1.0, 1.0]),
                metallic: 0.0,
                roughness: 0.8,
                emissive: None,
            },
        );
        lib.skins.insert(
            "slash".into(),
            SkinConfig {
                id: "slash".into(),
                name: "Slash".into(),
                finish: SkinFinish::Pattern,
                primary: [1.0, 0.0, 0.0],
                secondary: Some([0.0, 0.0, 0.0]),
                metallic: 0.4,
                roughness: 0.6,
                emissive: None,
            },
        );

        lib
    }

    pub fn barrel(&self, id: &str) -> Option<&BarrelConfig> {
        self.barrels.get(id)
    }

    pub fn stock(&self, id: &str) -> Option<&StockConfig> {
        self.stocks.get(id)
    }

    pub fn magazine(&self, id: &str) -> Option<&MagazineConfig> {
        self.magazines.get(id)
    }

    pub fn scope(&self, id: &str) -> Option<&ScopeConfig> {
        self.scopes.get(id)
    }

    pub fn grip(&self, id: &str) -> Option<&GripConfig> {
        self.grips.get(id)
    }

    pub fn skin(&self, id: &str) -> Option<&SkinConfig> {
        self.skins.get(id)
    }

    /// Sorted IDs for one table, for stable editor cycling.
    pub fn barrel_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.barrels.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn stock_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.stocks.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn magazine_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.magazines.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn scope_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.scopes.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn grip_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.grips.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn skin_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.skins.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_all_tables() {
        let lib = PartLibrary::with_defaults();
        assert_eq!(lib.barrels.len(), 4);
        assert_eq!(lib.stocks.len(), 3);
        assert_eq!(lib.magazines.len(), 5);
        assert_eq!(lib.scopes.len(), 4);
        assert_eq!(lib.grips.len(), 3);
        assert_eq!(lib.skins.len(), 6);
    }

    #[test]
    fn lookup_by_id() {
        let lib = PartLibrary::with_defaults();
        let sniper = lib.scope("sniper_8x").unwrap();
        assert_eq!(sniper.magnification, 8.0);
        assert_eq!(sniper.ads_speed, 0.5);

        let drum = lib.magazine("drum_50").unwrap();
        assert_eq!(drum.capacity, 50);
        assert_eq!(drum.style, MagazineStyle::Drum);
    }

    #[test]
    fn unknown_id_returns_none() {
        let lib = PartLibrary::with_defaults();
        assert!(lib.barrel("railgun").is_none());
        assert!(lib.skin("missing").is_none());
    }
}
