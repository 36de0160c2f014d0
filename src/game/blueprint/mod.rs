pub mod stats;
pub mod validator;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use self::stats::WeaponStats;
use crate::game::parts::configs::{
    BarrelConfig, GripConfig, MagazineConfig, ScopeConfig, StockConfig,
};
use crate::game::parts::library::PartLibrary;
use crate::game::parts::PartSpec;

/// Weapon category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Rifle,
    Smg,
    Pistol,
    Sniper,
    Shotgun,
}

impl WeaponType {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rifle => "Rifle",
            Self::Smg => "SMG",
            Self::Pistol => "Pistol",
            Self::Sniper => "Sniper",
            Self::Shotgun => "Shotgun",
        }
    }
}

/// The five attachment slots on a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponSlot {
    Barrel,
    Stock,
    Magazine,
    Scope,
    Grip,
}

impl WeaponSlot {
    pub const ALL: [WeaponSlot; 5] = [
        WeaponSlot::Barrel,
        WeaponSlot::Stock,
        WeaponSlot::Magazine,
        WeaponSlot::Scope,
        WeaponSlot::Grip,
    ];

    /// Fixed mount-point naming convention on receiver roots.
    pub fn mount_name(self) -> &'static str {
        match self {
            Self::Barrel => "mount_barrel",
            Self::Stock => "mount_stock",
            Self::Magazine => "mount_magazine",
            Self::Scope => "mount_scope",
            Self::Grip => "mount_grip",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Barrel => "Barrel",
            Self::Stock => "Stock",
            Self::Magazine => "Magazine",
            Self::Scope => "Scope",
            Self::Grip => "Grip",
        }
    }

    /// Barrel and magazine are required by every blueprint.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Barrel | Self::Magazine)
    }
}

/// Receiver entry: which style profile to build from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    pub style: String,
    /// Optional tint override for the bare receiver material.
    pub color: Option<[f32; 3]>,
}

/// Component configuration map. Receiver, barrel and magazine are required
/// for a valid blueprint; the validator is the gate, so missing entries are
/// representable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponComponents {
    pub receiver: Option<ReceiverConfig>,
    pub barrel: Option<BarrelConfig>,
    pub stock: Option<StockConfig>,
    pub magazine: Option<MagazineConfig>,
    pub scope: Option<ScopeConfig>,
    pub grip: Option<GripConfig>,
}

/// Optional dimensional overrides per slot, consumed by the factory.
/// Anything left empty falls back to the per-kind library defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpecs {
    #[serde(default)]
    pub receiver: PartSpec,
    #[serde(default)]
    pub barrel: PartSpec,
    #[serde(default)]
    pub stock: PartSpec,
    #[serde(default)]
    pub magazine: PartSpec,
    #[serde(default)]
    pub scope: PartSpec,
    #[serde(default)]
    pub grip: PartSpec,
}

/// A complete weapon blueprint: the aggregate root the foundry edits,
/// the validator gates, and the assembler consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponBlueprint {
    pub id: String,
    pub name: String,
    pub author: String,
    pub weapon_type: WeaponType,
    /// Receiver style id. Unknown ids fall back to the default style.
    pub base_model: String,
    pub components: WeaponComponents,
    #[serde(default)]
    pub specs: ComponentSpecs,
    pub stats: WeaponStats,
    /// Skin id resolved through the part library. None = bare materials.
    pub skin: Option<String>,
    /// Uniform scale applied to the assembled root. None = no scaling.
    pub scale: Option<f32>,
    /// Unix seconds.
    pub created_at: i64,
    /// Semantic version, e.g. "1.0.0".
    pub version: String,
}

impl WeaponBlueprint {
    /// Replace exactly one component slot with a library part.
    /// Everything else in the blueprint is left untouched.
    pub fn set_component(
        &mut self,
        slot: WeaponSlot,
        part_id: &str,
        library: &PartLibrary,
    ) -> Result<(), String> {
        match slot {
            WeaponSlot::Barrel => {
                let config = library
                    .barrel(part_id)
                    .ok_or_else(|| format!("unknown barrel '{part_id}'"))?;
                self.components.barrel = Some(config.clone());
            }
            WeaponSlot::Stock => {
                let config = library
                    .stock(part_id)
                    .ok_or_else(|| format!("unknown stock '{part_id}'"))?;
                self.components.stock = Some(config.clone());
            }
            WeaponSlot::Magazine => {
                let config = library
                    .magazine(part_id)
                    .ok_or_else(|| format!("unknown magazine '{part_id}'"))?;
                self.components.magazine = Some(config.clone());
            }
            WeaponSlot::Scope => {
                let config = library
                    .scope(part_id)
                    .ok_or_else(|| format!("unknown scope '{part_id}'"))?;
                self.components.scope = Some(config.clone());
            }
            WeaponSlot::Grip => {
                let config = library
                    .grip(part_id)
                    .ok_or_else(|| format!("unknown grip '{part_id}'"))?;
                self.components.grip = Some(config.clone());
            }
        }
        Ok(())
    }

    /// Empty a slot. The validator rejects blueprints missing required slots.
    pub fn clear_component(&mut self, slot: WeaponSlot) {
        match slot {
            WeaponSlot::Barrel => self.components.barrel = None,
            WeaponSlot::Stock => self.components.stock = None,
            WeaponSlot::Magazine => self.components.magazine = None,
            WeaponSlot::Scope => self.components.scope = None,
            WeaponSlot::Grip => self.components.grip = None,
        }
    }

    /// Id of the part currently filling a slot, if any.
    pub fn component_id(&self, slot: WeaponSlot) -> Option<&str> {
        match slot {
            WeaponSlot::Barrel => self.components.barrel.as_ref().map(|c| c.id.as_str()),
            WeaponSlot::Stock => self.components.stock.as_ref().map(|c| c.id.as_str()),
            WeaponSlot::Magazine => self.components.magazine.as_ref().map(|c| c.id.as_str()),
            WeaponSlot::Scope => self.components.scope.as_ref().map(|c| c.id.as_str()),
            WeaponSlot::Grip => self.components.grip.as_ref().map(|c| c.id.as_str()),
        }
    }
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Build a fresh blueprint with sensible defaults for a receiver style.
/// This is the one canonical default; the assembler's swap fallback and the
/// foundry's "new blueprint" both go through here.
pub fn default_blueprint(base_model: &str) -> WeaponBlueprint {
    let (weapon_type, magazine_id) = match base_model {
        "compact" => (WeaponType::Pistol, "pistol_12"),
        _ => (WeaponType::Rifle, "standard_25"),
    };

    let library = PartLibrary::with_defaults();
    let magazine = library.magazine(magazine_id).cloned();
    let barrel = library.barrel("standard").cloned();

    let mut name = base_model.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    WeaponBlueprint {
        id: format!("custom_{}", Uuid::new_v4().simple()),
        name: format!("Custom {name}"),
        author: "local".into(),
        weapon_type,
        base_model: base_model.to_string(),
        components: WeaponComponents {
            receiver: Some(ReceiverConfig {
                style: base_model.to_string(),
                color: None,
            }),
            barrel,
            stock: None,
            magazine,
            scope: None,
            grip: None,
        },
        specs: ComponentSpecs::default(),
        stats: WeaponStats::for_style(base_model),
        skin: None,
        scale: None,
        created_at: unix_now(),
        version: "1.0.0".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blueprint_has_required_components() {
        let bp = default_blueprint("ranger");
        assert!(bp.components.receiver.is_some());
        assert!(bp.components.barrel.is_some());
        assert!(bp.components.magazine.is_some());
        assert!(bp.components.stock.is_none());
        assert_eq!(bp.weapon_type, WeaponType::Rifle);
    }

    #[test]
    fn compact_defaults_to_pistol() {
        let bp = default_blueprint("compact");
        assert_eq!(bp.weapon_type, WeaponType::Pistol);
        assert_eq!(bp.component_id(WeaponSlot::Magazine), Some("pistol_12"));
    }

    #[test]
    fn set_component_touches_only_the_named_slot() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        let before = bp.clone();

        bp.set_component(WeaponSlot::Scope, "sniper_8x", &lib).unwrap();

        assert_eq!(bp.component_id(WeaponSlot::Scope), Some("sniper_8x"));
        assert_eq!(bp.components.barrel, before.components.barrel);
        assert_eq!(bp.components.magazine, before.components.magazine);
        assert_eq!(bp.stats, before.stats);
    }

    #[test]
    fn set_component_rejects_unknown_parts() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        let err = bp.set_component(WeaponSlot::Grip, "bipod", &lib).unwrap_err();
        assert!(err.contains("bipod"));
        assert!(bp.components.grip.is_none());
    }

    #[test]
    fn blueprint_json_round_trip() {
        let bp = default_blueprint("spectre");
        let json = serde_json::to_string(&bp).unwrap();
        let back: WeaponBlueprint = serde_json::from_str(&json).unwrap();
        assert_eq!(bp, back);
    }
}
