use serde::{Deserialize, Serialize};

/// Barrel modifier record: length drives geometry, the modifiers drive stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrelConfig {
    pub id: String,
    pub name: String,
    /// Relative barrel length (1.0 = standard).
    pub length: f32,
    /// Multiplier for effective range.
    pub range_modifier: f32,
    /// Multiplier for bullet velocity.
    pub velocity_modifier: f32,
}

impl Default for BarrelConfig {
    fn default() -> Self {
        Self {
            id: "standard".into(),
            name: "Standard Barrel".into(),
            length: 1.0,
            range_modifier: 1.0,
            velocity_modifier: 1.0,
        }
    }
}

/// Stock modifier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    pub id: String,
    pub name: String,
    /// Fraction of recoil removed (0.15 = 15%).
    pub recoil_reduction: f32,
    /// Aim stability bonus fraction.
    pub aim_stability: f32,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            id: "fixed".into(),
            name: "Fixed Stock".into(),
            recoil_reduction: 0.15,
            aim_stability: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagazineStyle {
    Straight,
    Curved,
    Drum,
}

/// Magazine modifier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagazineConfig {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    /// Reload speed multiplier (above 1.0 = faster).
    pub reload_speed: f32,
    pub style: MagazineStyle,
}

impl Default for MagazineConfig {
    fn default() -> Self {
        Self {
            id: "standard_25".into(),
            name: "Standard 25".into(),
            capacity: 25,
            reload_speed: 1.0,
            style: MagazineStyle::Straight,
        }
    }
}

/// Scope modifier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub id: String,
    pub name: String,
    pub magnification: f32,
    /// ADS speed multiplier (below 1.0 = slower aim).
    pub ads_speed: f32,
    pub clarity: f32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            id: "red_dot".into(),
            name: "Red Dot".into(),
            magnification: 1.0,
            ads_speed: 0.9,
            clarity: 1.0,
        }
    }
}

/// Grip modifier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GripConfig {
    pub id: String,
    pub name: String,
    pub recoil_reduction: f32,
    /// Movement speed multiplier while aiming.
    pub ads_movement: f32,
}

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            id: "vertical".into(),
            name: "Vertical Grip".into(),
            recoil_reduction: 0.10,
            ads_movement: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinFinish {
    Solid,
    Gradient,
    Pattern,
}

/// Skin record: applied uniformly to the whole assembled weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinConfig {
    pub id: String,
    pub name: String,
    pub finish: SkinFinish,
    /// Linear RGB.
    pub primary: [f32; 3],
    pub secondary: Option<[f32; 3]>,
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: Option<[f32; 3]>,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            id: "default".into(),
            name: "Default".into(),
            finish: SkinFinish::Solid,
            primary: [0.16, 0.16, 0.16],
            secondary: None,
            metallic: 0.3,
            roughness: 0.7,
            emissive: None,
        }
    }
}
