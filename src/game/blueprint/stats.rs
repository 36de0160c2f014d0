use serde::{Deserialize, Serialize};

use super::WeaponBlueprint;

/// Base weapon statistics as authored in a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage per shot.
    pub damage: f32,
    /// Rounds per minute.
    pub fire_rate: f32,
    /// Effective range in meters.
    pub range: f32,
    pub first_shot_spread: f32,
    pub hipfire_spread: f32,
    /// Per-shot view kick offsets, consumed in order while firing.
    pub recoil_pattern: Vec<[f32; 2]>,
    /// Recovery speed back to rest (0.1 - 1.0).
    pub recoil_recovery: f32,
    /// Wall penetration power (0 - 100).
    pub penetration: f32,
    /// Armor damage multiplier.
    pub armor_piercing: f32,
    pub magazine_size: u32,
    pub reserve_ammo: u32,
    /// Seconds to reload.
    pub reload_time: f32,
    /// Movement speed multiplier.
    pub movement_speed: f32,
    /// Seconds to aim down sights.
    pub ads_speed: f32,
}

impl WeaponStats {
    /// Base stats for a receiver style. Unknown styles get the rifle line.
    pub fn for_style(style: &str) -> Self {
        let (damage, fire_rate, range, magazine_size, reserve_ammo) = match style {
            "spectre" => (35.0, 660.0, 40.0, 30, 120),
            "compact" => (35.0, 400.0, 30.0, 12, 48),
            _ => (40.0, 600.0, 50.0, 25, 100),
        };
        Self {
            damage,
            fire_rate,
            range,
            first_shot_spread: 0.1,
            hipfire_spread: 1.0,
            recoil_pattern: vec![[0.0, 1.0], [0.5, 2.0], [-0.5, 2.5]],
            recoil_recovery: 0.5,
            penetration: 50.0,
            armor_piercing: 1.0,
            magazine_size,
            reserve_ammo,
            reload_time: 2.5,
            movement_speed: 0.9,
            ads_speed: 0.4,
        }
    }
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self::for_style("ranger")
    }
}

/// Stats after folding in the modifiers of every attached component.
/// Recomputed from the blueprint whenever a component changes; read by the
/// controller during play.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStats {
    pub damage: f32,
    pub fire_rate: f32,
    pub range: f32,
    pub first_shot_spread: f32,
    pub hipfire_spread: f32,
    pub recoil_scale: f32,
    pub magazine_size: u32,
    pub reserve_ammo: u32,
    pub reload_time: f32,
    pub ads_time: f32,
    pub movement_speed: f32,
    pub ads_movement: f32,
    pub magnification: f32,
    pub penetration: f32,
    pub armor_piercing: f32,
}

impl EffectiveStats {
    /// Fold component modifiers into the blueprint's base stats.
    ///
    /// Recoil reductions from stock and grip stack multiplicatively; the
    /// magazine overrides capacity and scales reload time (reload_speed
    /// above 1.0 means faster, so time divides by it).
    pub fn compute(blueprint: &WeaponBlueprint) -> Self {
        let stats = &blueprint.stats;
        let c = &blueprint.components;

        let mut range = stats.range;
        if let Some(barrel) = &c.barrel {
            range *= barrel.range_modifier;
        }

        let mut recoil_scale = 1.0;
        let mut first_shot_spread = stats.first_shot_spread;
        if let Some(stock) = &c.stock {
            recoil_scale *= 1.0 - stock.recoil_reduction;
            first_shot_spread *= 1.0 - stock.aim_stability;
        }
        if let Some(grip) = &c.grip {
            recoil_scale *= 1.0 - grip.recoil_reduction;
        }
        recoil_scale = recoil_scale.max(0.0);

        let mut magazine_size = stats.magazine_size;
        let mut reload_time = stats.reload_time;
        if let Some(magazine) = &c.magazine {
            magazine_size = magazine.capacity;
            if magazine.reload_speed > 0.0 {
                reload_time /= magazine.reload_speed;
            }
        }

        let mut ads_time = stats.ads_speed;
        let mut magnification = 1.0;
        if let Some(scope) = &c.scope {
            magnification = scope.magnification;
            if scope.ads_speed > 0.0 {
                ads_time /= scope.ads_speed;
            }
        }

        let mut ads_movement = stats.movement_speed;
        if let Some(grip) = &c.grip {
            ads_movement *= grip.ads_movement;
        }

        Self {
            damage: stats.damage,
            fire_rate: stats.fire_rate,
            range,
            first_shot_spread,
            hipfire_spread: stats.hipfire_spread,
            recoil_scale,
            magazine_size,
            reserve_ammo: stats.reserve_ammo,
            reload_time,
            ads_time,
            movement_speed: stats.movement_speed,
            ads_movement,
            magnification,
            penetration: stats.penetration,
            armor_piercing: stats.armor_piercing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::blueprint::default_blueprint;
    use crate::game::blueprint::WeaponSlot;
    use crate::game::parts::library::PartLibrary;

    #[test]
    fn style_defaults_differ() {
        let ranger = WeaponStats::for_style("ranger");
        let compact = WeaponStats::for_style("compact");
        assert_eq!(ranger.magazine_size, 25);
        assert_eq!(compact.magazine_size, 12);
        assert_eq!(compact.fire_rate, 400.0);
    }

    #[test]
    fn magazine_overrides_capacity_and_scales_reload() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Magazine, "drum_50", &lib).unwrap();

        let eff = EffectiveStats::compute(&bp);
        assert_eq!(eff.magazine_size, 50);
        // drum reload_speed 0.75 -> slower than the base 2.5s
        assert!(eff.reload_time > bp.stats.reload_time);
    }

    #[test]
    fn stock_and_grip_recoil_stack_multiplicatively() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Stock, "heavy", &lib).unwrap();
        bp.set_component(WeaponSlot::Grip, "angled", &lib).unwrap();

        let eff = EffectiveStats::compute(&bp);
        let expected = (1.0 - 0.25) * (1.0 - 0.15);
        assert!((eff.recoil_scale - expected).abs() < 1e-6);
    }

    #[test]
    fn sniper_scope_slows_ads() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Scope, "sniper_8x", &lib).unwrap();

        let eff = EffectiveStats::compute(&bp);
        assert_eq!(eff.magnification, 8.0);
        assert!((eff.ads_time - bp.stats.ads_speed / 0.5).abs() < 1e-6);
    }

    #[test]
    fn barrel_scales_range() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Barrel, "long", &lib).unwrap();

        let eff = EffectiveStats::compute(&bp);
        assert!((eff.range - bp.stats.range * 1.2).abs() < 1e-4);
    }
}
