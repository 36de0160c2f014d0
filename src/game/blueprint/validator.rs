use super::WeaponBlueprint;

/// Outcome of validating a blueprint. Warnings never block validity.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ── Balance limits ──────────────────────────────────────────────────

const DAMAGE: (f32, f32) = (10.0, 100.0);
const FIRE_RATE: (f32, f32) = (200.0, 1200.0);
const RANGE: (f32, f32) = (10.0, 100.0);
const MAGAZINE_SIZE: (u32, u32) = (5, 50);
const PENETRATION: (f32, f32) = (0.0, 100.0);
const ADS_SPEED: (f32, f32) = (0.2, 0.8);
const BARREL_LENGTH: (f32, f32) = (0.5, 1.5);
const BARREL_RANGE_MOD: (f32, f32) = (0.5, 1.5);
const BARREL_VELOCITY_MOD: (f32, f32) = (0.7, 1.3);
const STOCK_RECOIL_MAX: f32 = 0.30;
const STOCK_STABILITY_MAX: f32 = 0.25;
const SCOPE_MAGNIFICATION: (f32, f32) = (1.0, 8.0);
const SCOPE_ADS_MOD: (f32, f32) = (0.3, 1.0);
const GRIP_RECOIL_MAX: f32 = 0.20;
const GRIP_ADS_MOVE: (f32, f32) = (0.6, 1.0);
const MAG_RELOAD_MOD: (f32, f32) = (0.7, 1.3);
const RECOIL_PATTERN_WARN_LEN: usize = 30;

/// Latest acceptable created_at: some slack past "now" for clock skew.
const TIMESTAMP_SLACK_SECS: i64 = 24 * 60 * 60;

fn check_range_f32(
    errors: &mut Vec<String>,
    field: &str,
    value: f32,
    (min, max): (f32, f32),
) {
    if value < min || value > max {
        errors.push(format!(
            "{field} must be between {min} and {max} (current: {value})"
        ));
    }
}

/// Validate a blueprint against the game-balance limits.
///
/// Pure: no state, no side effects, never mutates the blueprint. Errors
/// make the blueprint invalid; warnings are advisory.
pub fn validate(blueprint: &WeaponBlueprint) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_required_fields(blueprint, &mut errors);
    check_stats(blueprint, &mut errors, &mut warnings);
    check_components(blueprint, &mut errors, &mut warnings);
    check_metadata(blueprint, &mut errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Convenience wrapper for gate checks.
pub fn is_valid(blueprint: &WeaponBlueprint) -> bool {
    validate(blueprint).valid
}

fn check_required_fields(blueprint: &WeaponBlueprint, errors: &mut Vec<String>) {
    if blueprint.id.trim().is_empty() {
        errors.push("Blueprint id is required".into());
    }
    if blueprint.name.trim().is_empty() {
        errors.push("Blueprint name is required".into());
    }
    if blueprint.author.trim().is_empty() {
        errors.push("Author name is required".into());
    }
    if blueprint.components.receiver.is_none() {
        errors.push("Receiver configuration is required".into());
    }
    if blueprint.components.barrel.is_none() {
        errors.push("Barrel configuration is required".into());
    }
    if blueprint.components.magazine.is_none() {
        errors.push("Magazine configuration is required".into());
    }
}

fn check_stats(
    blueprint: &WeaponBlueprint,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let stats = &blueprint.stats;

    check_range_f32(errors, "damage", stats.damage, DAMAGE);
    check_range_f32(errors, "fire rate", stats.fire_rate, FIRE_RATE);
    check_range_f32(errors, "range", stats.range, RANGE);
    check_range_f32(errors, "ADS speed", stats.ads_speed, ADS_SPEED);
    check_range_f32(errors, "penetration", stats.penetration, PENETRATION);

    if stats.magazine_size < MAGAZINE_SIZE.0 || stats.magazine_size > MAGAZINE_SIZE.1 {
        errors.push(format!(
            "magazine size must be between {} and {} (current: {})",
            MAGAZINE_SIZE.0, MAGAZINE_SIZE.1, stats.magazine_size
        ));
    }

    if stats.recoil_pattern.is_empty() {
        errors.push("recoil pattern is required and cannot be empty".into());
    } else if stats.recoil_pattern.len() > RECOIL_PATTERN_WARN_LEN {
        warnings.push(format!(
            "recoil pattern has more than {RECOIL_PATTERN_WARN_LEN} points, may affect performance"
        ));
    }

    if stats.damage > 80.0 && stats.fire_rate > 800.0 {
        warnings.push("high damage + high fire rate combination may be overpowered".into());
    }
    if stats.penetration > 80.0 && stats.damage > 60.0 {
        warnings.push("high penetration + high damage may be unbalanced".into());
    }
}

fn check_components(
    blueprint: &WeaponBlueprint,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let c = &blueprint.components;

    if let Some(barrel) = &c.barrel {
        check_range_f32(errors, "barrel length", barrel.length, BARREL_LENGTH);
        check_range_f32(
            errors,
            "barrel range modifier",
            barrel.range_modifier,
            BARREL_RANGE_MOD,
        );
        check_range_f32(
            errors,
            "barrel velocity modifier",
            barrel.velocity_modifier,
            BARREL_VELOCITY_MOD,
        );
    }

    if let Some(stock) = &c.stock {
        if stock.recoil_reduction > STOCK_RECOIL_MAX {
            errors.push(format!(
                "stock recoil reduction cannot exceed {:.0}% (current: {:.0}%)",
                STOCK_RECOIL_MAX * 100.0,
                stock.recoil_reduction * 100.0
            ));
        }
        if stock.aim_stability > STOCK_STABILITY_MAX {
            errors.push(format!(
                "stock aim stability bonus cannot exceed {:.0}%",
                STOCK_STABILITY_MAX * 100.0
            ));
        }
    }

    if let Some(scope) = &c.scope {
        check_range_f32(
            errors,
            "scope magnification",
            scope.magnification,
            SCOPE_MAGNIFICATION,
        );
        check_range_f32(errors, "scope ADS modifier", scope.ads_speed, SCOPE_ADS_MOD);
        if scope.magnification > 4.0 && scope.ads_speed > 0.7 {
            warnings.push("high magnification scopes should have lower ADS speed (< 0.7)".into());
        }
    }

    if let Some(grip) = &c.grip {
        if grip.recoil_reduction > GRIP_RECOIL_MAX {
            errors.push(format!(
                "grip recoil reduction cannot exceed {:.0}%",
                GRIP_RECOIL_MAX * 100.0
            ));
        }
        check_range_f32(errors, "grip ADS movement", grip.ads_movement, GRIP_ADS_MOVE);
    }

    if let Some(magazine) = &c.magazine {
        if magazine.capacity < MAGAZINE_SIZE.0 || magazine.capacity > MAGAZINE_SIZE.1 {
            errors.push(format!(
                "magazine capacity must be between {} and {} rounds (current: {})",
                MAGAZINE_SIZE.0, MAGAZINE_SIZE.1, magazine.capacity
            ));
        }
        check_range_f32(
            errors,
            "magazine reload modifier",
            magazine.reload_speed,
            MAG_RELOAD_MOD,
        );
        if magazine.capacity > 35 && magazine.reload_speed > 1.0 {
            warnings.push("large magazines should have a reload speed penalty (< 1.0)".into());
        }
    }
}

fn check_metadata(blueprint: &WeaponBlueprint, errors: &mut Vec<String>) {
    if !is_semver(&blueprint.version) {
        errors.push(format!(
            "version must follow semantic versioning, e.g. \"1.0.0\" (current: \"{}\")",
            blueprint.version
        ));
    }

    if !blueprint.id.is_empty()
        && !blueprint
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.push("blueprint id can only contain letters, numbers, underscores, and hyphens".into());
    }

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    if blueprint.created_at <= 0 || blueprint.created_at > now + TIMESTAMP_SLACK_SECS {
        errors.push(format!(
            "invalid created_at timestamp: {}",
            blueprint.created_at
        ));
    }
}

/// Three dot-separated non-negative integers.
fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.parse::<u32>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::blueprint::{default_blueprint, WeaponSlot};
    use crate::game::parts::library::PartLibrary;

    #[test]
    fn default_blueprint_is_valid() {
        let report = validate(&default_blueprint("ranger"));
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn damage_out_of_range_names_the_field() {
        for damage in [9.9, 0.0, -5.0, 100.1, 500.0] {
            let mut bp = default_blueprint("ranger");
            bp.stats.damage = damage;
            let report = validate(&bp);
            assert!(!report.valid);
            assert!(
                report.errors.iter().any(|e| e.contains("damage")),
                "no damage error for {damage}: {:?}",
                report.errors
            );
        }
    }

    #[test]
    fn boundary_values_pass() {
        let mut bp = default_blueprint("ranger");
        bp.stats.damage = 10.0;
        assert!(validate(&bp).valid);
        bp.stats.damage = 100.0;
        assert!(validate(&bp).valid);
    }

    #[test]
    fn missing_required_components_fail() {
        let mut bp = default_blueprint("ranger");
        bp.clear_component(WeaponSlot::Barrel);
        bp.clear_component(WeaponSlot::Magazine);
        bp.components.receiver = None;

        let report = validate(&bp);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("Receiver")));
        assert!(report.errors.iter().any(|e| e.contains("Barrel")));
        assert!(report.errors.iter().any(|e| e.contains("Magazine")));
    }

    #[test]
    fn missing_optional_components_are_fine() {
        let bp = default_blueprint("ranger");
        assert!(bp.components.stock.is_none());
        assert!(bp.components.scope.is_none());
        assert!(bp.components.grip.is_none());
        assert!(validate(&bp).valid);
    }

    #[test]
    fn empty_recoil_pattern_is_an_error() {
        let mut bp = default_blueprint("ranger");
        bp.stats.recoil_pattern.clear();
        let report = validate(&bp);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("recoil pattern")));
    }

    #[test]
    fn long_recoil_pattern_only_warns() {
        let mut bp = default_blueprint("ranger");
        bp.stats.recoil_pattern = vec![[0.0, 1.0]; 31];
        let report = validate(&bp);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("recoil pattern")));
    }

    #[test]
    fn overpowered_combination_warns_but_passes() {
        let mut bp = default_blueprint("ranger");
        bp.stats.damage = 85.0;
        bp.stats.fire_rate = 900.0;
        let report = validate(&bp);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("overpowered")));
    }

    #[test]
    fn high_zoom_fast_ads_scope_warns() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Scope, "red_dot", &lib).unwrap();
        // force an inconsistent combination
        let scope = bp.components.scope.as_mut().unwrap();
        scope.magnification = 6.0;
        scope.ads_speed = 0.9;

        let report = validate(&bp);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("magnification")));
    }

    #[test]
    fn oversized_stock_and_grip_reductions_fail() {
        let lib = PartLibrary::with_defaults();
        let mut bp = default_blueprint("ranger");
        bp.set_component(WeaponSlot::Stock, "heavy", &lib).unwrap();
        bp.set_component(WeaponSlot::Grip, "angled", &lib).unwrap();
        bp.components.stock.as_mut().unwrap().recoil_reduction = 0.35;
        bp.components.grip.as_mut().unwrap().recoil_reduction = 0.25;

        let report = validate(&bp);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("stock recoil")));
        assert!(report.errors.iter().any(|e| e.contains("grip recoil")));
    }

    #[test]
    fn large_magazine_without_penalty_warns() {
        let mut bp = default_blueprint("ranger");
        let magazine = bp.components.magazine.as_mut().unwrap();
        magazine.capacity = 40;
        magazine.reload_speed = 1.1;

        let report = validate(&bp);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("magazine")));
    }

    #[test]
    fn metadata_format_checks() {
        let mut bp = default_blueprint("ranger");
        bp.version = "1.0".into();
        assert!(!validate(&bp).valid);

        bp.version = "1.0.0".into();
        bp.id = "bad id!".into();
        assert!(!validate(&bp).valid);

        bp.id = "good_id-01".into();
        bp.created_at = -7;
        assert!(!validate(&bp).valid);

        bp.created_at = 1_700_000_000;
        assert!(validate(&bp).valid);
    }

    #[test]
    fn semver_parser() {
        assert!(is_semver("1.0.0"));
        assert!(is_semver("12.34.56"));
        assert!(!is_semver("1.0"));
        assert!(!is_semver("1.0.0.0"));
        assert!(!is_semver("a.b.c"));
        assert!(!is_semver("1..0"));
    }
}
