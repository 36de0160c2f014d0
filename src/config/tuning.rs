use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All tunable gameplay parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Tuning {
    pub dt: f32,
    /// Mouse look sensitivity (radians per pixel of motion).
    pub mouse_sensitivity: f32,
    /// Ground acceleration (world units per second squared).
    pub move_accel: f32,
    /// Max ground speed (world units per second).
    pub max_speed: f32,
    /// Per-tick velocity decay factor when no movement key is held.
    pub friction: f32,
    /// Below this speed the velocity snaps to zero.
    pub stop_epsilon: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    /// Camera height above the floor; also the hard floor clamp.
    pub eye_height: f32,
    /// Hitscan range when the blueprint gives no usable range.
    pub shoot_max_range: f32,
    pub tracer_ttl: f32,
    pub impact_ttl: f32,
    /// Scale applied to recoil pattern offsets (pattern units -> radians).
    pub recoil_kick_scale: f32,
    /// Recoil recovery rate (radians per second back toward rest).
    pub recoil_recovery_speed: f32,
    /// Seconds without firing before the recoil pattern restarts.
    pub recoil_burst_reset: f32,
    pub player_max_health: f32,
    pub enemy_detection_range: f32,
    pub enemy_attack_range: f32,
    /// Chase drops back to idle beyond detection_range * this factor.
    pub enemy_chase_drop_factor: f32,
    /// Attack drops back to chase beyond attack_range + this buffer.
    pub enemy_attack_buffer: f32,
    pub enemy_attack_cooldown: f32,
    pub enemy_attack_damage: f32,
    pub enemy_move_speed: f32,
    /// Minimum spacing enforced between enemies.
    pub enemy_separation_radius: f32,
    /// Foundry preview turntable speed (radians per second).
    pub preview_spin_speed: f32,
    /// First-person weapon offset from the eye (right, down, forward).
    pub weapon_view_x: f32,
    pub weapon_view_y: f32,
    pub weapon_view_z: f32,
    pub weapon_view_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            mouse_sensitivity: 0.002,
            move_accel: 72.0,
            max_speed: 4.8,
            friction: 0.8,
            stop_epsilon: 0.05,
            gravity: 54.0,
            jump_speed: 18.0,
            eye_height: 1.6,
            shoot_max_range: 100.0,
            tracer_ttl: 0.1,
            impact_ttl: 0.2,
            recoil_kick_scale: 0.004,
            recoil_recovery_speed: 4.0,
            recoil_burst_reset: 0.35,
            player_max_health: 100.0,
            enemy_detection_range: 15.0,
            enemy_attack_range: 8.0,
            enemy_chase_drop_factor: 1.5,
            enemy_attack_buffer: 2.0,
            enemy_attack_cooldown: 1.0,
            enemy_attack_damage: 8.0,
            enemy_move_speed: 3.5,
            enemy_separation_radius: 0.8,
            preview_spin_speed: 0.6,
            weapon_view_x: 0.3,
            weapon_view_y: -0.25,
            weapon_view_z: -0.6,
            weapon_view_scale: 0.02,
        }
    }
}

impl Tuning {
    /// Get the data directory for config and database files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("weapon_foundry")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str(&contents) {
                    Ok(tuning) => return tuning,
                    Err(e) => {
                        warn!("Failed to parse tuning.ron: {e}, using defaults");
                    }
                },
                Err(e) => {
                    warn!("Failed to read tuning.ron: {e}, using defaults");
                }
            }
        }
        let tuning = Self::default();
        tuning.save();
        tuning
    }

    /// Save current tuning to file.
    pub fn save(&self) {
        let path = Self::file_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    warn!("Failed to write tuning.ron: {e}");
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from file (called by key press).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded");
    }
}
