use bevy::prelude::*;

/// Input intent: written in Update, consumed in FixedUpdate.
#[derive(Component, Default)]
pub struct Intent {
    /// Desired movement on the ground plane, camera-relative (normalized or zero).
    pub move_dir: Vec2,
    pub jump: bool,
    /// One-shot: consumed by the shooting system.
    pub fire: bool,
    /// One-shot: consumed by the reload system.
    pub reload: bool,
}
