use bevy::prelude::*;

use crate::game::types::Seconds;

// ── Game phase state ────────────────────────────────────────────────

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// The weapon editor.
    Foundry,
    /// First-person training scene.
    Range,
}

/// Marker: tag all range-session entities for cleanup when leaving.
#[derive(Component)]
pub struct InRange;

/// Marker: tag all foundry-session entities for cleanup when leaving.
#[derive(Component)]
pub struct InFoundry;

// ── Player ──────────────────────────────────────────────────────────

#[derive(Component)]
pub struct PlayerRig;

/// Marker for the first-person camera entity (child of the rig).
#[derive(Component)]
pub struct PlayerCamera;

/// Accumulated look angles; pitch is clamped.
#[derive(Component, Default)]
pub struct ViewAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// Horizontal ground velocity.
#[derive(Component, Default)]
pub struct MoveVelocity(pub Vec2);

/// Vertical velocity + grounded flag for the gravity accumulator.
#[derive(Component)]
pub struct VerticalMotion {
    pub velocity: f32,
    pub grounded: bool,
}

impl Default for VerticalMotion {
    fn default() -> Self {
        Self { velocity: 0.0, grounded: true }
    }
}

// ── Combat-facing state ─────────────────────────────────────────────

/// Anything a hitscan ray can strike (sphere approximation).
#[derive(Component, Debug, Clone, Copy)]
pub struct Hittable {
    pub radius: f32,
}

/// Damage-receiving capability. Entities without it take cosmetic hits only.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

/// Short-lived visual entities (tracers, impact markers, debris).
#[derive(Component)]
pub struct Lifetime(pub Seconds);
