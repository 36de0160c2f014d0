use bevy::prelude::*;

/// Who produced a damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageSource {
    PlayerWeapon,
    Enemy,
}

/// All game events processed through the event pipeline.
#[derive(Message, Debug, Clone)]
pub enum GameEvent {
    DealDamage {
        src: Option<Entity>,
        dst: Entity,
        amount: f32,
        source: DamageSource,
    },
    /// Visual bullet trail from muzzle to hit point.
    SpawnTracer {
        from: Vec3,
        to: Vec3,
        source: DamageSource,
    },
    /// Cosmetic hit marker on a non-damageable surface.
    SpawnImpact {
        position: Vec3,
    },
}
