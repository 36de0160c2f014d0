use bevy::prelude::*;

use super::components::{Health, InRange, Lifetime, PlayerRig};
use super::events::{DamageSource, GameEvent};
use crate::config::tuning::Tuning;
use crate::game::types::Seconds;

/// Enemy behavior states. Dead is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Chase,
    Attack,
    Dead,
}

/// Distance thresholds driving the state machine.
#[derive(Debug, Clone, Copy)]
pub struct EnemyParams {
    pub detection_range: f32,
    pub attack_range: f32,
    /// Chase drops to idle beyond detection_range * this factor.
    pub chase_drop_factor: f32,
    /// Attack drops to chase beyond attack_range + this buffer.
    pub attack_buffer: f32,
}

impl EnemyParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            detection_range: tuning.enemy_detection_range,
            attack_range: tuning.enemy_attack_range,
            chase_drop_factor: tuning.enemy_chase_drop_factor,
            attack_buffer: tuning.enemy_attack_buffer,
        }
    }
}

/// One FSM step from the current distance to the target.
///
/// The exit thresholds are wider than the entry thresholds (hysteresis),
/// so an enemy sitting on a boundary never flaps between states.
pub fn next_state(state: EnemyState, dist: f32, params: &EnemyParams) -> EnemyState {
    match state {
        EnemyState::Idle => {
            if dist < params.detection_range {
                EnemyState::Chase
            } else {
                EnemyState::Idle
            }
        }
        EnemyState::Chase => {
            if dist >= params.detection_range * params.chase_drop_factor {
                EnemyState::Idle
            } else if dist < params.attack_range {
                EnemyState::Attack
            } else {
                EnemyState::Chase
            }
        }
        EnemyState::Attack => {
            if dist > params.attack_range + params.attack_buffer {
                EnemyState::Chase
            } else {
                EnemyState::Attack
            }
        }
        EnemyState::Dead => EnemyState::Dead,
    }
}

#[derive(Component, Debug)]
pub struct Enemy {
    pub state: EnemyState,
    /// Seconds until the next shot while attacking.
    pub attack_cooldown: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            state: EnemyState::Idle,
            attack_cooldown: 0.0,
        }
    }
}

/// Debris chunk velocity from a death burst.
#[derive(Component)]
pub struct DebrisVelocity(pub Vec3);

const ENEMY_EYE_HEIGHT: f32 = 1.4;

// ── Systems ─────────────────────────────────────────────────────────

/// FixedUpdate: distance-driven state transitions.
pub fn enemy_fsm(
    tuning: Res<Tuning>,
    players: Query<&Transform, With<PlayerRig>>,
    mut enemies: Query<(&Transform, &mut Enemy)>,
) {
    let Ok(player_tf) = players.single() else {
        return;
    };
    let params = EnemyParams::from_tuning(&tuning);

    for (transform, mut enemy) in &mut enemies {
        let dist = transform.translation.distance(player_tf.translation);
        enemy.state = next_state(enemy.state, dist, &params);
    }
}

/// FixedUpdate: chase movement straight toward the player, with simple
/// separation so enemies do not stack (no pathfinding here).
pub fn enemy_movement(
    tuning: Res<Tuning>,
    players: Query<&Transform, With<PlayerRig>>,
    mut enemies: Query<(Entity, &mut Transform, &Enemy), Without<PlayerRig>>,
) {
    let Ok(player_tf) = players.single() else {
        return;
    };
    let dt = tuning.dt;

    let positions: Vec<(Entity, Vec3)> = enemies
        .iter()
        .map(|(entity, tf, _)| (entity, tf.translation))
        .collect();

    for (entity, mut transform, enemy) in &mut enemies {
        if !matches!(enemy.state, EnemyState::Chase | EnemyState::Attack) {
            continue;
        }

        // face the player
        let mut to_player = player_tf.translation - transform.translation;
        to_player.y = 0.0;
        if to_player.length_squared() > 1e-6 {
            let yaw = f32::atan2(-to_player.x, -to_player.z);
            transform.rotation = Quat::from_rotation_y(yaw);
        }

        if enemy.state == EnemyState::Chase {
            let step = to_player.normalize_or_zero() * tuning.enemy_move_speed * dt;
            transform.translation += step;
        }

        // push away from overlapping neighbors
        let mut push = Vec3::ZERO;
        for (other, other_pos) in &positions {
            if *other == entity {
                continue;
            }
            let away = transform.translation - *other_pos;
            let dist = away.length();
            if dist < tuning.enemy_separation_radius && dist > 1e-3 {
                push += away / dist * (tuning.enemy_separation_radius - dist);
            }
        }
        push.y = 0.0;
        transform.translation += push * 0.5;
    }
}

/// FixedUpdate: fire a ray at the player on a fixed cooldown while in
/// attack state.
pub fn enemy_attack(
    tuning: Res<Tuning>,
    players: Query<(Entity, &Transform), With<PlayerRig>>,
    mut enemies: Query<(&Transform, &mut Enemy)>,
    mut events: MessageWriter<GameEvent>,
) {
    let Ok((player, player_tf)) = players.single() else {
        return;
    };
    let dt = tuning.dt;

    for (transform, mut enemy) in &mut enemies {
        if enemy.state != EnemyState::Attack {
            continue;
        }

        enemy.attack_cooldown -= dt;
        if enemy.attack_cooldown > 0.0 {
            continue;
        }
        enemy.attack_cooldown = tuning.enemy_attack_cooldown;

        let origin = transform.translation + Vec3::Y * ENEMY_EYE_HEIGHT;
        let target = player_tf.translation + Vec3::Y * tuning.eye_height;

        events.write(GameEvent::DealDamage {
            src: None,
            dst: player,
            amount: tuning.enemy_attack_damage,
            source: DamageSource::Enemy,
        });
        events.write(GameEvent::SpawnTracer {
            from: origin,
            to: target,
            source: DamageSource::Enemy,
        });
    }
}

/// EventApplySet: taking damage while idle aggros immediately, without
/// waiting for the detection radius.
pub fn enemy_damage_reactions(
    mut events: MessageReader<GameEvent>,
    mut enemies: Query<&mut Enemy>,
) {
    for event in events.read() {
        if let GameEvent::DealDamage { dst, .. } = event {
            if let Ok(mut enemy) = enemies.get_mut(*dst) {
                if enemy.state == EnemyState::Idle {
                    enemy.state = EnemyState::Chase;
                }
            }
        }
    }
}

/// EventApplySet: health reaching zero enters Dead exactly once — spawn a
/// one-shot debris burst and dispose the body. Irreversible.
pub fn enemy_death(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut enemies: Query<(Entity, &Transform, &Health, &mut Enemy)>,
) {
    for (entity, transform, health, mut enemy) in &mut enemies {
        if health.is_alive() || enemy.state == EnemyState::Dead {
            continue;
        }
        enemy.state = EnemyState::Dead;
        info!("Enemy {:?} died", entity);

        let chunk_mesh = meshes.add(Cuboid::new(0.15, 0.15, 0.15));
        let chunk_material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.7, 0.1, 0.1),
            emissive: LinearRgba::rgb(0.3, 0.0, 0.0),
            ..default()
        });

        const CHUNKS: usize = 10;
        for i in 0..CHUNKS {
            let angle = i as f32 / CHUNKS as f32 * std::f32::consts::TAU;
            let dir = Vec3::new(angle.cos(), 1.2 + (i % 3) as f32 * 0.4, angle.sin());
            commands.spawn((
                InRange,
                Lifetime(Seconds(0.8)),
                DebrisVelocity(dir * 3.0),
                Mesh3d(chunk_mesh.clone()),
                MeshMaterial3d(chunk_material.clone()),
                Transform::from_translation(transform.translation + Vec3::Y * 1.0),
            ));
        }

        commands.entity(entity).despawn();
    }
}

/// FixedUpdate: ballistic debris from death bursts.
pub fn debris_motion(
    tuning: Res<Tuning>,
    mut query: Query<(&mut Transform, &mut DebrisVelocity)>,
) {
    let dt = tuning.dt;
    for (mut transform, mut velocity) in &mut query {
        velocity.0.y -= tuning.gravity * 0.3 * dt;
        transform.translation += velocity.0 * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: EnemyParams = EnemyParams {
        detection_range: 15.0,
        attack_range: 8.0,
        chase_drop_factor: 1.5,
        attack_buffer: 2.0,
    };

    #[test]
    fn idle_to_chase_just_under_detection_range() {
        assert_eq!(next_state(EnemyState::Idle, 14.99, &PARAMS), EnemyState::Chase);
        assert_eq!(next_state(EnemyState::Idle, 15.0, &PARAMS), EnemyState::Idle);
    }

    #[test]
    fn chase_drops_to_idle_at_hysteresis_boundary() {
        // exactly 1.5x detection range releases the chase
        assert_eq!(next_state(EnemyState::Chase, 22.5, &PARAMS), EnemyState::Idle);
        assert_eq!(next_state(EnemyState::Chase, 22.4, &PARAMS), EnemyState::Chase);
    }

    #[test]
    fn chase_to_attack_inside_attack_range() {
        assert_eq!(next_state(EnemyState::Chase, 7.9, &PARAMS), EnemyState::Attack);
        assert_eq!(next_state(EnemyState::Chase, 8.0, &PARAMS), EnemyState::Chase);
    }

    #[test]
    fn attack_holds_through_the_buffer_zone() {
        // between attack range and the buffer the attack continues
        assert_eq!(next_state(EnemyState::Attack, 9.5, &PARAMS), EnemyState::Attack);
        assert_eq!(next_state(EnemyState::Attack, 10.0, &PARAMS), EnemyState::Attack);
        assert_eq!(next_state(EnemyState::Attack, 10.01, &PARAMS), EnemyState::Chase);
    }

    #[test]
    fn dead_is_terminal() {
        for dist in [0.0, 5.0, 100.0] {
            assert_eq!(next_state(EnemyState::Dead, dist, &PARAMS), EnemyState::Dead);
        }
    }
}
