use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use super::components::{MoveVelocity, PlayerCamera, PlayerRig, VerticalMotion, ViewAngles};
use super::intent::Intent;
use crate::config::tuning::Tuning;
use crate::game::combat::RecoilState;
use crate::game::weapon::{AssembledWeapon, CurrentWeapon};

/// Pointer-capture gate: no movement or combat input is processed while
/// unlocked.
#[derive(Resource, Default)]
pub struct InputLock {
    pub locked: bool,
}

const PITCH_LIMIT: f32 = 1.54;

/// Click to capture the cursor, Escape to release. Runs after the input
/// readers so the locking click itself never fires a shot.
pub fn pointer_lock_system(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut lock: ResMut<InputLock>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursors.single_mut() else {
        return;
    };

    if !lock.locked && mouse.just_pressed(MouseButton::Left) {
        lock.locked = true;
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
        info!("Pointer locked");
    } else if lock.locked && keyboard.just_pressed(KeyCode::Escape) {
        lock.locked = false;
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
        info!("Pointer unlocked");
    }
}

/// Release the cursor when leaving the range.
pub fn release_pointer(
    mut lock: ResMut<InputLock>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    lock.locked = false;
    if let Ok(mut cursor) = cursors.single_mut() {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// W/A/S/D + Space + R + left click, written into the Intent component.
pub fn read_player_input(
    lock: Res<InputLock>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut query: Query<(&ViewAngles, &mut Intent), With<PlayerRig>>,
) {
    for (view, mut intent) in &mut query {
        if !lock.locked {
            intent.move_dir = Vec2::ZERO;
            intent.jump = false;
            intent.fire = false;
            intent.reload = false;
            continue;
        }

        // camera forward/right projected on the ground plane
        let (sin, cos) = view.yaw.sin_cos();
        let forward = Vec2::new(-sin, -cos);
        let right = Vec2::new(cos, -sin);

        let mut dir = Vec2::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            dir += forward;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            dir -= forward;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            dir += right;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            dir -= right;
        }
        intent.move_dir = dir.normalize_or_zero();

        if keyboard.just_pressed(KeyCode::Space) {
            intent.jump = true;
        }
        if keyboard.just_pressed(KeyCode::KeyR) {
            intent.reload = true;
        }
        if mouse.just_pressed(MouseButton::Left) {
            intent.fire = true;
        }
    }
}

/// Mouse look: accumulate yaw/pitch while the pointer is captured.
pub fn mouse_look(
    lock: Res<InputLock>,
    tuning: Res<Tuning>,
    mut motions: MessageReader<MouseMotion>,
    mut query: Query<&mut ViewAngles, With<PlayerRig>>,
) {
    let mut delta = Vec2::ZERO;
    for motion in motions.read() {
        delta += motion.delta;
    }

    if !lock.locked || delta == Vec2::ZERO {
        return;
    }

    for mut view in &mut query {
        view.yaw -= delta.x * tuning.mouse_sensitivity;
        view.pitch = (view.pitch - delta.y * tuning.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Write view angles (plus recoil kick) onto the rig and camera transforms.
/// Yaw lives on the rig, pitch on the camera child.
pub fn apply_view_angles(
    rigs: Query<(&ViewAngles, &RecoilState, &Children, Entity), With<PlayerRig>>,
    mut transforms: Query<&mut Transform>,
    cameras: Query<(), With<PlayerCamera>>,
) {
    for (view, recoil, children, rig_entity) in &rigs {
        if let Ok(mut rig_tf) = transforms.get_mut(rig_entity) {
            rig_tf.rotation = Quat::from_rotation_y(view.yaw + recoil.yaw);
        }
        for child in children.iter() {
            if cameras.get(child).is_ok() {
                if let Ok(mut cam_tf) = transforms.get_mut(child) {
                    cam_tf.rotation =
                        Quat::from_rotation_x((view.pitch + recoil.pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT));
                }
            }
        }
    }
}

/// One velocity step: accelerate toward the input direction, clamp to max
/// speed, decay by friction when idle. The accelerate/clamp/decay order is
/// load-bearing for movement feel; keep it.
pub fn step_velocity(
    velocity: Vec2,
    dir: Vec2,
    accel: f32,
    max_speed: f32,
    friction: f32,
    stop_epsilon: f32,
    dt: f32,
) -> Vec2 {
    if dir.length_squared() > 0.0 {
        let v = velocity + dir.normalize_or_zero() * accel * dt;
        if v.length() > max_speed {
            v.normalize_or_zero() * max_speed
        } else {
            v
        }
    } else {
        // friction is a per-tick decay factor
        let v = velocity * friction;
        if v.length() < stop_epsilon { Vec2::ZERO } else { v }
    }
}

/// FixedUpdate: integrate ground movement. The equipped weapon's movement
/// stat scales the speed cap.
pub fn move_player(
    tuning: Res<Tuning>,
    mut query: Query<
        (&mut Transform, &mut MoveVelocity, &Intent, Option<&CurrentWeapon>),
        With<PlayerRig>,
    >,
    weapons: Query<&AssembledWeapon>,
) {
    let dt = tuning.dt;
    for (mut transform, mut velocity, intent, current) in &mut query {
        let speed_mult = current
            .and_then(|c| weapons.get(c.0).ok())
            .map(|w| w.effective.movement_speed)
            .unwrap_or(1.0);
        velocity.0 = step_velocity(
            velocity.0,
            intent.move_dir,
            tuning.move_accel,
            tuning.max_speed * speed_mult,
            tuning.friction,
            tuning.stop_epsilon,
            dt,
        );
        transform.translation.x += velocity.0.x * dt;
        transform.translation.z += velocity.0.y * dt;
    }
}

/// FixedUpdate: gravity accumulator, jump impulse, hard floor clamp.
pub fn vertical_motion(
    tuning: Res<Tuning>,
    mut query: Query<(&mut Transform, &mut VerticalMotion, &mut Intent), With<PlayerRig>>,
) {
    let dt = tuning.dt;
    for (mut transform, mut vertical, mut intent) in &mut query {
        if intent.jump {
            intent.jump = false;
            if vertical.grounded {
                vertical.velocity = tuning.jump_speed;
                vertical.grounded = false;
            }
        }

        if !vertical.grounded {
            vertical.velocity -= tuning.gravity * dt;
        }

        transform.translation.y += vertical.velocity * dt;

        // no terrain collision, just the floor
        if transform.translation.y <= 0.0 {
            transform.translation.y = 0.0;
            vertical.velocity = 0.0;
            vertical.grounded = true;
        } else {
            vertical.grounded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCEL: f32 = 72.0;
    const MAX: f32 = 4.8;
    const FRICTION: f32 = 0.8;
    const EPS: f32 = 0.05;
    const DT: f32 = 1.0 / 60.0;

    fn step(v: Vec2, dir: Vec2) -> Vec2 {
        step_velocity(v, dir, ACCEL, MAX, FRICTION, EPS, DT)
    }

    #[test]
    fn accelerates_and_clamps_to_max_speed() {
        let mut v = Vec2::ZERO;
        for _ in 0..120 {
            v = step(v, Vec2::new(0.0, -1.0));
        }
        assert!((v.length() - MAX).abs() < 1e-4);
        assert!(v.y < 0.0);
    }

    #[test]
    fn idle_decay_is_monotone_and_never_reverses() {
        let mut v = Vec2::new(3.0, 4.0);
        let initial = v;
        let mut prev_len = v.length();

        for _ in 0..200 {
            v = step(v, Vec2::ZERO);
            let len = v.length();
            assert!(len <= prev_len, "speed increased during decay");
            if len > 0.0 {
                assert!(v.dot(initial) > 0.0, "velocity reversed direction");
            }
            prev_len = len;
        }
        // epsilon snap ends the decay at exactly zero
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn diagonal_input_is_not_faster() {
        let mut straight = Vec2::ZERO;
        let mut diagonal = Vec2::ZERO;
        let diag_dir = Vec2::new(1.0, 1.0).normalize();
        for _ in 0..120 {
            straight = step(straight, Vec2::new(1.0, 0.0));
            diagonal = step(diagonal, diag_dir);
        }
        assert!((straight.length() - diagonal.length()).abs() < 1e-4);
    }
}
