use bevy::prelude::*;

use super::components::{Health, Hittable, Lifetime, PlayerRig, ViewAngles};
use super::events::{DamageSource, GameEvent};
use super::intent::Intent;
use crate::config::tuning::Tuning;
use crate::game::types::Seconds;
use crate::game::weapon::factory::MuzzlePoint;
use crate::game::weapon::{AssembledWeapon, CurrentWeapon};

/// Fallback damage when a controller somehow has no weapon metadata.
const DEFAULT_DAMAGE: f32 = 25.0;

// ── Components & resources ──────────────────────────────────────────

/// Ammo counters and the reload sub-state. The timer lives here so that
/// despawning the owner abandons the reload instead of completing it
/// against a dead entity.
#[derive(Component, Debug, Clone)]
pub struct AmmoState {
    pub current: u32,
    pub reserve: u32,
    pub max: u32,
    pub reloading: Option<Timer>,
}

impl AmmoState {
    pub fn new(magazine_size: u32, reserve: u32) -> Self {
        Self {
            current: magazine_size,
            reserve,
            max: magazine_size,
            reloading: None,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading.is_some()
    }

    /// Start a reload unless already reloading, already full, or dry on
    /// reserve. Returns whether a reload actually started.
    pub fn try_start_reload(&mut self, duration: f32) -> bool {
        if self.is_reloading() || self.current == self.max || self.reserve == 0 {
            return false;
        }
        self.reloading = Some(Timer::from_seconds(duration, TimerMode::Once));
        true
    }
}

/// Top up a magazine from reserve, capped by magazine size and whatever
/// reserve is left.
pub fn refill(current: u32, reserve: u32, max: u32) -> (u32, u32) {
    let needed = max.saturating_sub(current);
    let taken = needed.min(reserve);
    (current + taken, reserve - taken)
}

/// Accumulated view kick from firing, recovered over time.
#[derive(Component, Debug, Clone, Default)]
pub struct RecoilState {
    pub pitch: f32,
    pub yaw: f32,
    pub pattern_index: usize,
    pub since_last_shot: f32,
}

/// Pre-built mesh/material handles for tracers and hit markers
/// (unit shapes scaled per spawn).
#[derive(Resource)]
pub struct CombatAssets {
    pub tracer_mesh: Handle<Mesh>,
    pub tracer_player: Handle<StandardMaterial>,
    pub tracer_enemy: Handle<StandardMaterial>,
    pub impact_mesh: Handle<Mesh>,
    pub impact_material: Handle<StandardMaterial>,
}

// ── Hitscan ─────────────────────────────────────────────────────────

/// Ray/sphere intersection: distance along the ray, if any.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let proj = to_center.dot(dir);
    if proj < 0.0 {
        return None;
    }
    let closest_sq = to_center.length_squared() - proj * proj;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let offset = (radius_sq - closest_sq).sqrt();
    Some((proj - offset).max(0.0))
}

/// View direction from yaw/pitch plus the current recoil kick.
fn view_direction(view: &ViewAngles, recoil: &RecoilState) -> Vec3 {
    Quat::from_euler(
        EulerRot::YXZ,
        view.yaw + recoil.yaw,
        view.pitch + recoil.pitch,
        0.0,
    ) * Vec3::NEG_Z
}

/// FixedUpdate: consume fire intents. Dry triggers redirect to reload;
/// otherwise decrement ammo, raycast, and emit damage / impact / tracer
/// events.
pub fn player_shoot(
    tuning: Res<Tuning>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &ViewAngles,
            &mut Intent,
            &mut AmmoState,
            &mut RecoilState,
            &CurrentWeapon,
        ),
        With<PlayerRig>,
    >,
    weapons: Query<&AssembledWeapon>,
    muzzles: Query<&GlobalTransform, With<MuzzlePoint>>,
    hittables: Query<(Entity, &GlobalTransform, &Hittable, Option<&Health>)>,
    mut events: MessageWriter<GameEvent>,
) {
    for (player, transform, view, mut intent, mut ammo, mut recoil, current) in &mut players {
        if !intent.fire {
            continue;
        }
        intent.fire = false;

        if ammo.is_reloading() {
            continue;
        }

        let weapon = weapons.get(current.0).ok();
        let range = tuning.shoot_max_range;
        let (damage, reload_time, recoil_scale, pattern) = match weapon {
            Some(w) => (
                w.effective.damage,
                w.effective.reload_time,
                w.effective.recoil_scale,
                w.blueprint.stats.recoil_pattern.clone(),
            ),
            None => (DEFAULT_DAMAGE, 2.5, 1.0, Vec::new()),
        };

        // dry trigger: reload instead of firing
        if ammo.current == 0 {
            if ammo.try_start_reload(reload_time) {
                info!("Magazine empty, reloading");
            }
            continue;
        }
        ammo.current -= 1;

        let origin = transform.translation + Vec3::Y * tuning.eye_height;
        let dir = view_direction(view, &recoil);

        // nearest sphere hit
        let mut nearest: Option<(Entity, f32, bool)> = None;
        for (entity, global, hittable, health) in &hittables {
            if entity == player {
                continue;
            }
            if let Some(t) = ray_sphere(origin, dir, global.translation(), hittable.radius) {
                if t <= range && nearest.is_none_or(|(_, best, _)| t < best) {
                    nearest = Some((entity, t, health.is_some()));
                }
            }
        }

        let muzzle = muzzles
            .iter()
            .next()
            .map(|g| g.translation())
            // estimate from the eye when the weapon has no muzzle frame
            .unwrap_or_else(|| origin + dir * 0.5 + Vec3::new(0.0, -0.2, 0.0));

        let end = match nearest {
            Some((target, t, damageable)) => {
                let hit_point = origin + dir * t;
                if damageable {
                    events.write(GameEvent::DealDamage {
                        src: Some(player),
                        dst: target,
                        amount: damage,
                        source: DamageSource::PlayerWeapon,
                    });
                } else {
                    events.write(GameEvent::SpawnImpact { position: hit_point });
                }
                hit_point
            }
            None => origin + dir * range,
        };

        events.write(GameEvent::SpawnTracer {
            from: muzzle,
            to: end,
            source: DamageSource::PlayerWeapon,
        });

        // advance through the recoil pattern
        if !pattern.is_empty() {
            let idx = recoil.pattern_index.min(pattern.len() - 1);
            let [x, y] = pattern[idx];
            recoil.yaw += x * tuning.recoil_kick_scale * recoil_scale;
            recoil.pitch += y * tuning.recoil_kick_scale * recoil_scale;
            recoil.pattern_index += 1;
        }
        recoil.since_last_shot = 0.0;
    }
}

/// FixedUpdate: manual reloads plus ticking the active reload timer.
pub fn reload_system(
    tuning: Res<Tuning>,
    mut players: Query<(&mut Intent, &mut AmmoState, &CurrentWeapon), With<PlayerRig>>,
    weapons: Query<&AssembledWeapon>,
) {
    let dt = std::time::Duration::from_secs_f32(tuning.dt);
    for (mut intent, mut ammo, current) in &mut players {
        if intent.reload {
            intent.reload = false;
            let duration = weapons
                .get(current.0)
                .map(|w| w.effective.reload_time)
                .unwrap_or(2.5);
            if ammo.try_start_reload(duration) {
                info!("Reloading");
            }
        }

        let finished = match &mut ammo.reloading {
            Some(timer) => timer.tick(dt).is_finished(),
            None => false,
        };
        if finished {
            let (current_ammo, reserve) = refill(ammo.current, ammo.reserve, ammo.max);
            ammo.current = current_ammo;
            ammo.reserve = reserve;
            ammo.reloading = None;
            info!("Reload complete ({}/{})", ammo.current, ammo.reserve);
        }
    }
}

fn approach_zero(value: f32, step: f32) -> f32 {
    if value.abs() <= step {
        0.0
    } else {
        value - step * value.signum()
    }
}

/// FixedUpdate: ease recoil back to rest; restart the pattern after a
/// firing pause.
pub fn recoil_recovery(
    tuning: Res<Tuning>,
    mut players: Query<(&mut RecoilState, &CurrentWeapon), With<PlayerRig>>,
    weapons: Query<&AssembledWeapon>,
) {
    let dt = tuning.dt;
    for (mut recoil, current) in &mut players {
        recoil.since_last_shot += dt;
        if recoil.since_last_shot > tuning.recoil_burst_reset {
            recoil.pattern_index = 0;
        }

        let recovery = weapons
            .get(current.0)
            .map(|w| w.blueprint.stats.recoil_recovery)
            .unwrap_or(0.5);
        let step = tuning.recoil_recovery_speed * recovery * dt;
        recoil.pitch = approach_zero(recoil.pitch, step);
        recoil.yaw = approach_zero(recoil.yaw, step);
    }
}

// ── Event application ───────────────────────────────────────────────

/// EventApplySet: apply DealDamage events to Health.
pub fn apply_damage_events(
    mut events: MessageReader<GameEvent>,
    mut targets: Query<&mut Health>,
) {
    for event in events.read() {
        if let GameEvent::DealDamage { dst, amount, source, .. } = event {
            if let Ok(mut health) = targets.get_mut(*dst) {
                health.current = (health.current - amount).max(0.0);
                debug!(
                    "{:?} dealt {:.1} to {:?} (hp: {:.1})",
                    source, amount, dst, health.current
                );
            }
        }
    }
}

/// EventApplySet: spawn tracer and impact visuals with a TTL.
pub fn spawn_hit_visuals(
    tuning: Res<Tuning>,
    assets: Res<CombatAssets>,
    mut commands: Commands,
    mut events: MessageReader<GameEvent>,
) {
    for event in events.read() {
        match event {
            GameEvent::SpawnTracer { from, to, source } => {
                let delta = *to - *from;
                let length = delta.length();
                if length < 1e-3 {
                    continue;
                }
                let material = match source {
                    DamageSource::PlayerWeapon => assets.tracer_player.clone(),
                    DamageSource::Enemy => assets.tracer_enemy.clone(),
                };
                commands.spawn((
                    super::components::InRange,
                    Lifetime(Seconds(tuning.tracer_ttl)),
                    Mesh3d(assets.tracer_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(*from + delta * 0.5)
                        .looking_at(*to, Vec3::Y)
                        .with_scale(Vec3::new(0.03, 0.03, length)),
                ));
            }
            GameEvent::SpawnImpact { position } => {
                commands.spawn((
                    super::components::InRange,
                    Lifetime(Seconds(tuning.impact_ttl)),
                    Mesh3d(assets.impact_mesh.clone()),
                    MeshMaterial3d(assets.impact_material.clone()),
                    Transform::from_translation(*position).with_scale(Vec3::splat(0.1)),
                ));
            }
            _ => {}
        }
    }
}

/// CleanupSet: tick lifetimes and despawn expired visuals.
pub fn cleanup_ttl(
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    let dt = tuning.dt;
    for (entity, mut lifetime) in &mut query {
        lifetime.0 = lifetime.0.dec(dt);
        if lifetime.0.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refill_full_magazine_from_reserve() {
        assert_eq!(refill(0, 75, 25), (25, 50));
    }

    #[test]
    fn refill_partial_when_reserve_is_short() {
        assert_eq!(refill(0, 10, 25), (10, 0));
    }

    #[test]
    fn refill_tops_up_partial_magazine() {
        assert_eq!(refill(20, 75, 25), (25, 70));
        assert_eq!(refill(25, 75, 25), (25, 75));
    }

    #[test]
    fn reload_guards() {
        let mut ammo = AmmoState::new(25, 75);
        // full magazine: no reload
        assert!(!ammo.try_start_reload(2.0));

        ammo.current = 10;
        assert!(ammo.try_start_reload(2.0));
        // re-entry while reloading is a no-op
        assert!(!ammo.try_start_reload(2.0));

        let mut dry = AmmoState::new(25, 0);
        dry.current = 0;
        assert!(!dry.try_start_reload(2.0));
    }

    #[test]
    fn ray_sphere_hits_and_misses() {
        let origin = Vec3::ZERO;
        let dir = Vec3::NEG_Z;

        let t = ray_sphere(origin, dir, Vec3::new(0.0, 0.0, -10.0), 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-4);

        // off to the side
        assert!(ray_sphere(origin, dir, Vec3::new(5.0, 0.0, -10.0), 1.0).is_none());
        // behind the origin
        assert!(ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());
    }

    #[test]
    fn recoil_recovery_reaches_rest() {
        let mut v = 0.3_f32;
        for _ in 0..100 {
            v = approach_zero(v, 0.02);
        }
        assert_eq!(v, 0.0);

        // symmetric for negative kick
        assert_eq!(approach_zero(-0.01, 0.02), 0.0);
    }
}
