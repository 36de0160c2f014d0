use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::{
    combat,
    components::GamePhase,
    enemy,
    events::GameEvent,
    fps::{self, InputLock},
    parts::library::PartLibrary,
    range::{self, ActiveLoadout},
};

// ── SystemSets (strict FixedUpdate ordering, range-phase only) ──────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedRangeSet {
    MovementSet,
    CombatSet,
    EventApplySet,
    CleanupSet,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameEvent>();
        app.init_state::<GamePhase>();
        app.insert_resource(PartLibrary::with_defaults());
        app.init_resource::<ActiveLoadout>();
        app.init_resource::<InputLock>();

        // Configure FixedUpdate set ordering (each set gated to Range phase)
        app.configure_sets(
            FixedUpdate,
            (
                FixedRangeSet::MovementSet.run_if(in_state(GamePhase::Range)),
                FixedRangeSet::CombatSet.run_if(in_state(GamePhase::Range)),
                FixedRangeSet::EventApplySet.run_if(in_state(GamePhase::Range)),
                FixedRangeSet::CleanupSet.run_if(in_state(GamePhase::Range)),
            )
                .chain(),
        );

        // MovementSet — chained to keep Transform mutations deterministic
        app.add_systems(
            FixedUpdate,
            (fps::move_player, fps::vertical_motion, enemy::enemy_movement, enemy::debris_motion)
                .chain()
                .in_set(FixedRangeSet::MovementSet),
        );

        // CombatSet — FSM first so attacks run against fresh state
        app.add_systems(
            FixedUpdate,
            (
                enemy::enemy_fsm,
                enemy::enemy_attack,
                combat::player_shoot,
                combat::reload_system,
                combat::recoil_recovery,
            )
                .chain()
                .in_set(FixedRangeSet::CombatSet),
        );

        // EventApplySet
        app.add_systems(
            FixedUpdate,
            (
                combat::apply_damage_events,
                enemy::enemy_damage_reactions,
                enemy::enemy_death,
                combat::spawn_hit_visuals,
            )
                .chain()
                .in_set(FixedRangeSet::EventApplySet),
        );

        // CleanupSet
        app.add_systems(
            FixedUpdate,
            combat::cleanup_ttl.in_set(FixedRangeSet::CleanupSet),
        );

        // ── Per-frame input (Range) ─────────────────────────────────
        // exit check and lock toggle run after the readers so a locking
        // click never fires and an unlocking Escape never exits
        app.add_systems(
            Update,
            (
                fps::read_player_input,
                fps::mouse_look,
                fps::apply_view_angles,
                range::range_exit_input,
                fps::pointer_lock_system,
            )
                .chain()
                .run_if(in_state(GamePhase::Range)),
        );

        // ── Range lifecycle ─────────────────────────────────────────
        app.add_systems(OnEnter(GamePhase::Range), range::setup_range);
        app.add_systems(
            OnExit(GamePhase::Range),
            (range::teardown_range, fps::release_pointer),
        );

        // ── Always-on ───────────────────────────────────────────────
        app.add_systems(Update, tuning_reload_input);
    }
}

/// Reload tuning with F5.
fn tuning_reload_input(keyboard: Res<ButtonInput<KeyCode>>, mut tuning: ResMut<Tuning>) {
    if keyboard.just_pressed(KeyCode::F5) {
        tuning.reload();
    }
}
