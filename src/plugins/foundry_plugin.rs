use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::assets_map::AssetsMap;
use crate::config::tuning::Tuning;
use crate::game::blueprint::stats::WeaponStats;
use crate::game::blueprint::validator::{self, ValidationReport};
use crate::game::blueprint::{default_blueprint, WeaponBlueprint, WeaponSlot, WeaponType};
use crate::game::components::{GamePhase, InFoundry};
use crate::game::parts::library::PartLibrary;
use crate::game::range::ActiveLoadout;
use crate::game::weapon::assembler::{self, SwapRestore};
use crate::game::weapon::profile::ReceiverProfile;
use crate::game::weapon::AssembledWeapon;
use crate::plugins::storage_plugin::Storage;
use crate::storage::repo::{BlueprintRepository, BlueprintSummary};

// ── Colors (match menu_plugin style) ────────────────────────────────

const COLOR_BG: Color = Color::srgba(0.08, 0.08, 0.12, 0.92);
const COLOR_BTN: Color = Color::srgba(0.18, 0.20, 0.28, 1.0);
const COLOR_BTN_HOVER: Color = Color::srgba(0.28, 0.32, 0.42, 1.0);
const COLOR_TEXT: Color = Color::WHITE;
const COLOR_TEXT_DIM: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);
const COLOR_ACCENT: Color = Color::srgba(0.2, 0.7, 1.0, 1.0);
const COLOR_CARD: Color = Color::srgba(0.12, 0.14, 0.20, 1.0);
const COLOR_INPUT_BG: Color = Color::srgba(0.10, 0.10, 0.16, 1.0);
const COLOR_INPUT_FOCUS: Color = Color::srgba(0.15, 0.15, 0.25, 1.0);
const COLOR_ERROR: Color = Color::srgba(1.0, 0.4, 0.4, 1.0);
const COLOR_WARNING: Color = Color::srgba(1.0, 0.8, 0.3, 1.0);

// ── Plugin ──────────────────────────────────────────────────────────

pub struct FoundryPlugin;

impl Plugin for FoundryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AssetsMap::with_defaults());
        app.init_resource::<FoundryState>();

        app.add_systems(OnEnter(GamePhase::Foundry), setup_foundry);
        app.add_systems(OnExit(GamePhase::Foundry), teardown_foundry);
        app.add_systems(
            Update,
            (
                name_input_system,
                cycle_button_system,
                action_button_system,
                button_hover_system,
                refresh_labels,
                spin_preview,
            )
                .chain()
                .run_if(in_state(GamePhase::Foundry)),
        );
    }
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Resource)]
pub struct FoundryState {
    pub blueprint: WeaponBlueprint,
    pub preview: Option<Entity>,
    pub status: String,
    pub report: Option<ValidationReport>,
    pub saved: Vec<BlueprintSummary>,
    pub load_index: usize,
}

impl Default for FoundryState {
    fn default() -> Self {
        Self {
            blueprint: default_blueprint("ranger"),
            preview: None,
            status: String::new(),
            report: None,
            saved: Vec::new(),
            load_index: 0,
        }
    }
}

// ── Markers & widgets ───────────────────────────────────────────────

#[derive(Component)]
struct ScreenRoot;

/// What a cycle row edits.
#[derive(Clone, Copy, PartialEq)]
enum CycleRow {
    Style,
    Slot(WeaponSlot),
    Skin,
}

/// Prev/next arrows on a cycle row.
#[derive(Component, Clone, Copy)]
struct CycleButton {
    row: CycleRow,
    dir: i32,
}

#[derive(Component, Clone, Copy)]
enum ActionButton {
    New,
    Validate,
    Save,
    LoadNext,
    Export,
    Import,
    Equip,
    Back,
}

#[derive(Component, Clone, Copy, PartialEq)]
struct RowLabel(CycleRow);

#[derive(Component)]
struct SkinSwatch;

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct ReportText;

#[derive(Component)]
struct StatsText;

#[derive(Component)]
struct NameInput {
    focused: bool,
}

#[derive(Component)]
struct NameInputDisplay;

/// Turntable for the preview weapon.
#[derive(Component)]
struct PreviewTurntable;

// ── Setup / teardown ────────────────────────────────────────────────

fn setup_foundry(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    library: Res<PartLibrary>,
    loadout: Res<ActiveLoadout>,
    storage: Option<Res<Storage>>,
    mut state: ResMut<FoundryState>,
) {
    state.blueprint = loadout.0.clone();
    state.status = String::new();
    state.report = None;
    state.load_index = 0;
    state.saved = storage
        .as_deref()
        .map(|s| s.list_blueprints())
        .unwrap_or_default();

    // Preview stage: camera + light + the weapon on a turntable
    commands.spawn((
        InFoundry,
        Camera3d::default(),
        Transform::from_translation(Vec3::new(40.0, 18.0, 45.0))
            .looking_at(Vec3::new(0.0, 0.0, 0.0), Vec3::Y),
    ));
    commands.spawn((
        InFoundry,
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.6, 0.0)),
    ));

    let preview = assembler::assemble_from_blueprint(
        &mut commands,
        &mut meshes,
        &mut materials,
        &library,
        &state.blueprint,
    );
    commands.entity(preview).insert((InFoundry, PreviewTurntable));
    state.preview = Some(preview);

    spawn_editor_panel(&mut commands, &state.blueprint);
}

fn teardown_foundry(
    mut commands: Commands,
    query: Query<Entity, With<InFoundry>>,
    screens: Query<Entity, With<ScreenRoot>>,
    mut state: ResMut<FoundryState>,
) {
    for entity in query.iter().chain(screens.iter()) {
        commands.entity(entity).despawn();
    }
    state.preview = None;
}

// ── UI construction ─────────────────────────────────────────────────

fn spawn_small_button(
    parent: &mut ChildSpawnerCommands,
    marker: impl Component,
    label: &str,
    width: f32,
) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                width: Val::Px(width),
                height: Val::Px(30.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(COLOR_BTN),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(COLOR_TEXT),
            ));
        });
}

fn spawn_cycle_row(parent: &mut ChildSpawnerCommands, row: CycleRow, title: &str, value: &str) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(COLOR_CARD),
        ))
        .with_children(|parent| {
            spawn_small_button(parent, CycleButton { row, dir: -1 }, "<", 30.0);
            parent
                .spawn(Node {
                    width: Val::Px(230.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn((
                        RowLabel(row),
                        Text::new(format!("{title}: {value}")),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(COLOR_TEXT),
                    ));
                });
            spawn_small_button(parent, CycleButton { row, dir: 1 }, ">", 30.0);

            if row == CycleRow::Skin {
                parent.spawn((
                    SkinSwatch,
                    Node {
                        width: Val::Px(22.0),
                        height: Val::Px(22.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.16, 0.16, 0.16)),
                ));
            }
        });
}

fn spawn_editor_panel(commands: &mut Commands, blueprint: &WeaponBlueprint) {
    commands
        .spawn((
            ScreenRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                bottom: Val::Px(12.0),
                width: Val::Px(360.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(COLOR_BG),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FOUNDRY"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(COLOR_ACCENT),
            ));

            // name input
            parent
                .spawn((
                    NameInput { focused: false },
                    Button,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(32.0),
                        align_items: AlignItems::Center,
                        padding: UiRect::horizontal(Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(COLOR_INPUT_BG),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        NameInputDisplay,
                        Text::new(blueprint.name.clone()),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(COLOR_TEXT),
                    ));
                });

            spawn_cycle_row(parent, CycleRow::Style, "Style", &blueprint.base_model);
            for slot in WeaponSlot::ALL {
                let value = blueprint.component_id(slot).unwrap_or("none").to_string();
                spawn_cycle_row(parent, CycleRow::Slot(slot), slot.display_name(), &value);
            }
            spawn_cycle_row(
                parent,
                CycleRow::Skin,
                "Skin",
                blueprint.skin.as_deref().unwrap_or("none"),
            );

            parent.spawn((
                StatsText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(COLOR_TEXT_DIM),
            ));

            // actions
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    column_gap: Val::Px(6.0),
                    row_gap: Val::Px(6.0),
                    margin: UiRect::top(Val::Px(8.0)),
                    ..default()
                })
                .with_children(|parent| {
                    spawn_small_button(parent, ActionButton::New, "New", 70.0);
                    spawn_small_button(parent, ActionButton::Validate, "Validate", 80.0);
                    spawn_small_button(parent, ActionButton::Save, "Save", 70.0);
                    spawn_small_button(parent, ActionButton::LoadNext, "Load >", 70.0);
                    spawn_small_button(parent, ActionButton::Export, "Export", 76.0);
                    spawn_small_button(parent, ActionButton::Import, "Import", 76.0);
                    spawn_small_button(parent, ActionButton::Equip, "Equip", 70.0);
                    spawn_small_button(parent, ActionButton::Back, "Back", 70.0);
                });

            parent.spawn((
                StatusText,
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(COLOR_ACCENT),
            ));
            parent.spawn((
                ReportText,
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(COLOR_TEXT_DIM),
            ));
        });
}

// ── Interaction systems ─────────────────────────────────────────────

fn button_hover_system(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (With<Button>, Without<NameInput>, Changed<Interaction>),
    >,
) {
    for (interaction, mut bg) in &mut buttons {
        match interaction {
            Interaction::Hovered => *bg = BackgroundColor(COLOR_BTN_HOVER),
            Interaction::None => *bg = BackgroundColor(COLOR_BTN),
            Interaction::Pressed => {}
        }
    }
}

/// Single-field text input for the blueprint name (click to focus,
/// Enter/Escape to release).
fn name_input_system(
    mut inputs: Query<(&Interaction, &mut NameInput, &mut BackgroundColor, &Children)>,
    mut displays: Query<&mut Text, With<NameInputDisplay>>,
    mut keyboard_events: MessageReader<KeyboardInput>,
    mut state: ResMut<FoundryState>,
) {
    let events: Vec<_> = keyboard_events.read().cloned().collect();

    for (interaction, mut input, mut bg, children) in &mut inputs {
        if *interaction == Interaction::Pressed {
            input.focused = true;
        }
        if !input.focused {
            *bg = BackgroundColor(COLOR_INPUT_BG);
            continue;
        }
        *bg = BackgroundColor(COLOR_INPUT_FOCUS);

        let mut changed = false;
        for event in &events {
            if !event.state.is_pressed() {
                continue;
            }
            match &event.logical_key {
                Key::Backspace => {
                    state.blueprint.name.pop();
                    changed = true;
                }
                Key::Escape | Key::Enter => {
                    input.focused = false;
                }
                Key::Character(c) => {
                    state.blueprint.name.push_str(c.as_str());
                    changed = true;
                }
                _ => {}
            }
        }

        if changed {
            for child in children.iter() {
                if let Ok(mut text) = displays.get_mut(child) {
                    **text = state.blueprint.name.clone();
                }
            }
        }
    }
}

/// Step through a sorted id list. `allow_none` inserts an empty choice
/// after the last entry.
fn cycle_id(ids: &[String], current: Option<&str>, dir: i32, allow_none: bool) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let len = ids.len() as i32 + if allow_none { 1 } else { 0 };
    let pos = match current {
        Some(id) => ids.iter().position(|x| x == id).map(|p| p as i32).unwrap_or(0),
        None => len - 1,
    };
    let next = (pos + dir).rem_euclid(len);
    if allow_none && next == len - 1 {
        None
    } else {
        Some(ids[next as usize].clone())
    }
}

fn slot_ids(library: &PartLibrary, slot: WeaponSlot) -> Vec<String> {
    match slot {
        WeaponSlot::Barrel => library.barrel_ids(),
        WeaponSlot::Stock => library.stock_ids(),
        WeaponSlot::Magazine => library.magazine_ids(),
        WeaponSlot::Scope => library.scope_ids(),
        WeaponSlot::Grip => library.grip_ids(),
    }
}

fn cycle_button_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    library: Res<PartLibrary>,
    mut state: ResMut<FoundryState>,
    buttons: Query<(&Interaction, &CycleButton), Changed<Interaction>>,
    previews: Query<(&Transform, &AssembledWeapon), With<PreviewTurntable>>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(preview_root) = state.preview else {
            continue;
        };
        let Ok((preview_tf, assembled)) = previews.get(preview_root) else {
            continue;
        };
        let restore = SwapRestore {
            transform: *preview_tf,
            parent: None,
        };

        let new_root = match button.row {
            CycleRow::Style => {
                let ids: Vec<String> =
                    ReceiverProfile::style_ids().iter().map(|s| s.to_string()).collect();
                let style = cycle_id(&ids, Some(&state.blueprint.base_model), button.dir, false)
                    .unwrap_or_else(|| state.blueprint.base_model.clone());

                // a style change re-bases stats and the receiver entry
                state.blueprint.base_model = style.clone();
                if let Some(receiver) = &mut state.blueprint.components.receiver {
                    receiver.style = style.clone();
                }
                state.blueprint.stats = WeaponStats::for_style(&style);
                state.blueprint.weapon_type = match style.as_str() {
                    "compact" => WeaponType::Pistol,
                    _ => WeaponType::Rifle,
                };

                commands.entity(preview_root).despawn();
                let root = assembler::assemble_from_blueprint(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &library,
                    &state.blueprint,
                );
                commands.entity(root).insert(restore.transform);
                root
            }
            CycleRow::Slot(slot) => {
                let ids = slot_ids(&library, slot);
                let next = cycle_id(
                    &ids,
                    state.blueprint.component_id(slot),
                    button.dir,
                    !slot.is_required(),
                );
                match next {
                    Some(id) => {
                        if let Err(e) = state.blueprint.set_component(slot, &id, &library) {
                            warn!("{e}");
                        }
                        assembler::swap_component(
                            &mut commands,
                            &mut meshes,
                            &mut materials,
                            &library,
                            preview_root,
                            Some(assembled),
                            restore,
                            slot,
                            &id,
                        )
                    }
                    None => {
                        state.blueprint.clear_component(slot);
                        assembler::remove_component(
                            &mut commands,
                            &mut meshes,
                            &mut materials,
                            &library,
                            preview_root,
                            Some(assembled),
                            restore,
                            slot,
                        )
                    }
                }
            }
            CycleRow::Skin => {
                let ids = library.skin_ids();
                let next = cycle_id(&ids, state.blueprint.skin.as_deref(), button.dir, true);
                state.blueprint.skin = next.clone();
                assembler::swap_skin(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &library,
                    preview_root,
                    Some(assembled),
                    restore,
                    next.as_deref(),
                )
            }
        };

        commands.entity(new_root).insert((InFoundry, PreviewTurntable));
        state.preview = Some(new_root);
        state.report = None;
    }
}

fn action_button_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    library: Res<PartLibrary>,
    mut state: ResMut<FoundryState>,
    mut loadout: ResMut<ActiveLoadout>,
    storage: Option<Res<Storage>>,
    buttons: Query<(&Interaction, &ActionButton), Changed<Interaction>>,
    previews: Query<&Transform, With<PreviewTurntable>>,
    mut next_state: ResMut<NextState<GamePhase>>,
) {
    let mut rebuild = false;

    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            ActionButton::New => {
                let style = state.blueprint.base_model.clone();
                state.blueprint = default_blueprint(&style);
                state.report = None;
                state.status = "New blueprint".into();
                rebuild = true;
            }
            ActionButton::Validate => {
                let report = validator::validate(&state.blueprint);
                state.status = if report.valid {
                    format!("Valid ({} warnings)", report.warnings.len())
                } else {
                    format!("Invalid: {} errors", report.errors.len())
                };
                state.report = Some(report);
            }
            ActionButton::Save => {
                let report = validator::validate(&state.blueprint);
                if !report.valid {
                    state.status = format!("Not saved: {} errors", report.errors.len());
                    state.report = Some(report);
                    continue;
                }
                match storage.as_deref() {
                    Some(repo) => match repo.save_blueprint(&state.blueprint) {
                        Ok(()) => {
                            state.status = format!("Saved '{}'", state.blueprint.name);
                            state.saved = repo.list_blueprints();
                        }
                        Err(e) => state.status = format!("Save failed: {e}"),
                    },
                    None => state.status = "Storage unavailable".into(),
                }
            }
            ActionButton::LoadNext => {
                let Some(repo) = storage.as_deref() else {
                    state.status = "Storage unavailable".into();
                    continue;
                };
                if state.saved.is_empty() {
                    state.status = "No saved blueprints".into();
                    continue;
                }
                let index = state.load_index % state.saved.len();
                let id = state.saved[index].id.clone();
                state.load_index = (index + 1) % state.saved.len();
                match repo.load_blueprint(&id) {
                    Some(blueprint) => {
                        state.status = format!("Loaded '{}'", blueprint.name);
                        state.blueprint = blueprint;
                        state.report = None;
                        rebuild = true;
                    }
                    None => state.status = format!("Blueprint '{id}' not found"),
                }
            }
            ActionButton::Export => {
                let suggested = format!("{}.gun.json", state.blueprint.id);
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Weapon blueprint", &["json"])
                    .set_file_name(&suggested)
                    .save_file()
                {
                    match serde_json::to_string_pretty(&state.blueprint) {
                        Ok(json) => match std::fs::write(&path, json) {
                            Ok(()) => state.status = format!("Exported to {}", path.display()),
                            Err(e) => state.status = format!("Export failed: {e}"),
                        },
                        Err(e) => state.status = format!("Export failed: {e}"),
                    }
                }
            }
            ActionButton::Import => {
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("Weapon blueprint", &["json"])
                    .pick_file()
                else {
                    continue;
                };
                let imported: Result<WeaponBlueprint, String> = std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()));
                match imported {
                    Ok(blueprint) => {
                        let report = validator::validate(&blueprint);
                        if report.valid {
                            state.status = format!("Imported '{}'", blueprint.name);
                            state.blueprint = blueprint;
                            state.report = Some(report);
                            rebuild = true;
                        } else {
                            state.status =
                                format!("Import rejected: {} errors", report.errors.len());
                            state.report = Some(report);
                        }
                    }
                    Err(e) => state.status = format!("Import failed: {e}"),
                }
            }
            ActionButton::Equip => {
                let report = validator::validate(&state.blueprint);
                if report.valid {
                    loadout.0 = state.blueprint.clone();
                    state.status = format!("Equipped '{}'", state.blueprint.name);
                } else {
                    state.status = format!("Cannot equip: {} errors", report.errors.len());
                }
                state.report = Some(report);
            }
            ActionButton::Back => {
                next_state.set(GamePhase::MainMenu);
            }
        }
    }

    if rebuild {
        if let Some(old_root) = state.preview {
            let transform = previews.get(old_root).copied().unwrap_or_default();
            commands.entity(old_root).despawn();
            let root = assembler::assemble_from_blueprint(
                &mut commands,
                &mut meshes,
                &mut materials,
                &library,
                &state.blueprint,
            );
            commands
                .entity(root)
                .insert((transform, InFoundry, PreviewTurntable));
            state.preview = Some(root);
        }
    }
}

/// Keep row labels, the skin swatch, the stats readout and the status
/// lines in sync with the edited blueprint.
fn refresh_labels(
    state: Res<FoundryState>,
    assets_map: Res<AssetsMap>,
    mut labels: Query<(&RowLabel, &mut Text)>,
    mut swatches: Query<&mut BackgroundColor, With<SkinSwatch>>,
    mut status: Query<&mut Text, (With<StatusText>, Without<RowLabel>)>,
    mut reports: Query<
        (&mut Text, &mut TextColor),
        (With<ReportText>, Without<StatusText>, Without<RowLabel>),
    >,
    mut stats: Query<
        &mut Text,
        (With<StatsText>, Without<ReportText>, Without<StatusText>, Without<RowLabel>),
    >,
) {
    if !state.is_changed() {
        return;
    }
    let blueprint = &state.blueprint;

    for (row, mut text) in &mut labels {
        **text = match row.0 {
            CycleRow::Style => format!("Style: {}", blueprint.base_model),
            CycleRow::Slot(slot) => format!(
                "{}: {}",
                slot.display_name(),
                blueprint.component_id(slot).unwrap_or("none")
            ),
            CycleRow::Skin => format!("Skin: {}", blueprint.skin.as_deref().unwrap_or("none")),
        };
    }

    for mut swatch in &mut swatches {
        *swatch = BackgroundColor(
            blueprint
                .skin
                .as_deref()
                .map(|id| assets_map.swatch(id))
                .unwrap_or(Color::srgb(0.3, 0.3, 0.3)),
        );
    }

    let effective = crate::game::blueprint::stats::EffectiveStats::compute(blueprint);
    for mut text in &mut stats {
        **text = format!(
            "dmg {:.0}  rpm {:.0}  rng {:.0}m\nmag {}  reload {:.2}s  ads {:.2}s",
            effective.damage,
            effective.fire_rate,
            effective.range,
            effective.magazine_size,
            effective.reload_time,
            effective.ads_time,
        );
    }

    for mut text in &mut status {
        **text = state.status.clone();
    }

    for (mut text, mut color) in &mut reports {
        match &state.report {
            Some(report) => {
                let mut lines = Vec::new();
                for e in &report.errors {
                    lines.push(format!("error: {e}"));
                }
                for w in &report.warnings {
                    lines.push(format!("warning: {w}"));
                }
                **text = lines.join("\n");
                *color = TextColor(if !report.errors.is_empty() {
                    COLOR_ERROR
                } else if !report.warnings.is_empty() {
                    COLOR_WARNING
                } else {
                    COLOR_TEXT_DIM
                });
            }
            None => **text = String::new(),
        }
    }
}

/// Slowly rotate the preview weapon.
fn spin_preview(
    tuning: Res<Tuning>,
    time: Res<Time>,
    mut query: Query<&mut Transform, With<PreviewTurntable>>,
) {
    for mut transform in &mut query {
        transform.rotate_y(tuning.preview_spin_speed * time.delta_secs());
    }
}
