use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::game::components::GamePhase;

// ── Colors ───────────────────────────────────────────────────────────

const COLOR_BG: Color = Color::srgba(0.08, 0.08, 0.12, 1.0);
const COLOR_BTN: Color = Color::srgba(0.18, 0.20, 0.28, 1.0);
const COLOR_BTN_HOVER: Color = Color::srgba(0.28, 0.32, 0.42, 1.0);
const COLOR_TEXT: Color = Color::WHITE;
const COLOR_TEXT_DIM: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);
const COLOR_ACCENT: Color = Color::srgba(0.2, 0.7, 1.0, 1.0);

// ── Marker components ────────────────────────────────────────────────

#[derive(Component)]
struct MainMenuRoot;

#[derive(Component)]
enum MenuButton {
    OpenFoundry,
    EnterRange,
    Quit,
}

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GamePhase::MainMenu), spawn_main_menu);
        app.add_systems(OnExit(GamePhase::MainMenu), despawn::<MainMenuRoot>);
        app.add_systems(
            Update,
            menu_button_system.run_if(in_state(GamePhase::MainMenu)),
        );
    }
}

fn despawn<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, button: MenuButton, label: &str) {
    parent
        .spawn((
            button,
            Button,
            Node {
                width: Val::Px(280.0),
                height: Val::Px(56.0),
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
                    font_size: 24.0,
                    ..default()
                },
                TextColor(COLOR_TEXT),
            ));
        });
}

fn spawn_main_menu(mut commands: Commands) {
    commands.spawn((MainMenuRoot, Camera2d));

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(COLOR_BG),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("WEAPON FOUNDRY"),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(COLOR_ACCENT),
            ));
            parent.spawn((
                Text::new("assemble, validate, take it to the range"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(COLOR_TEXT_DIM),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            spawn_button(parent, MenuButton::OpenFoundry, "Foundry");
            spawn_button(parent, MenuButton::EnterRange, "Training Range");
            spawn_button(parent, MenuButton::Quit, "Quit");
        });
}

fn menu_button_system(
    mut interactions: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut next_state: ResMut<NextState<GamePhase>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button, mut bg) in &mut interactions {
        match interaction {
            Interaction::Pressed => match button {
                MenuButton::OpenFoundry => next_state.set(GamePhase::Foundry),
                MenuButton::EnterRange => next_state.set(GamePhase::Range),
                MenuButton::Quit => {
                    exit.write(AppExit::Success);
                }
            },
            Interaction::Hovered => *bg = BackgroundColor(COLOR_BTN_HOVER),
            Interaction::None => *bg = BackgroundColor(COLOR_BTN),
        }
    }
}
