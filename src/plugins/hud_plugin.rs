use bevy::prelude::*;

use crate::game::combat::AmmoState;
use crate::game::components::{GamePhase, Health, InRange, PlayerRig};
use crate::game::enemy::Enemy;
use crate::game::weapon::{AssembledWeapon, CurrentWeapon};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GamePhase::Range), setup_hud);
        app.add_systems(
            Update,
            (update_ammo_display, update_status_display).run_if(in_state(GamePhase::Range)),
        );
    }
}

#[derive(Component)]
struct AmmoText;

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct Crosshair;

fn setup_hud(mut commands: Commands) {
    // crosshair
    commands
        .spawn((
            InRange,
            Crosshair,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                width: Val::Px(4.0),
                height: Val::Px(4.0),
                margin: UiRect {
                    left: Val::Px(-2.0),
                    top: Val::Px(-2.0),
                    ..default()
                },
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.9)),
        ));

    commands
        .spawn((
            InRange,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexEnd,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                AmmoText,
                Text::new("-- / --"),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    commands
        .spawn((
            InRange,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                StatusText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.2)),
            ));
        });
}

fn update_ammo_display(
    players: Query<(&AmmoState, &CurrentWeapon), With<PlayerRig>>,
    weapons: Query<&AssembledWeapon>,
    mut texts: Query<&mut Text, With<AmmoText>>,
) {
    let Ok((ammo, current)) = players.single() else {
        return;
    };
    let weapon_name = weapons
        .get(current.0)
        .map(|w| w.blueprint.name.clone())
        .unwrap_or_else(|_| "?".into());

    for mut text in &mut texts {
        **text = if ammo.is_reloading() {
            format!("{}\nreloading...", weapon_name)
        } else {
            format!("{}\n{} / {}", weapon_name, ammo.current, ammo.reserve)
        };
    }
}

fn update_status_display(
    players: Query<&Health, With<PlayerRig>>,
    enemies: Query<&Enemy>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    let hp = players.single().map(|h| h.current).unwrap_or(0.0);
    let remaining = enemies.iter().count();

    for mut text in &mut texts {
        **text = format!("HP: {:.0}   enemies: {}", hp, remaining);
    }
}
