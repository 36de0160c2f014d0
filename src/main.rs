use bevy::prelude::*;

use weapon_foundry::config::tuning::Tuning;
use weapon_foundry::plugins::{
    foundry_plugin::FoundryPlugin, game_plugin::GamePlugin, hud_plugin::HudPlugin,
    menu_plugin::MenuPlugin, storage_plugin::StoragePlugin,
};

fn main() {
    let tuning = Tuning::load_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Weapon Foundry".into(),
                resolution: (1440u32, 900u32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_seconds(tuning.dt as f64))
        .insert_resource(tuning)
        .add_plugins(GamePlugin)
        .add_plugins(MenuPlugin)
        .add_plugins(FoundryPlugin)
        .add_plugins(HudPlugin)
        .add_plugins(StoragePlugin)
        .run();
}
