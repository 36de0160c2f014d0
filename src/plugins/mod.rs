pub mod foundry_plugin;
pub mod game_plugin;
pub mod hud_plugin;
pub mod menu_plugin;
pub mod storage_plugin;
