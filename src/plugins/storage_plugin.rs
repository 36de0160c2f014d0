use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::blueprint::WeaponBlueprint;
use crate::storage::repo::{BlueprintRepository, BlueprintSummary};
use crate::storage::sqlite_repo::SqliteRepo;

/// Owns the async repository plus the tokio runtime that drives it, and
/// adapts both to the blocking repository trait the editor screens use.
#[derive(Resource)]
pub struct Storage {
    rt: tokio::runtime::Runtime,
    repo: SqliteRepo,
}

impl BlueprintRepository for Storage {
    fn load_blueprint(&self, id: &str) -> Option<WeaponBlueprint> {
        match self.rt.block_on(self.repo.load_blueprint_async(id)) {
            Ok(blueprint) => blueprint,
            Err(e) => {
                error!("Failed to load blueprint '{id}': {e}");
                None
            }
        }
    }

    fn save_blueprint(&self, blueprint: &WeaponBlueprint) -> Result<(), String> {
        self.rt
            .block_on(self.repo.save_blueprint_async(blueprint))
            .map_err(|e| e.to_string())
    }

    fn list_blueprints(&self) -> Vec<BlueprintSummary> {
        match self.rt.block_on(self.repo.list_blueprints_async()) {
            Ok(list) => list,
            Err(e) => {
                error!("Failed to list blueprints: {e}");
                Vec::new()
            }
        }
    }

    fn delete_blueprint(&self, id: &str) -> Result<(), String> {
        self.rt
            .block_on(self.repo.delete_blueprint_async(id))
            .map_err(|e| e.to_string())
    }
}

pub struct StoragePlugin;

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_storage);
    }
}

fn init_storage(world: &mut World) {
    let db_path = Tuning::data_dir().join("foundry.db");
    info!("Initializing SQLite at {:?}", db_path);

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(SqliteRepo::new(&db_path)) {
        Ok(repo) => {
            info!("SQLite initialized successfully");
            world.insert_resource(Storage { rt, repo });
        }
        Err(e) => {
            // editor runs without persistence; save/load buttons degrade
            error!("Failed to initialize SQLite: {e}");
        }
    }
}
