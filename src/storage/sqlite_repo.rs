use bevy::prelude::*;
use sha2::{Digest, Sha256};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;

use super::repo::BlueprintSummary;
use crate::game::blueprint::WeaponBlueprint;

/// SQLite-backed blueprint repository. Wrapped by the storage plugin's
/// `Storage` resource, which adapts the async API to the blocking
/// `BlueprintRepository` trait used by the editor.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

impl SqliteRepo {
    pub async fn new(db_path: &PathBuf) -> Result<Self, sqlx::Error> {
        if let Some(parent) = db_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn save_blueprint_async(
        &self,
        blueprint: &WeaponBlueprint,
    ) -> Result<(), sqlx::Error> {
        let json = serde_json::to_string(blueprint).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let hash = hex::encode(hasher.finalize());

        let weapon_type = blueprint.weapon_type.display_name().to_lowercase();
        let now = unix_now();

        sqlx::query(
            r#"INSERT INTO blueprints (id, name, author, weapon_type, blueprint_json, hash, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   author = excluded.author,
                   weapon_type = excluded.weapon_type,
                   blueprint_json = excluded.blueprint_json,
                   hash = excluded.hash,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&blueprint.id)
        .bind(&blueprint.name)
        .bind(&blueprint.author)
        .bind(&weapon_type)
        .bind(&json)
        .bind(&hash)
        .bind(blueprint.created_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn load_blueprint_async(
        &self,
        id: &str,
    ) -> Result<Option<WeaponBlueprint>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as(r#"SELECT blueprint_json FROM blueprints WHERE id = ?"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(json,)| match serde_json::from_str(&json) {
            Ok(blueprint) => Some(blueprint),
            Err(e) => {
                warn!("Stored blueprint '{id}' failed to parse: {e}");
                None
            }
        }))
    }

    pub async fn list_blueprints_async(&self) -> Result<Vec<BlueprintSummary>, sqlx::Error> {
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            r#"SELECT id, name, author, weapon_type FROM blueprints ORDER BY updated_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, author, weapon_type)| BlueprintSummary {
                id,
                name,
                author,
                weapon_type,
            })
            .collect())
    }

    pub async fn delete_blueprint_async(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM blueprints WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
