use crate::game::blueprint::WeaponBlueprint;

/// Summary row for blueprint listings.
#[derive(Debug, Clone)]
pub struct BlueprintSummary {
    pub id: String,
    pub name: String,
    pub author: String,
    pub weapon_type: String,
}

/// Repository trait for blueprint persistence.
pub trait BlueprintRepository: Send + Sync {
    fn load_blueprint(&self, id: &str) -> Option<WeaponBlueprint>;
    fn save_blueprint(&self, blueprint: &WeaponBlueprint) -> Result<(), String>;
    fn list_blueprints(&self) -> Vec<BlueprintSummary>;
    fn delete_blueprint(&self, id: &str) -> Result<(), String>;
}
