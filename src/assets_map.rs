use bevy::prelude::*;
use std::collections::HashMap;

/// Maps skin ids to UI swatch colors for the foundry screens.
#[derive(Resource, Default)]
pub struct AssetsMap {
    pub skin_swatches: HashMap<String, Color>,
}

impl AssetsMap {
    pub fn with_defaults() -> Self {
        let mut map = HashMap::new();
        map.insert("default".into(), Color::srgb(0.16, 0.16, 0.16));
        map.insert("flux".into(), Color::srgb(0.0, 0.6, 1.0));
        map.insert("gaia".into(), Color::srgb(0.29, 0.21, 0.13));
        map.insert("voxel".into(), Color::srgb(1.0, 0.0, 1.0));
        map.insert("zebra".into(), Color::srgb(0.9, 0.9, 0.9));
        map.insert("slash".into(), Color::srgb(1.0, 0.0, 0.0));
        Self { skin_swatches: map }
    }

    pub fn swatch(&self, skin_id: &str) -> Color {
        self.skin_swatches
            .get(skin_id)
            .copied()
            .unwrap_or(Color::srgb(0.5, 0.5, 0.5))
    }
}
