use std::collections::HashMap;

use bevy::prelude::*;

use crate::resources::ArenaConfig;

/// Texture key of the ship sprite.
pub const SHIP_TEXTURE: &str = "ship";

/// Image handles keyed by the texture names the weapons and HUD ask for.
/// Keys map to `sprites/<key>.png`.
#[derive(Resource, Debug)]
pub struct ArenaAssets {
    textures: HashMap<String, Handle<Image>>,
}

impl ArenaAssets {
    /// No textures at all; every lookup yields the default image.
    pub fn empty() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, handle: Handle<Image>) {
        self.textures.insert(key.into(), handle);
    }

    /// Handle for `key`, or the default image when the key was never loaded.
    pub fn texture(&self, key: &str) -> Handle<Image> {
        match self.textures.get(key) {
            Some(handle) => handle.clone(),
            None => {
                warn!("No texture loaded for '{}'", key);
                Handle::default()
            }
        }
    }

    /// Every texture key the arena may request with the given config.
    pub fn keys_for(config: &ArenaConfig) -> Vec<String> {
        let weapons = &config.weapons;
        let mut keys = vec![
            SHIP_TEXTURE.to_string(),
            weapons.laser_texture.clone(),
            weapons.meteor_texture.clone(),
        ];
        keys.extend(
            (0..=weapons.meteor_ammo)
                .map(|level| crate::components::meteor_indicator_key(&weapons.meteor_indicator_prefix, level)),
        );
        keys.sort();
        keys.dedup();
        keys
    }
}

impl FromWorld for ArenaAssets {
    fn from_world(world: &mut World) -> Self {
        let keys = ArenaAssets::keys_for(world.resource::<ArenaConfig>());
        let asset_server = world.resource::<AssetServer>();
        let mut assets = ArenaAssets::empty();
        for key in keys {
            let handle = asset_server.load(format!("sprites/{}.png", key));
            assets.insert(key, handle);
        }
        assets
    }
}
