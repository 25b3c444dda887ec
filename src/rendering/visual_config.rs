//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking colors and feedback timings without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::world::read_ron_file;

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub clear_color: (f32, f32, f32),
    /// Tint shown briefly when an actor is hurt.
    pub hurt_color: (f32, f32, f32),
    /// Tint shown briefly when an actor attacks.
    pub attack_color: (f32, f32, f32),
    pub flash_secs: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: (0.45, 0.65, 0.85),
            hurt_color: (1.0, 0.3, 0.3),
            attack_color: (1.0, 1.0, 1.0),
            flash_secs: 0.15,
        }
    }
}

impl VisualConfig {
    pub const PATH: &'static str = "assets/data/rendering/visual_config.ron";

    /// Load visual config from RON file, falling back to defaults.
    pub fn load() -> Self {
        match read_ron_file(Path::new(Self::PATH)) {
            Ok(config) => {
                info!("Loaded visual config from {}", Self::PATH);
                config
            }
            Err(e) => {
                warn!("{}. Using default visuals.", e);
                Self::default()
            }
        }
    }

    /// Flash tint for an animation trigger, if it has one.
    pub fn flash_color(&self, trigger: &str) -> Option<Color> {
        let (r, g, b) = match trigger {
            "hurt" => self.hurt_color,
            "attack" | "special" => self.attack_color,
            _ => return None,
        };
        Some(Color::srgb(r, g, b))
    }
}

/// System to load visual config at startup.
pub fn load_visual_config(mut commands: Commands) {
    let config = VisualConfig::load();
    let (r, g, b) = config.clear_color;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));
    commands.insert_resource(config);
}
