//! Player plugin - input, movement and the melee attack.

use bevy::prelude::*;

use super::components::*;
use super::movement;

/// Player plugin - handles player input, movement and attacks.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);

        app.init_resource::<PlayerConfig>();
    }
}
