//! Physics plugin - bridges simulation intent and rapier bodies.

use bevy::prelude::*;

use super::systems;

pub struct PhysicsAdapterPlugin;

impl Plugin for PhysicsAdapterPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_physics_systems(app);
    }
}
