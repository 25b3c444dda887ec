//! Enemy plugin - registers definition loading and the AI systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::SimSet;

/// Enemy plugin - handles enemy definitions and AI.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(FixedUpdate, ai::ai_decide.in_set(SimSet::Decide))
            .add_systems(
                FixedUpdate,
                (ai::ai_move, ai::ai_attack).in_set(SimSet::Act),
            );
    }
}
