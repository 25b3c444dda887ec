//! Level construction from data definitions.

use bevy::prelude::*;

use super::data::LevelDefinition;
use super::spawning::{spawn_goal, spawn_platform};
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::items::spawn_pickup;

/// Marker for every entity that belongs to the running level.
#[derive(Component)]
pub struct LevelGeometry;

/// Reaching this completes the level.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GoalZone {
    pub level: u32,
    pub radius: f32,
}

/// Build a level from a level definition.
///
/// Returns the player spawn position.
pub fn build_level_from_data(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
) -> Vec2 {
    for span in &level.platforms {
        let (center, size) = level.platform_rect(span);
        spawn_platform(commands, center, size);
    }

    let spawned = level
        .enemies
        .iter()
        .filter_map(|placement| spawn_enemy(commands, enemy_registry, &level.enemy_spawn(placement)))
        .count();

    for &((x, y), pickup) in &level.items {
        spawn_pickup(commands, pickup, level.grid_to_world(x, y));
    }

    if let Some((x, y)) = level.goal {
        spawn_goal(commands, level.grid_to_world(x, y), level.number, level.tile_size);
    } else {
        warn!("Level '{}' has no goal", level.name);
    }

    info!(
        "Built level '{}': {} platforms, {} enemies, {} items",
        level.name,
        level.platforms.len(),
        spawned,
        level.items.len()
    );

    let (x, y) = level.player_start;
    level.grid_to_world(x, y)
}
