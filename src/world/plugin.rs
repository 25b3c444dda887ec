//! World plugin - level loading, building, goal and cleanup.

use bevy::prelude::*;

use crate::combat::Vitals;
use crate::core::{left_level, GameState, LevelCompleteEvent, SimSet};
use crate::enemies::EnemyRegistry;
use crate::player::{spawn_player, Player, PlayerConfig};

use super::builder::{build_level_from_data, GoalZone, LevelGeometry};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(Update, cleanup_level.run_if(left_level))
            .add_systems(FixedUpdate, reach_goal.in_set(SimSet::Interact));
    }
}

/// Set up the level from data, unless it is already running (resume from pause).
pub fn setup_level(
    mut commands: Commands,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
    player_config: Res<PlayerConfig>,
    existing: Query<(), With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }

    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);
    let player_pos = build_level_from_data(&mut commands, level, &enemy_registry);
    spawn_player(&mut commands, player_pos, &player_config);
}

/// Clean up level entities once the game leaves the level behind.
fn cleanup_level(mut commands: Commands, level_query: Query<Entity, With<LevelGeometry>>) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Complete the level when the living player touches the goal.
pub fn reach_goal(
    mut commands: Commands,
    player_query: Query<(&Transform, &Vitals), With<Player>>,
    goal_query: Query<(Entity, &Transform, &GoalZone)>,
    mut completed: EventWriter<LevelCompleteEvent>,
) {
    let Ok((player_transform, vitals)) = player_query.get_single() else {
        return;
    };
    if !vitals.is_alive() {
        return;
    }
    let position = player_transform.translation.truncate();

    for (entity, transform, goal) in goal_query.iter() {
        if transform.translation.truncate().distance(position) <= goal.radius {
            completed.send(LevelCompleteEvent { level: goal.level });
            // One completion per goal
            commands.entity(entity).remove::<GoalZone>();
        }
    }
}
