//! World module - levels, platforms and the goal.

mod builder;
mod data;
mod error;
mod plugin;
mod spawning;

pub use builder::{build_level_from_data, GoalZone, LevelGeometry};
pub use data::{
    CurrentLevel, EnemyPlacement, LevelDefinition, LevelDefinitionRaw, LevelRegistry, PlatformSpan,
    TileDef,
};
pub use error::{data_key, read_ron_file, ron_files_in, DataLoadError};
pub use plugin::{reach_goal, setup_level, WorldPlugin};
