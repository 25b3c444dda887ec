//! Player module - player entity, input, movement and attacks.

pub mod actions;
mod components;
mod movement;
mod plugin;

pub use actions::{area_attack, AreaHit, AreaStrike, SpatialQuery};
pub use components::*;
pub use movement::{player_velocity, spawn_player, PlayerCamera};
pub use plugin::PlayerPlugin;
