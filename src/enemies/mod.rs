//! Enemies module - enemy variants, patrol, targeting and AI.

pub mod ai;
pub mod chase;
mod components;
pub mod data;
pub mod hover;
pub mod patrol;
mod plugin;
mod spawning;

pub use ai::{choose_attack, next_state, plan_movement, AttackChoice, MovementInput};
pub use chase::{chase, MotionProfile};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use hover::{HoverPattern, HoverSettings};
pub use patrol::{Arrival, PatrolPlan, PatrolStyle, WAYPOINT_EPSILON};
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemySpawn};
