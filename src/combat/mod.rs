//! Combat module - stats, cooldowns, attack resolution and death.

mod components;
mod error;
mod plugin;
mod resolver;
pub mod systems;

pub use components::*;
pub use error::CombatError;
pub use plugin::CombatPlugin;
pub use resolver::{
    apply_strike, die, resolve_attack, strike, ActorRole, DeathOutcome, Hit, Strike,
    StrikeRejected,
};
