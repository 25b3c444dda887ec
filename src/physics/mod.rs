//! Physics module - ground probes, desired velocity and knockback.

mod components;
mod plugin;
pub mod systems;

pub use components::*;
pub use plugin::PhysicsAdapterPlugin;
