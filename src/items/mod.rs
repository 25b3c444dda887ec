//! Items module - coins and health potions.

mod pickup;
mod plugin;

pub use pickup::{collect, collect_pickups, spawn_pickup, Pickup, PickupOutcome};
pub use plugin::ItemPlugin;
