//! Slime Siege - a 2D side-scrolling action platformer in Bevy.
//!
//! The player fights slimes, flyers and a boss across tile-based levels,
//! collecting coins and potions on the way to each level's goal.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, run progress, tick schedule
//! - **Physics**: Ground probes, facing and velocity hand-off to Rapier
//! - **Player**: Input, movement, area attacks
//! - **Combat**: Stats, cooldowns, damage and death
//! - **Enemies**: Patrol, chase and the AI state machine
//! - **Items**: Coins and health potions
//! - **World**: Level data, building and goals
//! - **Persistence**: Saving and loading run progress
//! - **Rendering**: Sprite feedback
//! - **Audio**: Sound effects and music
//! - **UI**: Menus and HUD

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod persistence;
pub mod physics;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SlimeSiegePlugin;

impl Plugin for SlimeSiegePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Physics hand-off
            .add_plugins(physics::PhysicsAdapterPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Pickups
            .add_plugins(items::ItemPlugin)

            // Save data
            .add_plugins(persistence::PersistencePlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // Audio
            .add_plugins(audio::GameAudioPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
