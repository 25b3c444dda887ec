//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Where the player comes back after losing a life.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);

/// Input latched between frame ticks and consumed by the fixed tick.
///
/// `jump` and `attack` stay set until a fixed tick acts on them, so a press
/// between two fixed steps is never lost.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal input in `[-1, 1]`.
    pub axis: f32,
    pub jump: bool,
    pub attack: bool,
}

/// Tunables for the player character.
#[derive(Resource, Debug, Clone)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Upward velocity on jump
    pub jump_speed: f32,
    pub attack_damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Speed given to struck enemies
    pub knockback_speed: f32,
    pub size: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 5.0,
            jump_speed: 10.0,
            attack_damage: 15,
            attack_range: 1.5,
            attack_cooldown: 0.4,
            knockback_speed: 4.0,
            size: Vec2::new(0.8, 1.2),
        }
    }
}
