//! Entity spawning functions for level construction.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::builder::{GoalZone, LevelGeometry};

const PLATFORM_COLOR: Color = Color::srgb(0.35, 0.3, 0.25);

/// Spawn a static platform collider.
pub fn spawn_platform(commands: &mut Commands, center: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Sprite::from_color(PLATFORM_COLOR, size),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            LevelGeometry,
        ))
        .id()
}

/// Spawn the level goal as a sensor flag.
pub fn spawn_goal(commands: &mut Commands, position: Vec2, level: u32, tile_size: f32) -> Entity {
    let size = Vec2::new(tile_size * 0.5, tile_size);
    commands
        .spawn((
            GoalZone {
                level,
                radius: tile_size * 0.75,
            },
            Sprite::from_color(Color::srgb(0.95, 0.95, 0.3), size),
            Transform::from_translation(position.extend(0.2)),
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            Sensor,
            LevelGeometry,
        ))
        .id()
}
