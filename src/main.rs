//! Slime Siege - Entry Point
//!
//! Controls:
//! - A/D or Arrows: Move
//! - Space: Jump
//! - J: Attack
//! - F5: Save progress
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins; kira replaces the built-in audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Slime Siege".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(slime_siege::SlimeSiegePlugin)

        .run();
}
