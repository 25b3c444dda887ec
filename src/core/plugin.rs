//! Core plugin that sets up game states, events, and the simulation schedule.

use bevy::prelude::*;

use super::events::*;
use super::meta::MetaState;
use super::schedule::{FrameSet, SimSet};
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (DamageEvent, DeathEvent, UiNotification, etc.)
/// - The fixed and frame system sets, gated on `InGame`
/// - Game flow systems (pause, game over, level complete)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Process-wide progress; replaced by the save slot on startup
            .init_resource::<MetaState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<KnockbackEvent>()
            .add_event::<AnimationTrigger>()
            .add_event::<AudioCue>()
            .add_event::<UiNotification>()
            .add_event::<LevelCompleteEvent>()
            .add_event::<SaveRequest>()

            // Simulation ordering
            .configure_sets(
                FixedUpdate,
                SimSet::phases().run_if(in_state(GameState::InGame)),
            )
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Bookkeeping)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Loading state - data files are read in Startup, so move on
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )

            // Outcomes surfaced by the simulation
            .add_systems(
                Update,
                (enter_game_over, enter_level_complete).run_if(in_state(GameState::InGame)),
            );
    }
}

/// Immediately transition from Loading to MainMenu.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Switch to the game over screen once the player is out of lives.
fn enter_game_over(
    mut notifications: EventReader<UiNotification>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if notifications
        .read()
        .any(|notification| *notification == UiNotification::GameOver)
    {
        info!("Player is out of lives. Transitioning to Game Over...");
        next_state.set(GameState::GameOver);
    }
}

/// Switch to the level complete screen when the goal is reached.
fn enter_level_complete(
    mut completed: EventReader<LevelCompleteEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(event) = completed.read().last() {
        info!("Level {} complete", event.level);
        next_state.set(GameState::LevelComplete);
    }
}
