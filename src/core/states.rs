//! Game state definitions that control the overall flow of the game.
//!
//! The simulation sets only run while the game is `InGame`; every other
//! state freezes actors in place while menus are shown on top.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `Loading` to read data files and the save slot
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run or retries
/// - `Paused` freezes gameplay but keeps the level alive
/// - `LevelComplete` when the player reaches the goal
/// - `GameOver` when the player runs out of lives
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Goal reached, high score updated and saved
    LevelComplete,
    /// Player has no lives left
    GameOver,
}

impl GameState {
    /// Whether the level entities should stay spawned in this state.
    pub fn keeps_level(&self) -> bool {
        matches!(self, GameState::InGame | GameState::Paused)
    }
}

/// Run condition: the last state change left the level behind.
///
/// Pausing keeps the level; anything else leaving `InGame`/`Paused` does not.
pub fn left_level(mut transitions: EventReader<StateTransitionEvent<GameState>>) -> bool {
    transitions.read().any(|transition| {
        let exited_level = transition.exited.is_some_and(|state| state.keeps_level());
        let entered_level = transition.entered.is_some_and(|state| state.keeps_level());
        exited_level && !entered_level
    })
}
