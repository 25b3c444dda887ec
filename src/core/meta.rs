//! Process-wide game progress and the notification sink that reports it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::events::UiNotification;

/// Lives granted at the start of every run.
pub const DEFAULT_LIVES: u32 = 3;

/// Name used until the player picks one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

fn default_volume() -> f32 {
    1.0
}

/// Score, lives and high score shared by every actor.
///
/// Mutated only during [`SimSet::Consequences`](super::SimSet::Consequences),
/// [`SimSet::Interact`](super::SimSet::Interact)
/// and at explicit save points; persisted by the persistence plugin.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaState {
    pub score: u32,
    pub lives: u32,
    pub high_score: u32,
    pub player_name: String,
    #[serde(default = "default_volume")]
    pub music_volume: f32,
    #[serde(default = "default_volume")]
    pub sfx_volume: f32,
}

impl Default for MetaState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: DEFAULT_LIVES,
            high_score: 0,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            music_volume: default_volume(),
            sfx_volume: default_volume(),
        }
    }
}

impl MetaState {
    /// Add points and return the new score.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Remove one life and return how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Record a finished level. Returns true when the high score was beaten.
    pub fn complete_level(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Reset the per-run counters, keeping high score, name and settings.
    pub fn start_run(&mut self) {
        self.score = 0;
        self.lives = DEFAULT_LIVES;
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

/// Fire-and-forget sink for [`UiNotification`]s.
///
/// The combat core reports through this instead of reaching for a global UI,
/// so it can be driven with a plain `Vec` in tests.
pub trait Notifier {
    fn notify(&mut self, notification: UiNotification);
}

impl Notifier for Vec<UiNotification> {
    fn notify(&mut self, notification: UiNotification) {
        self.push(notification);
    }
}

impl Notifier for EventWriter<'_, UiNotification> {
    fn notify(&mut self, notification: UiNotification) {
        self.send(notification);
    }
}
