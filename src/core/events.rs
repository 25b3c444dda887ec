//! Global events used for cross-system communication.
//!
//! Events are the collaborator boundary of the simulation: the combat core
//! writes damage and death events for itself, and fire-and-forget commands
//! (animation, audio, UI, knockback) for the adapters that own rendering,
//! sound, widgets and physics. Nothing here expects an acknowledgment.

use bevy::prelude::*;

/// Sent when an attack connects with a target.
///
/// Attack attempts only produce these; the damage itself is applied in
/// [`SimSet::Resolve`](super::SimSet::Resolve) so every hit of a tick lands
/// before any death side effect runs.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount, never negative
    pub amount: f32,
}

/// Sent when an entity's health crosses zero.
///
/// Consumed exactly once by the death transition in
/// [`SimSet::Consequences`](super::SimSet::Consequences).
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Knockback command for the physics adapter.
#[derive(Event, Debug, Clone, Copy)]
pub struct KnockbackEvent {
    pub target: Entity,
    /// Velocity to impose while the target is staggered
    pub impulse: Vec2,
}

/// Named animation trigger, e.g. `"attack"`.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationTrigger {
    pub entity: Entity,
    pub name: &'static str,
}

/// Sound effects the simulation asks the audio adapter to play.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PlayerAttack,
    EnemyAttack,
    BossSpecial,
    Hurt,
    EnemyDeath,
    PlayerDeath,
    Jump,
    Pickup,
}

/// Scalar updates for whatever displays game progress.
///
/// Each change is reported exactly once, carrying the new value.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum UiNotification {
    ScoreChanged(u32),
    LivesChanged(u32),
    HighScoreChanged(u32),
    HealthChanged {
        entity: Entity,
        current: f32,
        max: f32,
    },
    /// Lives are exhausted; the player stays dead.
    GameOver,
}

/// Sent when the player reaches the level goal.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCompleteEvent {
    pub level: u32,
}

/// Explicit save points handled by the persistence plugin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequest {
    /// Write the current progress (manual save or level completion).
    Save,
    /// Delete stored progress and reset to defaults.
    Clear,
}
