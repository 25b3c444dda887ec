//! System sets that give the simulation its two-phase tick.

use bevy::prelude::*;

/// Fixed-step phases, chained in this order inside `FixedUpdate`.
///
/// Within one tick every AI transition is decided before movement or attacks
/// run, and every hit is applied before any death touches [`MetaState`].
///
/// [`MetaState`]: super::MetaState
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Read collaborator inputs: grounded and ledge probes.
    Sense,
    /// Evaluate AI state transitions.
    Decide,
    /// Desired velocities and attack attempts.
    Act,
    /// Apply damage from this tick's attacks.
    Resolve,
    /// Death transitions, score, lives, respawn.
    Consequences,
    /// Pickups and goals, once every death of the tick has settled.
    Interact,
    /// Hand velocities and facing back to physics and rendering.
    Output,
}

impl SimSet {
    /// All phases chained in tick order.
    pub fn phases() -> impl IntoSystemSetConfigs {
        (
            SimSet::Sense,
            SimSet::Decide,
            SimSet::Act,
            SimSet::Resolve,
            SimSet::Consequences,
            SimSet::Interact,
            SimSet::Output,
        )
            .chain()
    }
}

/// Variable-step phases inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Device input captured into intents.
    Input,
    /// Cooldown decay and timers.
    Bookkeeping,
}
