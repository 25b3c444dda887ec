//! Components exchanged between the simulation and the physics adapter.

use bevy::prelude::*;
use serde::Deserialize;

/// How an actor moves through the level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Locomotion {
    /// Walks on platforms; gravity owns the vertical axis.
    #[default]
    Ground,
    /// Flies; both axes are driven directly.
    Flying,
}

/// Velocity the simulation wants this tick.
///
/// `vertical: None` leaves the vertical axis to physics (gravity, jumps in
/// flight), which is how ground actors move.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct DesiredVelocity {
    pub horizontal: f32,
    pub vertical: Option<f32>,
}

impl DesiredVelocity {
    /// Zero velocity for the given locomotion.
    pub fn hold(locomotion: Locomotion) -> Self {
        match locomotion {
            Locomotion::Ground => Self {
                horizontal: 0.0,
                vertical: None,
            },
            Locomotion::Flying => Self {
                horizontal: 0.0,
                vertical: Some(0.0),
            },
        }
    }

    pub fn is_still(&self) -> bool {
        self.horizontal == 0.0 && self.vertical.map_or(true, |vertical| vertical == 0.0)
    }
}

/// Whether the actor stands on ground, written by the ground probe.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

impl Default for Grounded {
    fn default() -> Self {
        Self(true)
    }
}

/// Whether there is a drop just ahead of the actor's feet.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgeAhead(pub bool);

/// Horizontal facing, derived from the sign of horizontal movement.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing implied by a horizontal velocity, if it is moving at all.
    pub fn from_horizontal(horizontal: f32) -> Option<Self> {
        if horizontal > f32::EPSILON {
            Some(Facing::Right)
        } else if horizontal < -f32::EPSILON {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Ray probe geometry for ground and ledge checks.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundProbe {
    /// Distance from the body's center to its feet.
    pub half_height: f32,
    /// How far below the feet counts as ground.
    pub reach: f32,
    /// Horizontal offset of the ledge ray ahead of the body, if ledges matter.
    pub ledge_lookahead: Option<f32>,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            reach: 0.15,
            ledge_lookahead: None,
        }
    }
}

/// Knockback in progress; overrides the desired velocity until it runs out.
#[derive(Component, Debug, Clone)]
pub struct Stagger {
    pub impulse: Vec2,
    pub timer: Timer,
}

impl Stagger {
    pub fn new(impulse: Vec2) -> Self {
        Self {
            impulse,
            timer: Timer::from_seconds(0.2, TimerMode::Once),
        }
    }
}
