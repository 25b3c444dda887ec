//! Enemy-related components.

use bevy::prelude::*;

use super::hover::HoverPattern;
use super::patrol::{Arrival, PatrolPlan};
use crate::combat::Cooldown;
use crate::physics::Locomotion;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches the definition name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Points awarded when this enemy dies.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreValue(pub u32);

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Following the patrol route.
    #[default]
    Patrolling,
    /// Moving toward the player.
    Chasing,
    /// Standing still and attacking.
    Attacking,
}

/// Distance thresholds driving AI transitions.
///
/// `lose_chase_range >= chase_range` always holds; the band between them is
/// the hysteresis gap where the current state is kept.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct EngageRanges {
    attack_range: f32,
    chase_range: f32,
    lose_chase_range: f32,
}

impl EngageRanges {
    pub fn new(attack_range: f32, chase_range: f32, lose_chase_range: f32) -> Self {
        if lose_chase_range < chase_range {
            warn!(
                "lose_chase_range {} below chase_range {}; raising it to avoid flapping",
                lose_chase_range, chase_range
            );
        }
        Self {
            attack_range,
            chase_range,
            lose_chase_range: lose_chase_range.max(chase_range),
        }
    }

    pub fn attack_range(&self) -> f32 {
        self.attack_range
    }

    pub fn chase_range(&self) -> f32 {
        self.chase_range
    }

    pub fn lose_chase_range(&self) -> f32 {
        self.lose_chase_range
    }
}

/// Where a patrolling enemy goes.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum PatrolRoute {
    /// Fixed waypoint list.
    Waypoints(PatrolPlan),
    /// Virtual waypoints around an anchor, with a vertical bob.
    Hover(HoverPattern),
}

impl PatrolRoute {
    pub fn tick(&mut self, delta: f32) {
        if let PatrolRoute::Hover(hover) = self {
            hover.tick(delta);
        }
    }

    /// Point to move toward this tick, or `None` to hold position.
    pub fn next_target(
        &mut self,
        position: Vec2,
        ledge_detected: bool,
        locomotion: Locomotion,
    ) -> Option<Vec2> {
        match self {
            PatrolRoute::Waypoints(plan) => {
                let arrival = match locomotion {
                    Locomotion::Ground => Arrival::Horizontal,
                    Locomotion::Flying => Arrival::Planar,
                };
                plan.advance(position, ledge_detected, arrival)
            }
            PatrolRoute::Hover(hover) => Some(hover.advance(position, ledge_detected)),
        }
    }
}

/// Heavy attack with its own cooldown and extended reach.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpecialAttack {
    pub damage: u32,
    /// Reach as a multiple of the basic attack range.
    pub range_multiplier: f32,
    pub cooldown_duration: f32,
    pub cooldown: Cooldown,
}

impl SpecialAttack {
    pub fn new(damage: u32, range_multiplier: f32, cooldown_duration: f32) -> Self {
        Self {
            damage,
            range_multiplier,
            cooldown_duration,
            cooldown: Cooldown::default(),
        }
    }

    pub fn reach(&self, attack_range: f32) -> f32 {
        attack_range * self.range_multiplier
    }
}
