//! Combat-related components: the stat model, cooldowns and attack profiles.

use bevy::prelude::*;

use super::error::CombatError;

/// Health, movement speed and the alive flag of an actor.
///
/// All health mutation goes through [`Vitals::set_health`] (directly or via
/// damage/heal), which clamps into `[0, max_health]`. The stat model never
/// runs the death transition itself: callers check
/// [`HealthChange::crossed_zero`] and invoke
/// [`die`](super::die) exactly once.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Vitals {
    health: f32,
    max_health: f32,
    pub move_speed: f32,
    alive: bool,
}

/// Before/after health of a single mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChange {
    pub previous: f32,
    pub current: f32,
}

impl HealthChange {
    /// Health went from positive to zero with this change.
    pub fn crossed_zero(&self) -> bool {
        self.previous > 0.0 && self.current <= 0.0
    }

    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

impl Vitals {
    pub fn new(max_health: f32, move_speed: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            move_speed,
            alive: max_health > 0.0,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Store `value` clamped into `[0, max_health]`.
    ///
    /// A dead actor stays at zero until [`respawn`](Vitals::respawn).
    pub fn set_health(&mut self, value: f32) -> HealthChange {
        let previous = self.health;
        if !self.alive {
            return HealthChange {
                previous,
                current: previous,
            };
        }
        // NaN collapses to zero rather than poisoning the stat
        self.health = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max_health)
        };
        HealthChange {
            previous,
            current: self.health,
        }
    }

    pub fn apply_damage(&mut self, amount: f32) -> Result<HealthChange, CombatError> {
        check_magnitude("damage", amount)?;
        Ok(self.set_health(self.health - amount))
    }

    /// Restore health up to `max_health`. Dead actors are not revived.
    pub fn heal(&mut self, amount: f32) -> Result<HealthChange, CombatError> {
        check_magnitude("heal", amount)?;
        Ok(self.set_health(self.health + amount))
    }

    /// Flip to dead. Returns false if the actor was already dead.
    pub(crate) fn mark_dead(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.health = 0.0;
        true
    }

    /// Full health and alive again.
    pub fn respawn(&mut self) {
        self.health = self.max_health;
        self.alive = self.max_health > 0.0;
    }
}

fn check_magnitude(kind: &'static str, amount: f32) -> Result<(), CombatError> {
    if amount.is_nan() || amount < 0.0 {
        return Err(CombatError::InvalidArgument { kind, amount });
    }
    Ok(())
}

/// A decaying timer gating a repeatable action.
///
/// Passive data holder: it never refuses a [`trigger`](Cooldown::trigger);
/// callers check [`is_ready`](Cooldown::is_ready) first.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn tick(&mut self, delta: f32) {
        if delta > 0.0 {
            self.remaining = (self.remaining - delta).max(0.0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Basic attack parameters of an actor.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CombatProfile {
    pub attack_damage: u32,
    pub attack_range: f32,
    pub cooldown_duration: f32,
    pub cooldown: Cooldown,
}

impl CombatProfile {
    pub fn new(attack_damage: u32, attack_range: f32, cooldown_duration: f32) -> Self {
        Self {
            attack_damage,
            attack_range,
            cooldown_duration,
            cooldown: Cooldown::default(),
        }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Restart the cooldown after a successful attack.
    pub fn commit_attack(&mut self) {
        self.cooldown.trigger(self.cooldown_duration);
    }
}

/// Slain actor waiting to be despawned.
#[derive(Component, Debug)]
pub struct Corpse(pub Timer);

impl Default for Corpse {
    fn default() -> Self {
        Self(Timer::from_seconds(0.5, TimerMode::Once))
    }
}
