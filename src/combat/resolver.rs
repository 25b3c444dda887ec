//! Combat resolution - attack preconditions, damage application, death.
//!
//! Attacks are split in two so the ECS layer can defer damage to the
//! resolve phase: [`strike`] validates the attacker and produces a
//! [`Strike`], [`apply_strike`] lands it on a defender. [`resolve_attack`]
//! does both at once for callers that own both actors.

use bevy::prelude::*;

use super::components::{CombatProfile, HealthChange, Vitals};
use crate::core::{MetaState, Notifier, UiNotification};

/// A validated attack, ready to land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f32,
}

/// Why an attack attempt did not produce a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeRejected {
    AttackerDead,
    OnCooldown,
}

/// Result of landing a strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub change: HealthChange,
    /// This hit took the defender's health to zero; run the death transition.
    pub lethal: bool,
}

/// Check the attacker side of an attack.
///
/// The range check is the caller's job, since reach differs per actor shape.
/// The cooldown is not restarted here: an area attack strikes many targets
/// and commits once.
pub fn strike(attacker: &Vitals, profile: &CombatProfile) -> Result<Strike, StrikeRejected> {
    if !attacker.is_alive() {
        return Err(StrikeRejected::AttackerDead);
    }
    if !profile.can_attack() {
        return Err(StrikeRejected::OnCooldown);
    }
    Ok(Strike {
        damage: profile.attack_damage as f32,
    })
}

/// Land a strike on a defender.
pub fn apply_strike(defender: &mut Vitals, strike: Strike) -> Hit {
    // Strike damage comes from an unsigned attack stat, so it is never negative
    let change = defender.set_health(defender.health() - strike.damage.max(0.0));
    Hit {
        change,
        lethal: defender.is_alive() && change.crossed_zero(),
    }
}

/// Validate and land an attack in one step.
pub fn resolve_attack(
    attacker: &Vitals,
    profile: &CombatProfile,
    defender: &mut Vitals,
) -> Result<Hit, StrikeRejected> {
    strike(attacker, profile).map(|strike| apply_strike(defender, strike))
}

/// What the death transition needs to know about the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorRole {
    Enemy { score_value: u32 },
    Player { spawn: Vec2 },
}

/// What happened when an actor died.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathOutcome {
    /// The actor was already dead; nothing changed.
    AlreadyDead,
    /// An enemy died and its score value was awarded.
    Slain { score: u32 },
    /// The player lost a life and is back at full health; move it to `spawn`.
    Respawned { spawn: Vec2, lives: u32 },
    /// The player lost its last life and stays dead.
    GameOver,
}

/// Run the death transition for an actor.
///
/// Idempotent: calling it on an actor that is already dead changes nothing.
pub fn die<N: Notifier>(
    vitals: &mut Vitals,
    role: ActorRole,
    meta: &mut MetaState,
    notifier: &mut N,
) -> DeathOutcome {
    if !vitals.mark_dead() {
        return DeathOutcome::AlreadyDead;
    }

    match role {
        ActorRole::Enemy { score_value } => {
            let score = meta.add_score(score_value);
            notifier.notify(UiNotification::ScoreChanged(score));
            DeathOutcome::Slain { score }
        }
        ActorRole::Player { spawn } => {
            let lives = meta.lose_life();
            notifier.notify(UiNotification::LivesChanged(lives));
            if lives > 0 {
                vitals.respawn();
                DeathOutcome::Respawned { spawn, lives }
            } else {
                notifier.notify(UiNotification::GameOver);
                DeathOutcome::GameOver
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Vitals {
        Vitals::new(45.0, 2.5)
    }

    #[test]
    fn test_resolve_attack_applies_damage() {
        let attacker = Vitals::new(100.0, 5.0);
        let profile = CombatProfile::new(15, 1.5, 0.4);
        let mut defender = enemy();

        let hit = resolve_attack(&attacker, &profile, &mut defender).unwrap();
        assert_eq!(defender.health(), 30.0);
        assert!(!hit.lethal);
    }

    #[test]
    fn test_dead_attacker_cannot_strike() {
        let mut attacker = Vitals::new(100.0, 5.0);
        attacker.mark_dead();
        let profile = CombatProfile::new(15, 1.5, 0.4);
        assert_eq!(strike(&attacker, &profile), Err(StrikeRejected::AttackerDead));
    }

    #[test]
    fn test_cooldown_blocks_strike() {
        let attacker = Vitals::new(100.0, 5.0);
        let mut profile = CombatProfile::new(15, 1.5, 0.4);
        profile.commit_attack();
        assert_eq!(strike(&attacker, &profile), Err(StrikeRejected::OnCooldown));
    }

    #[test]
    fn test_lethal_hit_reported_once() {
        let attacker = Vitals::new(100.0, 5.0);
        let profile = CombatProfile::new(50, 1.5, 0.4);
        let mut defender = enemy();

        assert!(resolve_attack(&attacker, &profile, &mut defender).unwrap().lethal);
        assert!(!resolve_attack(&attacker, &profile, &mut defender).unwrap().lethal);
    }

    #[test]
    fn test_enemy_death_awards_score_once() {
        let mut meta = MetaState::default();
        let mut sink = Vec::new();
        let mut slime = enemy();

        let first = die(&mut slime, ActorRole::Enemy { score_value: 100 }, &mut meta, &mut sink);
        let second = die(&mut slime, ActorRole::Enemy { score_value: 100 }, &mut meta, &mut sink);

        assert_eq!(first, DeathOutcome::Slain { score: 100 });
        assert_eq!(second, DeathOutcome::AlreadyDead);
        assert_eq!(meta.score, 100);
        assert_eq!(sink, vec![UiNotification::ScoreChanged(100)]);
        assert!(!slime.is_alive());
    }

    #[test]
    fn test_player_with_last_life_stays_dead() {
        let mut meta = MetaState {
            lives: 1,
            ..default()
        };
        let mut sink = Vec::new();
        let mut player = Vitals::new(100.0, 5.0);
        player.apply_damage(100.0).unwrap();

        let role = ActorRole::Player { spawn: Vec2::ZERO };
        assert_eq!(die(&mut player, role, &mut meta, &mut sink), DeathOutcome::GameOver);
        assert_eq!(die(&mut player, role, &mut meta, &mut sink), DeathOutcome::AlreadyDead);

        assert_eq!(meta.lives, 0);
        assert!(!player.is_alive());
        assert_eq!(
            sink,
            vec![UiNotification::LivesChanged(0), UiNotification::GameOver]
        );
    }

    #[test]
    fn test_player_with_spare_life_respawns() {
        let mut meta = MetaState {
            lives: 2,
            ..default()
        };
        let mut sink = Vec::new();
        let mut player = Vitals::new(100.0, 5.0);
        player.apply_damage(120.0).unwrap();

        let spawn = Vec2::new(-3.0, 1.0);
        let outcome = die(&mut player, ActorRole::Player { spawn }, &mut meta, &mut sink);

        assert_eq!(outcome, DeathOutcome::Respawned { spawn, lives: 1 });
        assert_eq!(meta.lives, 1);
        assert!(player.is_alive());
        assert_eq!(player.health(), player.max_health());
    }
}
