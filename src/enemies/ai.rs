//! Enemy AI - the Patrol/Chase/Attack state machine and its systems.

use bevy::prelude::*;

use super::chase::{chase, MotionProfile};
use super::components::{AiState, EngageRanges, Enemy, PatrolRoute, SpecialAttack};
use crate::combat::{strike, CombatProfile, Vitals};
use crate::core::{AnimationTrigger, AudioCue, DamageEvent};
use crate::physics::{DesiredVelocity, Grounded, LedgeAhead, Locomotion};
use crate::player::Player;

/// Decide the next AI state from the distance to the target.
///
/// Ground enemies only engage while grounded. Inside the hysteresis gap the
/// current state is kept, except that an attack in progress falls back to
/// chasing once the target is out of reach.
pub fn next_state(
    current: AiState,
    distance: Option<f32>,
    grounded: bool,
    locomotion: Locomotion,
    ranges: &EngageRanges,
) -> AiState {
    let Some(distance) = distance else {
        return AiState::Patrolling;
    };
    if locomotion == Locomotion::Ground && !grounded {
        return AiState::Patrolling;
    }

    let within_chase = match locomotion {
        Locomotion::Ground => distance < ranges.chase_range(),
        Locomotion::Flying => distance <= ranges.chase_range(),
    };

    if distance <= ranges.attack_range() {
        AiState::Attacking
    } else if within_chase {
        AiState::Chasing
    } else if distance > ranges.lose_chase_range() {
        AiState::Patrolling
    } else {
        match current {
            AiState::Attacking => AiState::Chasing,
            held => held,
        }
    }
}

/// Everything the movement step reads about one enemy.
#[derive(Debug, Clone, Copy)]
pub struct MovementInput {
    pub state: AiState,
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub move_speed: f32,
    pub locomotion: Locomotion,
    pub grounded: bool,
    pub ledge_ahead: bool,
}

/// Desired velocity for the current AI state.
///
/// Missing data degrades to holding position: no route, no target, or a
/// chase with nobody to chase.
pub fn plan_movement(
    input: MovementInput,
    motion: &MotionProfile,
    route: Option<&mut PatrolRoute>,
) -> DesiredVelocity {
    let hold = DesiredVelocity::hold(input.locomotion);

    match input.state {
        AiState::Attacking => hold,
        AiState::Chasing => input.target.map_or(hold, |target| {
            chase(
                input.position,
                target,
                input.move_speed,
                motion,
                input.locomotion,
                input.grounded,
            )
        }),
        AiState::Patrolling => {
            let Some(route) = route else {
                return hold;
            };
            let Some(waypoint) =
                route.next_target(input.position, input.ledge_ahead, input.locomotion)
            else {
                return hold;
            };
            chase(
                input.position,
                waypoint,
                motion.patrol_speed(input.move_speed),
                motion,
                input.locomotion,
                input.grounded,
            )
        }
    }
}

/// Which attack an enemy should attempt this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackChoice {
    Special,
    Basic,
    Hold,
}

/// Pick an attack for an engaged enemy.
///
/// The special attack fires whenever it is ready and in its longer reach;
/// the basic attack only while in the `Attacking` state and off cooldown.
pub fn choose_attack(
    state: AiState,
    distance: f32,
    profile: &CombatProfile,
    special: Option<&SpecialAttack>,
) -> AttackChoice {
    if state == AiState::Patrolling {
        return AttackChoice::Hold;
    }
    if let Some(special) = special {
        if special.cooldown.is_ready() && distance <= special.reach(profile.attack_range) {
            return AttackChoice::Special;
        }
    }
    if state == AiState::Attacking && distance <= profile.attack_range && profile.can_attack() {
        return AttackChoice::Basic;
    }
    AttackChoice::Hold
}

type PlayerTargetQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static Vitals), (With<Player>, Without<Enemy>)>;

/// Player position, if there is a living player to track.
fn living_target(player_query: &PlayerTargetQuery) -> Option<(Entity, Vec2)> {
    let Ok((entity, transform, vitals)) = player_query.get_single() else {
        return None;
    };
    vitals
        .is_alive()
        .then(|| (entity, transform.translation.truncate()))
}

/// Evaluate state transitions for every living enemy.
pub fn ai_decide(
    player_query: PlayerTargetQuery,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &Vitals,
            &EngageRanges,
            &Locomotion,
            Option<&Grounded>,
            &mut AiState,
        ),
        With<Enemy>,
    >,
) {
    let target = living_target(&player_query).map(|(_, position)| position);

    for (entity, transform, vitals, ranges, locomotion, grounded, mut ai_state) in
        enemy_query.iter_mut()
    {
        if !vitals.is_alive() {
            continue;
        }

        let position = transform.translation.truncate();
        let distance = target.map(|target| position.distance(target));
        let grounded = grounded.map_or(true, |grounded| grounded.0);
        let next = next_state(*ai_state, distance, grounded, *locomotion, ranges);

        if next != *ai_state {
            debug!("Enemy {:?}: {:?} -> {:?}", entity, *ai_state, next);
            *ai_state = next;
        }
    }
}

/// Turn each enemy's state into a desired velocity.
pub fn ai_move(
    time: Res<Time>,
    player_query: PlayerTargetQuery,
    mut enemy_query: Query<
        (
            &Transform,
            &Vitals,
            &AiState,
            &Locomotion,
            &MotionProfile,
            Option<&Grounded>,
            Option<&LedgeAhead>,
            Option<&mut PatrolRoute>,
            &mut DesiredVelocity,
        ),
        With<Enemy>,
    >,
) {
    let target = living_target(&player_query).map(|(_, position)| position);
    let delta = time.delta_secs();

    for (transform, vitals, state, locomotion, motion, grounded, ledge, mut route, mut desired) in
        enemy_query.iter_mut()
    {
        if !vitals.is_alive() {
            *desired = DesiredVelocity::hold(*locomotion);
            continue;
        }

        if let Some(route) = route.as_mut() {
            route.tick(delta);
        }

        let input = MovementInput {
            state: *state,
            position: transform.translation.truncate(),
            target,
            move_speed: vitals.move_speed,
            locomotion: *locomotion,
            grounded: grounded.map_or(true, |grounded| grounded.0),
            ledge_ahead: ledge.is_some_and(|ledge| ledge.0),
        };
        *desired = plan_movement(input, motion, route.as_deref_mut());
    }
}

/// Attempt attacks for engaged enemies, gated by cooldowns.
pub fn ai_attack(
    player_query: PlayerTargetQuery,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &Vitals,
            &AiState,
            &mut CombatProfile,
            Option<&mut SpecialAttack>,
        ),
        With<Enemy>,
    >,
    mut damage_events: EventWriter<DamageEvent>,
    mut animations: EventWriter<AnimationTrigger>,
    mut audio: EventWriter<AudioCue>,
) {
    let Some((player, target)) = living_target(&player_query) else {
        return;
    };

    for (entity, transform, vitals, state, mut profile, mut special) in enemy_query.iter_mut() {
        if !vitals.is_alive() {
            continue;
        }
        let distance = transform.translation.truncate().distance(target);

        match choose_attack(*state, distance, &profile, special.as_deref()) {
            AttackChoice::Special => {
                let Some(special) = special.as_mut() else {
                    continue;
                };
                debug!("Enemy {:?} uses its special attack", entity);
                damage_events.send(DamageEvent {
                    target: player,
                    source: entity,
                    amount: special.damage as f32,
                });
                let duration = special.cooldown_duration;
                special.cooldown.trigger(duration);
                animations.send(AnimationTrigger {
                    entity,
                    name: "special",
                });
                audio.send(AudioCue::BossSpecial);
            }
            AttackChoice::Basic => {
                let Ok(blow) = strike(vitals, &profile) else {
                    continue;
                };
                damage_events.send(DamageEvent {
                    target: player,
                    source: entity,
                    amount: blow.damage,
                });
                profile.commit_attack();
                animations.send(AnimationTrigger {
                    entity,
                    name: "attack",
                });
                audio.send(AudioCue::EnemyAttack);
            }
            AttackChoice::Hold => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::patrol::{PatrolPlan, PatrolStyle};

    fn ranges() -> EngageRanges {
        EngageRanges::new(2.0, 5.0, 6.0)
    }

    fn ground(current: AiState, distance: f32) -> AiState {
        next_state(current, Some(distance), true, Locomotion::Ground, &ranges())
    }

    #[test]
    fn test_hysteresis_band() {
        assert_eq!(ground(AiState::Patrolling, 5.5), AiState::Patrolling);
        assert_eq!(ground(AiState::Chasing, 5.5), AiState::Chasing);
        assert_eq!(ground(AiState::Patrolling, 4.0), AiState::Chasing);
        assert_eq!(ground(AiState::Chasing, 7.0), AiState::Patrolling);
    }

    #[test]
    fn test_attack_range_wins() {
        assert_eq!(ground(AiState::Patrolling, 1.5), AiState::Attacking);
        assert_eq!(ground(AiState::Chasing, 2.0), AiState::Attacking);
    }

    #[test]
    fn test_attack_in_gap_falls_back_to_chase() {
        assert_eq!(ground(AiState::Attacking, 5.5), AiState::Chasing);
        assert_eq!(ground(AiState::Attacking, 3.0), AiState::Chasing);
    }

    #[test]
    fn test_ground_boundary_is_exclusive() {
        assert_eq!(ground(AiState::Patrolling, 5.0), AiState::Patrolling);
        let flying = next_state(AiState::Patrolling, Some(5.0), false, Locomotion::Flying, &ranges());
        assert_eq!(flying, AiState::Chasing);
    }

    #[test]
    fn test_airborne_ground_enemy_patrols() {
        let state = next_state(AiState::Attacking, Some(1.0), false, Locomotion::Ground, &ranges());
        assert_eq!(state, AiState::Patrolling);
    }

    #[test]
    fn test_no_target_patrols() {
        let state = next_state(AiState::Chasing, None, true, Locomotion::Ground, &ranges());
        assert_eq!(state, AiState::Patrolling);
    }

    #[test]
    fn test_inverted_ranges_are_corrected() {
        let ranges = EngageRanges::new(2.0, 8.0, 6.0);
        assert_eq!(ranges.lose_chase_range(), 8.0);
    }

    fn input(state: AiState) -> MovementInput {
        MovementInput {
            state,
            position: Vec2::ZERO,
            target: Some(Vec2::new(4.0, 0.0)),
            move_speed: 3.0,
            locomotion: Locomotion::Ground,
            grounded: true,
            ledge_ahead: false,
        }
    }

    #[test]
    fn test_attacking_stands_still() {
        let velocity = plan_movement(input(AiState::Attacking), &MotionProfile::default(), None);
        assert!(velocity.is_still());
    }

    #[test]
    fn test_patrol_without_route_holds() {
        let velocity = plan_movement(input(AiState::Patrolling), &MotionProfile::default(), None);
        assert!(velocity.is_still());

        let mut empty = PatrolRoute::Waypoints(PatrolPlan::new(Vec::new(), PatrolStyle::Loop));
        for _ in 0..10 {
            let velocity = plan_movement(
                input(AiState::Patrolling),
                &MotionProfile::default(),
                Some(&mut empty),
            );
            assert!(velocity.is_still());
        }
    }

    #[test]
    fn test_patrol_uses_patrol_speed() {
        let motion = MotionProfile {
            patrol_speed: Some(1.0),
            ..default()
        };
        let mut route = PatrolRoute::Waypoints(PatrolPlan::new(
            vec![Vec2::new(-3.0, 0.0)],
            PatrolStyle::Loop,
        ));
        let velocity = plan_movement(input(AiState::Patrolling), &motion, Some(&mut route));
        assert_eq!(velocity.horizontal, -1.0);
    }

    #[test]
    fn test_chase_heads_for_target() {
        let velocity = plan_movement(input(AiState::Chasing), &MotionProfile::default(), None);
        assert_eq!(velocity.horizontal, 3.0);
    }

    #[test]
    fn test_special_preferred_when_ready() {
        let profile = CombatProfile::new(60, 3.0, 2.0);
        let special = SpecialAttack::new(60, 2.0, 5.0);
        assert_eq!(
            choose_attack(AiState::Chasing, 5.5, &profile, Some(&special)),
            AttackChoice::Special
        );
        assert_eq!(
            choose_attack(AiState::Chasing, 6.5, &profile, Some(&special)),
            AttackChoice::Hold
        );
    }

    #[test]
    fn test_basic_attack_gated_by_cooldown_and_state() {
        let mut profile = CombatProfile::new(5, 2.0, 1.5);
        assert_eq!(choose_attack(AiState::Attacking, 1.0, &profile, None), AttackChoice::Basic);
        assert_eq!(choose_attack(AiState::Chasing, 1.0, &profile, None), AttackChoice::Hold);
        assert_eq!(choose_attack(AiState::Patrolling, 1.0, &profile, None), AttackChoice::Hold);

        profile.commit_attack();
        assert_eq!(choose_attack(AiState::Attacking, 1.0, &profile, None), AttackChoice::Hold);
    }
}
