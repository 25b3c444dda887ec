//! Player actions - the area melee attack.
//!
//! Finding who is in reach is delegated to a [`SpatialQuery`], so the attack
//! itself is testable without a physics world.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Player, PlayerConfig, PlayerIntent};
use crate::combat::{strike, CombatProfile, Strike, StrikeRejected, Vitals};
use crate::core::{AnimationTrigger, AudioCue, DamageEvent, KnockbackEvent};
use crate::enemies::Enemy;
use crate::physics::Facing;

/// Finds actors around a point.
pub trait SpatialQuery {
    /// Every candidate target within `radius` of `center`, with its position.
    fn actors_within(&self, center: Vec2, radius: f32) -> Vec<(Entity, Vec2)>;
}

impl SpatialQuery for Vec<(Entity, Vec2)> {
    fn actors_within(&self, center: Vec2, radius: f32) -> Vec<(Entity, Vec2)> {
        self.iter()
            .copied()
            .filter(|(_, position)| position.distance(center) <= radius)
            .collect()
    }
}

/// Rapier-backed overlap query limited to living enemies.
pub struct RapierOverlap<'a, F> {
    pub context: &'a RapierContext,
    pub exclude: Entity,
    /// Position of a valid target, or `None` to ignore the collider.
    pub resolve: F,
}

impl<F> SpatialQuery for RapierOverlap<'_, F>
where
    F: Fn(Entity) -> Option<Vec2>,
{
    fn actors_within(&self, center: Vec2, radius: f32) -> Vec<(Entity, Vec2)> {
        let mut found = Vec::new();
        self.context.intersections_with_shape(
            center,
            0.0,
            &Collider::ball(radius),
            QueryFilter::default()
                .exclude_collider(self.exclude)
                .exclude_sensors(),
            |entity| {
                if let Some(position) = (self.resolve)(entity) {
                    found.push((entity, position));
                }
                true
            },
        );
        found
    }
}

/// One target struck by an area attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaHit {
    pub target: Entity,
    pub knockback: Vec2,
}

/// A committed area attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaStrike {
    pub strike: Strike,
    pub hits: Vec<AreaHit>,
}

/// Swing at everything in reach.
///
/// A dead attacker or one on cooldown does nothing. Otherwise the cooldown
/// restarts, even when nothing is in reach.
pub fn area_attack<Q: SpatialQuery>(
    position: Vec2,
    facing: Facing,
    vitals: &Vitals,
    profile: &mut CombatProfile,
    knockback_speed: f32,
    spatial: &Q,
) -> Result<AreaStrike, StrikeRejected> {
    let blow = strike(vitals, profile)?;

    let hits = spatial
        .actors_within(position, profile.attack_range)
        .into_iter()
        .map(|(target, target_position)| {
            let away = (target_position - position).x;
            let sign = if away.abs() > f32::EPSILON {
                away.signum()
            } else {
                facing.sign()
            };
            AreaHit {
                target,
                knockback: Vec2::new(sign, 0.5).normalize() * knockback_speed,
            }
        })
        .collect();

    profile.commit_attack();
    Ok(AreaStrike { strike: blow, hits })
}

/// Run a latched attack request.
pub fn player_attack(
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (Entity, &Transform, &Vitals, &Facing, &mut CombatProfile, &mut PlayerIntent),
        With<Player>,
    >,
    enemy_query: Query<(&Transform, &Vitals), (With<Enemy>, Without<Player>)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut knockback_events: EventWriter<KnockbackEvent>,
    mut animations: EventWriter<AnimationTrigger>,
    mut audio: EventWriter<AudioCue>,
) {
    let Ok((entity, transform, vitals, facing, mut profile, mut intent)) =
        player_query.get_single_mut()
    else {
        return;
    };
    if !intent.attack {
        return;
    }
    intent.attack = false;

    let position = transform.translation.truncate();
    let resolve = |hit: Entity| {
        enemy_query
            .get(hit)
            .ok()
            .filter(|(_, enemy_vitals)| enemy_vitals.is_alive())
            .map(|(enemy_transform, _)| enemy_transform.translation.truncate())
    };

    // Without a physics context nothing can be found, but the swing still counts
    let result = match rapier_context.get_single() {
        Ok(context) => {
            let overlap = RapierOverlap {
                context,
                exclude: entity,
                resolve,
            };
            area_attack(position, *facing, vitals, &mut profile, config.knockback_speed, &overlap)
        }
        Err(_) => area_attack(
            position,
            *facing,
            vitals,
            &mut profile,
            config.knockback_speed,
            &Vec::new(),
        ),
    };

    let Ok(area) = result else {
        return;
    };

    debug!("Player attack hit {} enemies", area.hits.len());
    for hit in &area.hits {
        damage_events.send(DamageEvent {
            target: hit.target,
            source: entity,
            amount: area.strike.damage,
        });
        knockback_events.send(KnockbackEvent {
            target: hit.target,
            impulse: hit.knockback,
        });
    }
    animations.send(AnimationTrigger {
        entity,
        name: "attack",
    });
    audio.send(AudioCue::PlayerAttack);
}
