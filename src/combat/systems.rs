//! Combat systems - damage application, death consequences, cooldowns.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::resolver::{apply_strike, die, ActorRole, DeathOutcome, Strike};
use crate::core::{
    AnimationTrigger, AudioCue, DamageEvent, DeathEvent, FrameSet, MetaState, SimSet,
    UiNotification,
};
use crate::enemies::{ScoreValue, SpecialAttack};
use crate::player::{Player, SpawnPoint};

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(FixedUpdate, apply_damage.in_set(SimSet::Resolve))
        .add_systems(FixedUpdate, resolve_deaths.in_set(SimSet::Consequences))
        .add_systems(
            Update,
            (tick_cooldowns, despawn_corpses).in_set(FrameSet::Bookkeeping),
        );
}

/// Land every hit queued this tick.
///
/// Deaths are only queued here; their side effects wait for
/// [`resolve_deaths`] so no actor sees a half-updated [`MetaState`].
pub fn apply_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<(&mut Vitals, Has<Player>)>,
    mut death_events: EventWriter<DeathEvent>,
    mut notifications: EventWriter<UiNotification>,
    mut animations: EventWriter<AnimationTrigger>,
    mut audio: EventWriter<AudioCue>,
) {
    for event in damage_events.read() {
        let Ok((mut vitals, is_player)) = targets.get_mut(event.target) else {
            continue;
        };
        if !vitals.is_alive() {
            continue;
        }

        let hit = apply_strike(
            &mut vitals,
            Strike {
                damage: event.amount,
            },
        );
        if !hit.change.is_change() {
            continue;
        }

        notifications.send(UiNotification::HealthChanged {
            entity: event.target,
            current: vitals.health(),
            max: vitals.max_health(),
        });
        animations.send(AnimationTrigger {
            entity: event.target,
            name: "hurt",
        });
        if is_player {
            audio.send(AudioCue::Hurt);
        }

        if hit.lethal {
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Run the death transition for everything that died this tick.
pub fn resolve_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut meta: ResMut<MetaState>,
    mut notifications: EventWriter<UiNotification>,
    mut animations: EventWriter<AnimationTrigger>,
    mut audio: EventWriter<AudioCue>,
    mut actors: Query<(
        &mut Vitals,
        &mut Transform,
        Option<&ScoreValue>,
        Option<&SpawnPoint>,
        Option<&mut Velocity>,
    )>,
) {
    for event in death_events.read() {
        let Ok((mut vitals, mut transform, score_value, spawn_point, velocity)) =
            actors.get_mut(event.entity)
        else {
            continue;
        };

        let role = match (score_value, spawn_point) {
            (_, Some(spawn)) => ActorRole::Player { spawn: spawn.0 },
            (Some(value), None) => ActorRole::Enemy {
                score_value: value.0,
            },
            (None, None) => ActorRole::Enemy { score_value: 0 },
        };

        match die(&mut vitals, role, &mut meta, &mut notifications) {
            DeathOutcome::AlreadyDead => {}
            DeathOutcome::Slain { score } => {
                info!("Enemy {:?} defeated (score {})", event.entity, score);
                animations.send(AnimationTrigger {
                    entity: event.entity,
                    name: "death",
                });
                audio.send(AudioCue::EnemyDeath);
                if let Some(mut velocity) = velocity {
                    *velocity = Velocity::zero();
                }
                commands.entity(event.entity).insert((
                    Corpse::default(),
                    ColliderDisabled,
                    RigidBodyDisabled,
                ));
            }
            DeathOutcome::Respawned { spawn, lives } => {
                info!("Player respawned at {:?}, {} lives left", spawn, lives);
                transform.translation.x = spawn.x;
                transform.translation.y = spawn.y;
                if let Some(mut velocity) = velocity {
                    *velocity = Velocity::zero();
                }
                notifications.send(UiNotification::HealthChanged {
                    entity: event.entity,
                    current: vitals.health(),
                    max: vitals.max_health(),
                });
                audio.send(AudioCue::PlayerDeath);
            }
            DeathOutcome::GameOver => {
                info!("Player died with no lives left");
                animations.send(AnimationTrigger {
                    entity: event.entity,
                    name: "death",
                });
                audio.send(AudioCue::PlayerDeath);
                if let Some(mut velocity) = velocity {
                    *velocity = Velocity::zero();
                }
            }
        }
    }
}

/// Decay attack cooldowns with the frame delta.
pub fn tick_cooldowns(
    time: Res<Time>,
    mut profiles: Query<&mut CombatProfile>,
    mut specials: Query<&mut SpecialAttack>,
) {
    let delta = time.delta_secs();
    for mut profile in profiles.iter_mut() {
        profile.cooldown.tick(delta);
    }
    for mut special in specials.iter_mut() {
        special.cooldown.tick(delta);
    }
}

/// Despawn slain actors once their corpse delay runs out.
pub fn despawn_corpses(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Corpse)>,
) {
    for (entity, mut corpse) in query.iter_mut() {
        corpse.0.tick(time.delta());
        if corpse.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
