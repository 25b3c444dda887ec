//! Pickups and their effect on the player and on progress.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use serde::Deserialize;

use crate::combat::Vitals;
use crate::core::{AudioCue, MetaState, Notifier, UiNotification};
use crate::player::Player;
use crate::world::LevelGeometry;

/// Distance from the player's center at which a pickup is collected.
const PICKUP_RADIUS: f32 = 0.8;

/// A collectible lying in the level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Pickup {
    Coin { points: u32 },
    HealthPotion { amount: f32 },
}

impl Pickup {
    pub fn coin() -> Self {
        Pickup::Coin { points: 10 }
    }

    pub fn health_potion() -> Self {
        Pickup::HealthPotion { amount: 20.0 }
    }
}

/// What collecting a pickup did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupOutcome {
    /// The collector is dead; the pickup stays.
    Ignored,
    Scored { score: u32 },
    Healed { health: f32 },
}

/// Apply a pickup to the collecting player.
pub fn collect<N: Notifier>(
    pickup: Pickup,
    collector: Entity,
    player: &mut Vitals,
    meta: &mut MetaState,
    notifier: &mut N,
) -> PickupOutcome {
    if !player.is_alive() {
        return PickupOutcome::Ignored;
    }

    match pickup {
        Pickup::Coin { points } => {
            let score = meta.add_score(points);
            notifier.notify(UiNotification::ScoreChanged(score));
            PickupOutcome::Scored { score }
        }
        Pickup::HealthPotion { amount } => {
            // Potion amounts come from data; treat a bad one as empty
            let Ok(change) = player.heal(amount.max(0.0)) else {
                return PickupOutcome::Healed {
                    health: player.health(),
                };
            };
            if change.is_change() {
                notifier.notify(UiNotification::HealthChanged {
                    entity: collector,
                    current: change.current,
                    max: player.max_health(),
                });
            }
            PickupOutcome::Healed {
                health: change.current,
            }
        }
    }
}

/// Spawn a pickup as a small sensor.
pub fn spawn_pickup(commands: &mut Commands, pickup: Pickup, position: Vec2) -> Entity {
    let color = match pickup {
        Pickup::Coin { .. } => Color::srgb(1.0, 0.85, 0.1),
        Pickup::HealthPotion { .. } => Color::srgb(0.9, 0.2, 0.4),
    };
    commands
        .spawn((
            pickup,
            Sprite::from_color(color, Vec2::splat(0.4)),
            Transform::from_translation(position.extend(0.5)),
            Collider::ball(0.2),
            Sensor,
            LevelGeometry,
        ))
        .id()
}

/// Collect every pickup the living player is touching.
pub fn collect_pickups(
    mut commands: Commands,
    mut meta: ResMut<MetaState>,
    mut player_query: Query<(Entity, &Transform, &mut Vitals), With<Player>>,
    pickup_query: Query<(Entity, &Transform, &Pickup), Without<Player>>,
    mut notifications: EventWriter<UiNotification>,
    mut audio: EventWriter<AudioCue>,
) {
    let Ok((player, player_transform, mut vitals)) = player_query.get_single_mut() else {
        return;
    };
    let position = player_transform.translation.truncate();

    for (entity, transform, pickup) in pickup_query.iter() {
        if transform.translation.truncate().distance(position) > PICKUP_RADIUS {
            continue;
        }

        let outcome = collect(*pickup, player, &mut vitals, &mut meta, &mut notifications);
        if outcome == PickupOutcome::Ignored {
            continue;
        }
        debug!("Collected {:?}: {:?}", pickup, outcome);
        audio.send(AudioCue::Pickup);
        commands.entity(entity).despawn_recursive();
    }
}
