//! Physics adapter systems - probes in, velocities out.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::core::{KnockbackEvent, SimSet};

/// Configure physics adapter systems.
pub fn setup_physics_systems(app: &mut App) {
    app.add_systems(FixedUpdate, probe_ground.in_set(SimSet::Sense))
        .add_systems(
            FixedUpdate,
            (start_stagger, apply_desired_velocity, update_facing)
                .chain()
                .in_set(SimSet::Output),
        );
}

/// Origin of the ledge ray: just ahead of the feet in the facing direction.
pub fn ledge_ray_origin(position: Vec2, probe: &GroundProbe, facing: Facing) -> Option<Vec2> {
    let lookahead = probe.ledge_lookahead?;
    Some(Vec2::new(
        position.x + facing.sign() * lookahead,
        position.y - probe.half_height + 0.05,
    ))
}

/// Velocity handed to the rigid body for a desired velocity.
///
/// A `None` vertical keeps whatever the body already has, so gravity and
/// jumps carry through.
pub fn blend_velocity(current: Vec2, desired: DesiredVelocity) -> Vec2 {
    Vec2::new(desired.horizontal, desired.vertical.unwrap_or(current.y))
}

/// Refresh grounded and ledge flags with short downward rays.
///
/// Without a physics context the previous flags are kept.
pub fn probe_ground(
    rapier_context: Query<&RapierContext>,
    mut query: Query<(
        Entity,
        &Transform,
        &GroundProbe,
        &mut Grounded,
        Option<&mut LedgeAhead>,
        Option<&Facing>,
    )>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, probe, mut grounded, ledge, facing) in query.iter_mut() {
        let position = transform.translation.truncate();
        let filter = QueryFilter::default()
            .exclude_collider(entity)
            .exclude_sensors();

        // Start just above the feet so resting contact still registers
        let feet = Vec2::new(position.x, position.y - probe.half_height + 0.05);
        let on_ground = context
            .cast_ray(feet, Vec2::NEG_Y, probe.reach + 0.05, true, filter)
            .is_some();
        if grounded.0 != on_ground {
            grounded.0 = on_ground;
        }

        let Some(mut ledge) = ledge else {
            continue;
        };
        let facing = facing.copied().unwrap_or_default();
        let drop_ahead = match ledge_ray_origin(position, probe, facing) {
            Some(origin) if on_ground => context
                .cast_ray(origin, Vec2::NEG_Y, probe.reach + 0.5, true, filter)
                .is_none(),
            _ => false,
        };
        if ledge.0 != drop_ahead {
            ledge.0 = drop_ahead;
        }
    }
}

/// Turn knockback requests into a short stagger.
pub fn start_stagger(
    mut commands: Commands,
    mut knockback_events: EventReader<KnockbackEvent>,
) {
    for event in knockback_events.read() {
        if let Some(mut entity) = commands.get_entity(event.target) {
            entity.insert(Stagger::new(event.impulse));
        }
    }
}

/// Push desired velocities into rapier; a stagger overrides them while it lasts.
pub fn apply_desired_velocity(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &DesiredVelocity, &mut Velocity, Option<&mut Stagger>)>,
) {
    for (entity, desired, mut velocity, stagger) in query.iter_mut() {
        if let Some(mut stagger) = stagger {
            stagger.timer.tick(time.delta());
            if stagger.timer.finished() {
                commands.entity(entity).remove::<Stagger>();
            } else {
                velocity.linvel = stagger.impulse;
                continue;
            }
        }

        velocity.linvel = blend_velocity(velocity.linvel, *desired);
    }
}

/// Face the direction of horizontal travel; standing still keeps the old facing.
pub fn update_facing(mut query: Query<(&DesiredVelocity, &mut Facing), Changed<DesiredVelocity>>) {
    for (desired, mut facing) in query.iter_mut() {
        if let Some(next) = Facing::from_horizontal(desired.horizontal) {
            if *facing != next {
                *facing = next;
            }
        }
    }
}
