//! Targeting - velocity toward a resolved target position.
//!
//! The target is always a plain position; looking it up from a tracked
//! entity happens once per tick in the calling system.

use bevy::prelude::*;

use crate::physics::{DesiredVelocity, Locomotion};

/// Speed limits and patrol pace of an actor.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub max_horizontal_speed: f32,
    /// Clamp on directly driven vertical speed, if any.
    pub max_vertical_speed: Option<f32>,
    /// Patrol pace; the chase pace is the actor's move speed.
    pub patrol_speed: Option<f32>,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            max_horizontal_speed: 5.0,
            max_vertical_speed: None,
            patrol_speed: None,
        }
    }
}

impl MotionProfile {
    pub fn patrol_speed(&self, move_speed: f32) -> f32 {
        self.patrol_speed.unwrap_or(move_speed)
    }
}

/// Velocity that moves an actor toward `target` at `speed`.
///
/// Ground actors get a signed full-speed horizontal component and leave the
/// vertical axis to physics; while airborne they get no horizontal velocity
/// at all. Flying actors move straight at the target.
pub fn chase(
    position: Vec2,
    target: Vec2,
    speed: f32,
    motion: &MotionProfile,
    locomotion: Locomotion,
    grounded: bool,
) -> DesiredVelocity {
    let max_horizontal = motion.max_horizontal_speed.abs();
    let direction = (target - position).normalize_or_zero();

    match locomotion {
        Locomotion::Ground => {
            if !grounded {
                return DesiredVelocity::hold(Locomotion::Ground);
            }
            let sign = if direction.x.abs() > f32::EPSILON {
                direction.x.signum()
            } else {
                0.0
            };
            DesiredVelocity {
                horizontal: (sign * speed).clamp(-max_horizontal, max_horizontal),
                vertical: None,
            }
        }
        Locomotion::Flying => {
            let velocity = direction * speed;
            let vertical = match motion.max_vertical_speed {
                Some(limit) => velocity.y.clamp(-limit.abs(), limit.abs()),
                None => velocity.y,
            };
            DesiredVelocity {
                horizontal: velocity.x.clamp(-max_horizontal, max_horizontal),
                vertical: Some(vertical),
            }
        }
    }
}
