//! Side-view player movement, input and spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::actions::player_attack;
use super::components::*;
use crate::combat::{CombatProfile, Vitals};
use crate::core::{AudioCue, FrameSet, SaveRequest, SimSet};
use crate::physics::{DesiredVelocity, Facing, GroundProbe, Grounded, Locomotion};
use crate::world::LevelGeometry;

/// Marker component for the camera following the player.
#[derive(Component)]
pub struct PlayerCamera;

/// World units shown per screen pixel.
const CAMERA_SCALE: f32 = 1.0 / 48.0;

/// Set up player input and movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (read_player_input, request_manual_save).in_set(FrameSet::Input),
    )
    .add_systems(
        FixedUpdate,
        (player_movement, player_attack).in_set(SimSet::Act),
    );
}

/// Latch keyboard state into the player's intent.
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<&mut PlayerIntent, With<Player>>,
) {
    let Ok(mut intent) = player_query.get_single_mut() else {
        return;
    };

    let mut axis = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }
    intent.axis = axis;

    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp]) {
        intent.jump = true;
    }
    if keyboard.any_just_pressed([KeyCode::KeyJ, KeyCode::Enter]) {
        intent.attack = true;
    }
}

/// F5 saves progress.
fn request_manual_save(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut save_requests: EventWriter<SaveRequest>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        save_requests.send(SaveRequest::Save);
    }
}

/// Desired velocity for the player's intent; the flag reports a jump.
pub fn player_velocity(
    intent: &PlayerIntent,
    alive: bool,
    grounded: bool,
    move_speed: f32,
    jump_speed: f32,
) -> (DesiredVelocity, bool) {
    if !alive {
        return (DesiredVelocity::hold(Locomotion::Ground), false);
    }
    let jumped = intent.jump && grounded;
    let desired = DesiredVelocity {
        horizontal: intent.axis.clamp(-1.0, 1.0) * move_speed,
        vertical: jumped.then_some(jump_speed),
    };
    (desired, jumped)
}

/// Turn the latched intent into a desired velocity.
pub fn player_movement(
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (&Vitals, &Grounded, &mut PlayerIntent, &mut DesiredVelocity),
        With<Player>,
    >,
    mut audio: EventWriter<AudioCue>,
) {
    let Ok((vitals, grounded, mut intent, mut desired)) = player_query.get_single_mut() else {
        return;
    };

    let (velocity, jumped) = player_velocity(
        &intent,
        vitals.is_alive(),
        grounded.0,
        vitals.move_speed,
        config.jump_speed,
    );
    *desired = velocity;
    intent.jump = false;

    if jumped {
        audio.send(AudioCue::Jump);
    }
}

/// Spawn the player entity with a following camera.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &PlayerConfig) -> Entity {
    let player = commands
        .spawn((
            (
                Player,
                SpawnPoint(position),
                PlayerIntent::default(),
                Vitals::new(config.max_health, config.move_speed),
                CombatProfile::new(config.attack_damage, config.attack_range, config.attack_cooldown),
            ),
            (
                Locomotion::Ground,
                DesiredVelocity::hold(Locomotion::Ground),
                Grounded::default(),
                Facing::default(),
                GroundProbe {
                    half_height: config.size.y / 2.0,
                    ..default()
                },
            ),
            (
                Sprite::from_color(Color::srgb(0.9, 0.85, 0.4), config.size),
                Transform::from_translation(position.extend(2.0)),
                RigidBody::Dynamic,
                Collider::cuboid(config.size.x / 2.0, config.size.y / 2.0),
                LockedAxes::ROTATION_LOCKED,
                Velocity::zero(),
                LevelGeometry,
            ),
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera2d,
            OrthographicProjection {
                scale: CAMERA_SCALE,
                ..OrthographicProjection::default_2d()
            },
            PlayerCamera,
            Transform::from_xyz(0.0, 1.5, 10.0),
        ));
    });

    player
}
