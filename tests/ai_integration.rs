//! Enemy AI integration tests: state decisions feeding attacks and damage.

use bevy::prelude::*;
use slime_siege::combat::systems::{apply_damage, resolve_deaths};
use slime_siege::combat::Vitals;
use slime_siege::core::*;
use slime_siege::enemies::ai::{ai_attack, ai_decide};
use slime_siege::enemies::{AiState, Enemy, EnemyDefinition, ScoreValue};
use slime_siege::physics::Grounded;
use slime_siege::player::{Player, SpawnPoint};

fn ai_app() -> App {
    let mut app = App::new();
    app.add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<UiNotification>()
        .add_event::<AnimationTrigger>()
        .add_event::<AudioCue>()
        .init_resource::<MetaState>()
        .add_systems(
            Update,
            (ai_decide, ai_attack, apply_damage, resolve_deaths).chain(),
        );
    app
}

fn spawn_player(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            Vitals::new(100.0, 5.0),
            Transform::default(),
            SpawnPoint(Vec2::ZERO),
        ))
        .id()
}

fn spawn_enemy(app: &mut App, definition: &EnemyDefinition, x: f32) -> Entity {
    let mut entity = app.world_mut().spawn((
        Enemy,
        AiState::default(),
        ScoreValue(definition.score_value),
        definition.vitals(),
        definition.combat_profile(),
        definition.engage_ranges(),
        definition.locomotion,
        Grounded(true),
        Transform::from_xyz(x, 0.0, 0.0),
    ));
    if let Some(special) = definition.special_attack() {
        entity.insert(special);
    }
    entity.id()
}

fn player_health(app: &App, player: Entity) -> f32 {
    app.world().get::<Vitals>(player).unwrap().health()
}

#[test]
fn test_slime_in_reach_attacks_once_per_cooldown() {
    let mut app = ai_app();
    let player = spawn_player(&mut app);
    let slime = spawn_enemy(&mut app, &EnemyDefinition::slime(), 1.5);

    app.update();
    assert_eq!(app.world().get::<AiState>(slime), Some(&AiState::Attacking));
    assert_eq!(player_health(&app, player), 95.0);

    // Cooldowns only tick in the frame bookkeeping, which is not running here
    app.update();
    assert_eq!(player_health(&app, player), 95.0);
}

#[test]
fn test_slime_out_of_reach_chases_without_attacking() {
    let mut app = ai_app();
    let player = spawn_player(&mut app);
    let slime = spawn_enemy(&mut app, &EnemyDefinition::slime(), 6.0);

    app.update();
    assert_eq!(app.world().get::<AiState>(slime), Some(&AiState::Chasing));
    assert_eq!(player_health(&app, player), 100.0);
}

#[test]
fn test_boss_special_reaches_past_basic_range() {
    let mut app = ai_app();
    let player = spawn_player(&mut app);
    let boss = spawn_enemy(&mut app, &EnemyDefinition::boss(), 5.0);

    app.update();
    assert_eq!(app.world().get::<AiState>(boss), Some(&AiState::Chasing));
    assert_eq!(player_health(&app, player), 40.0);

    let cues: Vec<AudioCue> = app
        .world()
        .resource::<Events<AudioCue>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert!(cues.contains(&AudioCue::BossSpecial));
    assert!(!cues.contains(&AudioCue::EnemyAttack));
}

#[test]
fn test_dead_player_is_not_targeted() {
    let mut app = ai_app();
    let player = spawn_player(&mut app);
    let slime = spawn_enemy(&mut app, &EnemyDefinition::slime(), 1.0);
    app.world_mut()
        .get_mut::<Vitals>(player)
        .unwrap()
        .set_health(0.0);
    app.world_mut().send_event(DeathEvent {
        entity: player,
        killed_by: None,
    });
    app.world_mut().resource_mut::<MetaState>().lives = 1;
    app.update();

    assert_eq!(app.world().resource::<MetaState>().lives, 0);
    app.update();
    assert_eq!(app.world().get::<AiState>(slime), Some(&AiState::Patrolling));
}
