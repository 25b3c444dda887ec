//! Combat flow integration tests: damage, death, score and respawn.

use bevy::prelude::*;
use slime_siege::combat::systems::{apply_damage, resolve_deaths};
use slime_siege::combat::{Corpse, Vitals};
use slime_siege::core::*;
use slime_siege::enemies::ScoreValue;
use slime_siege::items::{collect_pickups, Pickup};
use slime_siege::player::{Player, SpawnPoint};
use slime_siege::world::{reach_goal, GoalZone};

fn combat_app(meta: MetaState) -> App {
    let mut app = App::new();
    app.add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<UiNotification>()
        .add_event::<AnimationTrigger>()
        .add_event::<AudioCue>()
        .insert_resource(meta)
        .add_systems(Update, (apply_damage, resolve_deaths).chain());
    app
}

fn hit(app: &mut App, target: Entity, source: Entity, amount: f32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source,
        amount,
    });
}

fn notifications(app: &App) -> Vec<UiNotification> {
    app.world()
        .resource::<Events<UiNotification>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

#[test]
fn test_enemy_killed_by_two_hits_scores_once() {
    let mut app = combat_app(MetaState::default());
    let player = app.world_mut().spawn(Player).id();
    let slime = app
        .world_mut()
        .spawn((Vitals::new(45.0, 2.5), Transform::default(), ScoreValue(500)))
        .id();

    // Two lethal-range hits and a third on the corpse, all in one tick
    hit(&mut app, slime, player, 30.0);
    hit(&mut app, slime, player, 30.0);
    hit(&mut app, slime, player, 30.0);
    app.update();

    assert_eq!(app.world().resource::<MetaState>().score, 500);
    let vitals = app.world().get::<Vitals>(slime).unwrap();
    assert!(!vitals.is_alive());
    assert_eq!(vitals.health(), 0.0);
    assert!(app.world().get::<Corpse>(slime).is_some());

    let scores: Vec<_> = notifications(&app)
        .into_iter()
        .filter(|n| matches!(n, UiNotification::ScoreChanged(_)))
        .collect();
    assert_eq!(scores, vec![UiNotification::ScoreChanged(500)]);

    // Later hits on the corpse change nothing
    hit(&mut app, slime, player, 30.0);
    app.update();
    assert_eq!(app.world().resource::<MetaState>().score, 500);
}

#[test]
fn test_player_respawns_while_lives_remain() {
    let mut app = combat_app(MetaState::default());
    let slime = app.world_mut().spawn(ScoreValue(500)).id();
    let player = app
        .world_mut()
        .spawn((
            Player,
            Vitals::new(100.0, 5.0),
            Transform::from_xyz(12.0, 4.0, 0.0),
            SpawnPoint(Vec2::new(1.0, 2.0)),
        ))
        .id();

    hit(&mut app, player, slime, 150.0);
    app.update();

    let meta = app.world().resource::<MetaState>();
    assert_eq!(meta.lives, 2);
    assert_eq!(meta.score, 0);

    let vitals = app.world().get::<Vitals>(player).unwrap();
    assert!(vitals.is_alive());
    assert_eq!(vitals.health(), 100.0);

    let transform = app.world().get::<Transform>(player).unwrap();
    assert_eq!(transform.translation.truncate(), Vec2::new(1.0, 2.0));
    assert!(notifications(&app).contains(&UiNotification::LivesChanged(2)));
}

#[test]
fn test_last_life_ends_the_game() {
    let mut app = combat_app(MetaState {
        lives: 1,
        ..default()
    });
    let boss = app.world_mut().spawn(ScoreValue(1000)).id();
    let player = app
        .world_mut()
        .spawn((
            Player,
            Vitals::new(100.0, 5.0),
            Transform::default(),
            SpawnPoint(Vec2::ZERO),
        ))
        .id();

    hit(&mut app, player, boss, 60.0);
    hit(&mut app, player, boss, 60.0);
    app.update();

    let meta = app.world().resource::<MetaState>();
    assert_eq!(meta.lives, 0);
    assert!(meta.is_game_over());
    assert!(!app.world().get::<Vitals>(player).unwrap().is_alive());

    let sent = notifications(&app);
    assert!(sent.contains(&UiNotification::GameOver));
    assert_eq!(
        sent.iter()
            .filter(|n| matches!(n, UiNotification::LivesChanged(_)))
            .count(),
        1
    );
}

#[test]
fn test_zero_damage_sends_nothing() {
    let mut app = combat_app(MetaState::default());
    let source = app.world_mut().spawn_empty().id();
    let slime = app
        .world_mut()
        .spawn((Vitals::new(45.0, 2.5), Transform::default(), ScoreValue(500)))
        .id();

    hit(&mut app, slime, source, 0.0);
    app.update();

    assert_eq!(app.world().get::<Vitals>(slime).unwrap().health(), 45.0);
    assert!(notifications(&app).is_empty());
}

/// Full fixed-step tail: damage, deaths, then pickups and goals.
fn settling_app(meta: MetaState) -> App {
    let mut app = App::new();
    app.add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<UiNotification>()
        .add_event::<AnimationTrigger>()
        .add_event::<AudioCue>()
        .add_event::<LevelCompleteEvent>()
        .insert_resource(meta)
        .configure_sets(Update, SimSet::phases())
        .add_systems(Update, apply_damage.in_set(SimSet::Resolve))
        .add_systems(Update, resolve_deaths.in_set(SimSet::Consequences))
        .add_systems(Update, (reach_goal, collect_pickups).in_set(SimSet::Interact));
    app
}

/// Player standing on the goal and a potion, with its spawn far away.
fn spawn_on_goal(app: &mut App) -> (Entity, Entity) {
    let player = app
        .world_mut()
        .spawn((
            Player,
            Vitals::new(100.0, 5.0),
            Transform::default(),
            SpawnPoint(Vec2::new(-40.0, 0.0)),
        ))
        .id();
    app.world_mut().spawn((
        GoalZone {
            level: 1,
            radius: 1.0,
        },
        Transform::default(),
    ));
    let potion = app
        .world_mut()
        .spawn((Pickup::health_potion(), Transform::default()))
        .id();
    (player, potion)
}

fn completions(app: &App) -> usize {
    app.world()
        .resource::<Events<LevelCompleteEvent>>()
        .iter_current_update_events()
        .count()
}

#[test]
fn test_dying_on_the_goal_does_not_finish_the_level() {
    let mut app = settling_app(MetaState {
        lives: 1,
        ..default()
    });
    let (player, potion) = spawn_on_goal(&mut app);
    let boss = app.world_mut().spawn(ScoreValue(1000)).id();

    hit(&mut app, player, boss, 200.0);
    app.update();

    assert!(notifications(&app).contains(&UiNotification::GameOver));
    assert_eq!(completions(&app), 0);
    assert!(app.world().get_entity(potion).is_ok());
    assert!(!app.world().get::<Vitals>(player).unwrap().is_alive());
}

#[test]
fn test_respawn_moves_player_off_the_goal_before_pickups() {
    let mut app = settling_app(MetaState::default());
    let (player, potion) = spawn_on_goal(&mut app);
    let slime = app.world_mut().spawn(ScoreValue(500)).id();

    hit(&mut app, player, slime, 200.0);
    app.update();

    assert_eq!(app.world().resource::<MetaState>().lives, 2);
    assert_eq!(completions(&app), 0);
    assert!(app.world().get_entity(potion).is_ok());
    assert_eq!(app.world().get::<Vitals>(player).unwrap().health(), 100.0);
}

#[test]
fn test_living_player_collects_and_finishes() {
    let mut app = settling_app(MetaState::default());
    let (player, potion) = spawn_on_goal(&mut app);
    let slime = app.world_mut().spawn(ScoreValue(500)).id();

    hit(&mut app, player, slime, 30.0);
    app.update();

    assert_eq!(completions(&app), 1);
    assert!(app.world().get_entity(potion).is_err());
    assert_eq!(app.world().get::<Vitals>(player).unwrap().health(), 90.0);
}
