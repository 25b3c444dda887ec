//! Enemy spawning from registry definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::components::{AiState, Enemy, EnemyType, PatrolRoute, ScoreValue};
use super::data::{EnemyDefinition, EnemyRegistry};
use super::hover::HoverPattern;
use super::patrol::{PatrolPlan, PatrolStyle};
use crate::physics::{DesiredVelocity, Facing, GroundProbe, Grounded, LedgeAhead, Locomotion};
use crate::world::LevelGeometry;

/// Where and how one enemy enters the level.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub enemy_type: String,
    pub position: Vec2,
    pub waypoints: Vec<Vec2>,
    pub style: PatrolStyle,
}

/// Patrol route for a definition: hover flyers synthesize their own.
pub fn patrol_route(definition: &EnemyDefinition, spawn: &EnemySpawn, phase: f32) -> PatrolRoute {
    match definition.hover {
        Some(settings) => PatrolRoute::Hover(HoverPattern::new(spawn.position, settings, phase)),
        None => PatrolRoute::Waypoints(PatrolPlan::new(spawn.waypoints.clone(), spawn.style)),
    }
}

/// Spawn one enemy. Returns `None` for an unknown type.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    spawn: &EnemySpawn,
) -> Option<Entity> {
    let Some(definition) = registry.get(&spawn.enemy_type) else {
        warn!("Unknown enemy type in level: {}", spawn.enemy_type);
        return None;
    };

    let phase = definition
        .hover
        .map(|settings| rand::thread_rng().gen_range(0.0..settings.period.max(f32::EPSILON)))
        .unwrap_or(0.0);
    let (width, height) = definition.size;
    let (r, g, b) = definition.color;

    let mut entity = commands.spawn((
        (
            Enemy,
            EnemyType(spawn.enemy_type.clone()),
            AiState::default(),
            ScoreValue(definition.score_value),
            definition.vitals(),
            definition.combat_profile(),
            definition.engage_ranges(),
            definition.motion_profile(),
            patrol_route(definition, spawn, phase),
        ),
        (
            definition.locomotion,
            DesiredVelocity::hold(definition.locomotion),
            Grounded::default(),
            LedgeAhead::default(),
            Facing::default(),
        ),
        (
            Sprite::from_color(Color::srgb(r, g, b), Vec2::new(width, height)),
            Transform::from_translation(spawn.position.extend(1.0)),
            RigidBody::Dynamic,
            Collider::cuboid(width / 2.0, height / 2.0),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            LevelGeometry,
        ),
    ));

    match definition.locomotion {
        Locomotion::Ground => {
            entity.insert(GroundProbe {
                half_height: height / 2.0,
                ledge_lookahead: definition.ledge_aware.then_some(width / 2.0 + 0.1),
                ..default()
            });
        }
        Locomotion::Flying => {
            entity.insert(GravityScale(0.0));
        }
    }

    if let Some(special) = definition.special_attack() {
        entity.insert(special);
    }

    info!("Spawned {} at {:?}", definition.name, spawn.position);
    Some(entity.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(enemy_type: &str) -> EnemySpawn {
        EnemySpawn {
            enemy_type: enemy_type.to_string(),
            position: Vec2::new(3.0, 1.0),
            waypoints: vec![Vec2::new(0.0, 1.0), Vec2::new(6.0, 1.0)],
            style: PatrolStyle::PingPong,
        }
    }

    #[test]
    fn test_walkers_use_level_waypoints() {
        let spawn = spawn_at("slime");
        let route = patrol_route(&EnemyDefinition::slime(), &spawn, 0.0);
        match route {
            PatrolRoute::Waypoints(plan) => {
                assert_eq!(plan.waypoints(), spawn.waypoints.as_slice());
                assert_eq!(plan.style(), PatrolStyle::PingPong);
            }
            PatrolRoute::Hover(_) => panic!("slime should walk waypoints"),
        }
    }

    #[test]
    fn test_flyers_hover_around_spawn() {
        let route = patrol_route(&EnemyDefinition::flying(), &spawn_at("flying"), 0.3);
        match route {
            PatrolRoute::Hover(hover) => assert_eq!(hover.anchor(), Vec2::new(3.0, 1.0)),
            PatrolRoute::Waypoints(_) => panic!("flyer should hover"),
        }
    }

    #[test]
    fn test_spawn_enemy_components() {
        let mut world = World::new();
        let registry = EnemyRegistry::default();

        let boss = {
            let mut queue = bevy::ecs::world::CommandQueue::default();
            let mut commands = Commands::new(&mut queue, &world);
            let boss = spawn_enemy(&mut commands, &registry, &spawn_at("boss"));
            let unknown = spawn_enemy(&mut commands, &registry, &spawn_at("dragon"));
            assert!(unknown.is_none());
            queue.apply(&mut world);
            boss.unwrap()
        };

        let entity = world.entity(boss);
        assert!(entity.contains::<Enemy>());
        assert!(entity.contains::<super::super::components::SpecialAttack>());
        assert!(entity.contains::<GroundProbe>());
        assert_eq!(entity.get::<ScoreValue>(), Some(&ScoreValue(1000)));
    }
}
