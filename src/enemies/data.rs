//! Enemy definitions - built-in variants plus overrides from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::chase::MotionProfile;
use super::components::{EngageRanges, SpecialAttack};
use super::hover::HoverSettings;
use crate::combat::{CombatProfile, Vitals};
use crate::physics::Locomotion;
use crate::world::{data_key, read_ron_file, ron_files_in, DataLoadError};

/// Directory scanned for enemy definition files.
pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

fn default_max_horizontal_speed() -> f32 {
    5.0
}

fn default_size() -> (f32, f32) {
    (0.8, 0.8)
}

fn default_color() -> (f32, f32, f32) {
    (0.3, 0.8, 0.3)
}

/// Special attack block of a definition.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SpecialAttackDef {
    pub damage: u32,
    pub range_multiplier: f32,
    pub cooldown: f32,
}

/// Enemy definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    #[serde(default)]
    pub locomotion: Locomotion,
    pub max_health: f32,
    /// Chase speed.
    pub move_speed: f32,
    #[serde(default)]
    pub patrol_speed: Option<f32>,
    #[serde(default = "default_max_horizontal_speed")]
    pub max_horizontal_speed: f32,
    #[serde(default)]
    pub max_vertical_speed: Option<f32>,
    pub attack_damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub chase_range: f32,
    pub lose_chase_range: f32,
    pub score_value: u32,
    #[serde(default = "default_size")]
    pub size: (f32, f32),
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Present for hovering flyers; they ignore level waypoints.
    #[serde(default)]
    pub hover: Option<HoverSettings>,
    #[serde(default)]
    pub special: Option<SpecialAttackDef>,
    /// Whether a drop ahead reverses the patrol.
    #[serde(default)]
    pub ledge_aware: bool,
}

impl EnemyDefinition {
    /// Small ground enemy that walks its waypoints.
    pub fn slime() -> Self {
        Self {
            name: "Slime".to_string(),
            locomotion: Locomotion::Ground,
            max_health: 45.0,
            move_speed: 2.5,
            patrol_speed: None,
            max_horizontal_speed: default_max_horizontal_speed(),
            max_vertical_speed: None,
            attack_damage: 5,
            attack_range: 2.0,
            attack_cooldown: 1.5,
            chase_range: 8.0,
            lose_chase_range: 9.5,
            score_value: 500,
            size: default_size(),
            color: default_color(),
            hover: None,
            special: None,
            ledge_aware: true,
        }
    }

    /// Hovering enemy that dives straight at the player.
    pub fn flying() -> Self {
        Self {
            name: "Flying".to_string(),
            locomotion: Locomotion::Flying,
            max_health: 75.0,
            move_speed: 3.0,
            patrol_speed: Some(2.0),
            max_horizontal_speed: default_max_horizontal_speed(),
            max_vertical_speed: Some(3.0),
            attack_damage: 10,
            attack_range: 3.0,
            attack_cooldown: 1.0,
            chase_range: 12.0,
            lose_chase_range: 14.0,
            score_value: 8,
            size: (0.7, 0.5),
            color: (0.6, 0.4, 0.9),
            hover: Some(HoverSettings::default()),
            special: None,
            ledge_aware: false,
        }
    }

    /// Heavy ground enemy with a long-reach special attack.
    pub fn boss() -> Self {
        Self {
            name: "Boss".to_string(),
            locomotion: Locomotion::Ground,
            max_health: 200.0,
            move_speed: 7.5,
            patrol_speed: Some(3.0),
            max_horizontal_speed: 7.5,
            max_vertical_speed: None,
            attack_damage: 60,
            attack_range: 3.0,
            attack_cooldown: 2.0,
            chase_range: 10.0,
            lose_chase_range: 12.0,
            score_value: 1000,
            size: (1.6, 1.6),
            color: (0.8, 0.2, 0.2),
            hover: None,
            special: Some(SpecialAttackDef {
                damage: 60,
                range_multiplier: 2.0,
                cooldown: 5.0,
            }),
            ledge_aware: true,
        }
    }

    pub fn vitals(&self) -> Vitals {
        Vitals::new(self.max_health, self.move_speed)
    }

    pub fn combat_profile(&self) -> CombatProfile {
        CombatProfile::new(self.attack_damage, self.attack_range, self.attack_cooldown)
    }

    pub fn engage_ranges(&self) -> EngageRanges {
        EngageRanges::new(self.attack_range, self.chase_range, self.lose_chase_range)
    }

    pub fn motion_profile(&self) -> MotionProfile {
        MotionProfile {
            max_horizontal_speed: self.max_horizontal_speed,
            max_vertical_speed: self.max_vertical_speed,
            patrol_speed: self.patrol_speed,
        }
    }

    pub fn special_attack(&self) -> Option<SpecialAttack> {
        self.special
            .as_ref()
            .map(|special| SpecialAttack::new(special.damage, special.range_multiplier, special.cooldown))
    }

    /// Reject definitions that would make a broken actor.
    pub fn validate(&self, path: &Path) -> Result<(), DataLoadError> {
        let problem = if self.max_health <= 0.0 {
            Some("max_health must be positive")
        } else if self.attack_range < 0.0 || self.chase_range < 0.0 {
            Some("ranges must not be negative")
        } else if self.attack_cooldown < 0.0 {
            Some("attack_cooldown must not be negative")
        } else {
            None
        };
        match problem {
            Some(details) => Err(DataLoadError::Invalid {
                path: path.display().to_string(),
                details: details.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Resource holding all enemy definitions by key.
#[derive(Resource, Debug)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let definitions = [
            ("slime", EnemyDefinition::slime()),
            ("flying", EnemyDefinition::flying()),
            ("boss", EnemyDefinition::boss()),
        ]
        .into_iter()
        .map(|(key, definition)| (key.to_string(), definition))
        .collect();
        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    pub fn insert(&mut self, enemy_type: impl Into<String>, definition: EnemyDefinition) {
        self.definitions.insert(enemy_type.into(), definition);
    }

    /// Load every definition file in `dir`, overriding entries with the same key.
    ///
    /// Bad files are skipped and returned so the caller can report them.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<DataLoadError>, DataLoadError> {
        let mut failures = Vec::new();

        for path in ron_files_in(dir)? {
            let loaded = read_ron_file::<EnemyDefinition>(&path)
                .and_then(|definition| definition.validate(&path).map(|_| definition));
            match loaded {
                Ok(definition) => {
                    let enemy_type = data_key(&path);
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    self.insert(enemy_type, definition);
                }
                Err(e) => failures.push(e),
            }
        }

        Ok(failures)
    }
}

/// Load enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    match registry.load_dir(Path::new(ENEMY_DATA_DIR)) {
        Ok(failures) => {
            for failure in failures {
                error!("Skipping enemy definition: {}", failure);
            }
        }
        Err(e) => warn!("{}; using built-in enemy definitions", e),
    }

    info!("{} enemy definitions available", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtins_present() {
        let registry = EnemyRegistry::default();
        assert_eq!(registry.get("slime").map(|d| d.score_value), Some(500));
        assert_eq!(registry.get("flying").map(|d| d.locomotion), Some(Locomotion::Flying));
        let boss = registry.get("boss").unwrap();
        let special = boss.special_attack().unwrap();
        assert_eq!(special.reach(boss.attack_range), 6.0);
        assert_eq!(special.cooldown_duration, 5.0);
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("slime.ron"),
            r#"(
                name: "Big Slime",
                max_health: 90.0,
                move_speed: 2.0,
                attack_damage: 8,
                attack_range: 2.0,
                attack_cooldown: 1.5,
                chase_range: 8.0,
                lose_chase_range: 9.5,
                score_value: 750,
            )"#,
        )
        .unwrap();

        let mut registry = EnemyRegistry::default();
        let failures = registry.load_dir(dir.path()).unwrap();
        assert!(failures.is_empty());

        let slime = registry.get("slime").unwrap();
        assert_eq!(slime.name, "Big Slime");
        assert_eq!(slime.locomotion, Locomotion::Ground);
        assert_eq!(slime.max_horizontal_speed, 5.0);
        assert!(registry.get("boss").is_some());
    }

    #[test]
    fn test_bad_files_are_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.ron"), "(name: ").unwrap();
        fs::write(
            dir.path().join("ghost.ron"),
            r#"(
                name: "Ghost",
                max_health: 0.0,
                move_speed: 1.0,
                attack_damage: 1,
                attack_range: 1.0,
                attack_cooldown: 1.0,
                chase_range: 4.0,
                lose_chase_range: 5.0,
                score_value: 1,
            )"#,
        )
        .unwrap();

        let mut registry = EnemyRegistry::default();
        let failures = registry.load_dir(dir.path()).unwrap();
        assert_eq!(failures.len(), 2);
        assert!(registry.get("ghost").is_none());
    }

    #[test]
    fn test_missing_directory_keeps_builtins() {
        let mut registry = EnemyRegistry::default();
        assert!(registry.load_dir(Path::new("no/such/dir")).is_err());
        assert_eq!(registry.definitions.len(), 3);
    }
}
