//! Level data structures and RON loading.
//!
//! A level is a character grid read through a palette, row 0 at the top.
//! Ground enemies without an explicit patrol walk the platform under them.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::error::{data_key, read_ron_file, ron_files_in, DataLoadError};
use crate::enemies::{EnemySpawn, PatrolStyle};
use crate::items::Pickup;

/// Directory scanned for level files.
pub const LEVEL_DATA_DIR: &str = "assets/data/levels";

/// What a grid character stands for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum TileDef {
    Empty,
    Solid,
    PlayerStart,
    Goal,
    /// Enemy type key in the enemy registry.
    Enemy(String),
    Item(Pickup),
}

fn default_tile_size() -> f32 {
    1.0
}

/// Palette every level starts from; a level's own entries override it.
pub fn default_palette() -> HashMap<char, TileDef> {
    HashMap::from([
        ('.', TileDef::Empty),
        (' ', TileDef::Empty),
        ('#', TileDef::Solid),
        ('P', TileDef::PlayerStart),
        ('G', TileDef::Goal),
        ('s', TileDef::Enemy("slime".to_string())),
        ('f', TileDef::Enemy("flying".to_string())),
        ('B', TileDef::Enemy("boss".to_string())),
        ('c', TileDef::Item(Pickup::coin())),
        ('h', TileDef::Item(Pickup::health_potion())),
    ])
}

/// Explicit patrol for the enemy standing at `at`.
#[derive(Debug, Clone, Deserialize)]
pub struct PatrolDef {
    pub at: (i32, i32),
    pub waypoints: Vec<(i32, i32)>,
    #[serde(default)]
    pub style: PatrolStyle,
}

/// Raw level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default)]
    pub palette: HashMap<char, TileDef>,
    pub grid: Vec<String>,
    #[serde(default)]
    pub patrols: Vec<PatrolDef>,
}

/// A horizontal run of solid tiles, merged into one collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpan {
    pub row: i32,
    pub start: i32,
    /// Inclusive.
    pub end: i32,
}

/// An enemy placed in the grid with its resolved patrol.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyPlacement {
    pub grid_pos: (i32, i32),
    pub enemy_type: String,
    pub waypoints: Vec<(i32, i32)>,
    pub style: PatrolStyle,
}

/// Processed level definition.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub number: u32,
    pub tile_size: f32,
    pub width: usize,
    pub height: usize,
    pub player_start: (i32, i32),
    pub platforms: Vec<PlatformSpan>,
    pub enemies: Vec<EnemyPlacement>,
    pub items: Vec<((i32, i32), Pickup)>,
    pub goal: Option<(i32, i32)>,
}

const BUILTIN_GRID: [&str; 12] = [
    "..............................................",
    "..............................................",
    "........................f.....................",
    "..................c.c.c................B....G.",
    "................#########........#############",
    "..............................................",
    "......c.....s.........................h.......",
    "...#############.........s.......#####........",
    "........................######................",
    "P.............................................",
    "##########..........######....................",
    "##########..........######..........######....",
];

impl LevelDefinition {
    /// Process a raw definition: resolve the palette and patrols.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let mut palette = default_palette();
        palette.extend(raw.palette);

        let height = raw.grid.len();
        let width = raw.grid.iter().map(|row| row.chars().count()).max().unwrap_or(0);

        let mut solid = vec![vec![false; width]; height];
        let mut player_start = None;
        let mut goal = None;
        let mut enemies = Vec::new();
        let mut items = Vec::new();

        for (y, row) in raw.grid.iter().enumerate() {
            for (x, character) in row.chars().enumerate() {
                let Some(tile) = palette.get(&character) else {
                    return Err(DataLoadError::UnknownPaletteEntry { character, x, y });
                };
                let pos = (x as i32, y as i32);
                match tile {
                    TileDef::Empty => {}
                    TileDef::Solid => solid[y][x] = true,
                    TileDef::PlayerStart => player_start = Some(pos),
                    TileDef::Goal => goal = Some(pos),
                    TileDef::Enemy(enemy_type) => enemies.push((pos, enemy_type.clone())),
                    TileDef::Item(pickup) => items.push((pos, *pickup)),
                }
            }
        }

        let player_start =
            player_start.ok_or_else(|| DataLoadError::MissingPlayerStart(raw.name.clone()))?;
        let platforms = merge_platforms(&solid);

        let enemies = enemies
            .into_iter()
            .map(|(grid_pos, enemy_type)| {
                let (waypoints, style) = match raw.patrols.iter().find(|patrol| patrol.at == grid_pos) {
                    Some(patrol) => (patrol.waypoints.clone(), patrol.style),
                    None => (walk_platform_below(&platforms, grid_pos), PatrolStyle::PingPong),
                };
                EnemyPlacement {
                    grid_pos,
                    enemy_type,
                    waypoints,
                    style,
                }
            })
            .collect();

        Ok(Self {
            name: raw.name,
            number: raw.number,
            tile_size: raw.tile_size,
            width,
            height,
            player_start,
            platforms,
            enemies,
            items,
            goal,
        })
    }

    /// Level used when no level files are available.
    pub fn builtin() -> Self {
        let raw = LevelDefinitionRaw {
            name: "Slime Meadow".to_string(),
            number: 1,
            tile_size: default_tile_size(),
            palette: HashMap::new(),
            grid: BUILTIN_GRID.iter().map(|row| row.to_string()).collect(),
            patrols: Vec::new(),
        };
        match Self::from_raw(raw) {
            Ok(level) => level,
            Err(e) => {
                error!("Built-in level is broken: {}", e);
                Self {
                    name: "Empty".to_string(),
                    number: 1,
                    tile_size: default_tile_size(),
                    width: 1,
                    height: 1,
                    player_start: (0, 0),
                    platforms: Vec::new(),
                    enemies: Vec::new(),
                    items: Vec::new(),
                    goal: None,
                }
            }
        }
    }

    /// Convert grid coordinates to world position (center of tile).
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec2 {
        let flipped = self.height as i32 - 1 - y;
        Vec2::new(
            x as f32 * self.tile_size + self.tile_size / 2.0,
            flipped as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// Center and size of a platform in world space.
    pub fn platform_rect(&self, span: &PlatformSpan) -> (Vec2, Vec2) {
        let left = self.grid_to_world(span.start, span.row);
        let right = self.grid_to_world(span.end, span.row);
        let tiles = (span.end - span.start + 1) as f32;
        ((left + right) / 2.0, Vec2::new(tiles * self.tile_size, self.tile_size))
    }

    /// World-space spawn description for an enemy placement.
    pub fn enemy_spawn(&self, placement: &EnemyPlacement) -> EnemySpawn {
        let (x, y) = placement.grid_pos;
        EnemySpawn {
            enemy_type: placement.enemy_type.clone(),
            position: self.grid_to_world(x, y),
            waypoints: placement
                .waypoints
                .iter()
                .map(|&(wx, wy)| self.grid_to_world(wx, wy))
                .collect(),
            style: placement.style,
        }
    }
}

/// Merge solid cells into horizontal runs, row by row.
fn merge_platforms(solid: &[Vec<bool>]) -> Vec<PlatformSpan> {
    let mut spans = Vec::new();
    for (row, cells) in solid.iter().enumerate() {
        let mut start = None;
        for (x, &is_solid) in cells.iter().chain(std::iter::once(&false)).enumerate() {
            match (is_solid, start) {
                (true, None) => start = Some(x),
                (false, Some(from)) => {
                    spans.push(PlatformSpan {
                        row: row as i32,
                        start: from as i32,
                        end: x as i32 - 1,
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }
    spans
}

/// Waypoints at both ends of the platform directly below `pos`.
///
/// Empty when standing on nothing, so the enemy holds position.
fn walk_platform_below(platforms: &[PlatformSpan], pos: (i32, i32)) -> Vec<(i32, i32)> {
    let (x, y) = pos;
    let Some(span) = platforms
        .iter()
        .find(|span| span.row == y + 1 && span.start <= x && x <= span.end)
    else {
        return Vec::new();
    };
    if span.start == span.end {
        vec![(x, y)]
    } else {
        vec![(span.start, y), (span.end, y)]
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }

    /// Level keys in play order.
    pub fn ordered_keys(&self) -> Vec<String> {
        let mut keys: Vec<(&u32, &String)> = self
            .levels
            .iter()
            .map(|(key, level)| (&level.number, key))
            .collect();
        keys.sort();
        keys.into_iter().map(|(_, key)| key.clone()).collect()
    }

    pub fn first_key(&self) -> Option<String> {
        self.ordered_keys().into_iter().next()
    }

    /// The level after `current`, if there is one.
    pub fn next_key(&self, current: &str) -> Option<String> {
        let keys = self.ordered_keys();
        let index = keys.iter().position(|key| key == current)?;
        keys.get(index + 1).cloned()
    }

    /// Load every level file in `dir`. Bad files are skipped and returned.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<DataLoadError>, DataLoadError> {
        let mut failures = Vec::new();
        for path in ron_files_in(dir)? {
            match read_ron_file::<LevelDefinitionRaw>(&path).and_then(LevelDefinition::from_raw) {
                Ok(level) => {
                    let key = data_key(&path);
                    info!("Loaded level: {} ({})", level.name, key);
                    self.levels.insert(key, level);
                }
                Err(e) => failures.push(e),
            }
        }
        Ok(failures)
    }
}

/// Resource indicating which level to load.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "level1".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut commands: Commands) {
    let mut registry = LevelRegistry::default();

    match registry.load_dir(Path::new(LEVEL_DATA_DIR)) {
        Ok(failures) => {
            for failure in failures {
                error!("Skipping level: {}", failure);
            }
        }
        Err(e) => warn!("{}", e),
    }

    let mut current = CurrentLevel::default();
    if registry.levels.is_empty() {
        warn!("No levels loaded, using the built-in level");
        registry.levels.insert(current.name.clone(), LevelDefinition::builtin());
    } else if registry.get(&current.name).is_none() {
        if let Some(first) = registry.first_key() {
            current.name = first;
        }
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.insert_resource(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(grid: &[&str]) -> LevelDefinitionRaw {
        LevelDefinitionRaw {
            name: "test".to_string(),
            number: 1,
            tile_size: 1.0,
            palette: HashMap::new(),
            grid: grid.iter().map(|row| row.to_string()).collect(),
            patrols: Vec::new(),
        }
    }

    #[test]
    fn test_builtin_level_is_complete() {
        let level = LevelDefinition::builtin();
        assert_eq!(level.name, "Slime Meadow");
        assert!(level.goal.is_some());
        assert!(level.enemies.iter().any(|enemy| enemy.enemy_type == "boss"));
        assert!(!level.items.is_empty());
    }

    #[test]
    fn test_platforms_merge_per_row() {
        let level = LevelDefinition::from_raw(raw(&["P....", "##.##"])).unwrap();
        assert_eq!(
            level.platforms,
            vec![
                PlatformSpan { row: 1, start: 0, end: 1 },
                PlatformSpan { row: 1, start: 3, end: 4 },
            ]
        );
        let (center, size) = level.platform_rect(&level.platforms[1]);
        assert_eq!(center, Vec2::new(4.0, 0.5));
        assert_eq!(size, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_ground_enemy_walks_its_platform() {
        let level = LevelDefinition::from_raw(raw(&["P..s..", ".#####"])).unwrap();
        let slime = &level.enemies[0];
        assert_eq!(slime.waypoints, vec![(1, 0), (5, 0)]);
        assert_eq!(slime.style, PatrolStyle::PingPong);
    }

    #[test]
    fn test_enemy_over_nothing_holds() {
        let level = LevelDefinition::from_raw(raw(&["P..f..", "##...."])).unwrap();
        assert!(level.enemies[0].waypoints.is_empty());
    }

    #[test]
    fn test_explicit_patrol_wins() {
        let mut definition = raw(&["P..s..", "######"]);
        definition.patrols.push(PatrolDef {
            at: (3, 0),
            waypoints: vec![(0, 0), (2, 0), (4, 0)],
            style: PatrolStyle::Loop,
        });
        let level = LevelDefinition::from_raw(definition).unwrap();
        assert_eq!(level.enemies[0].waypoints.len(), 3);
        assert_eq!(level.enemies[0].style, PatrolStyle::Loop);
    }

    #[test]
    fn test_unknown_tile_and_missing_start() {
        let unknown = LevelDefinition::from_raw(raw(&["P?", "##"]));
        assert!(matches!(
            unknown,
            Err(DataLoadError::UnknownPaletteEntry { character: '?', x: 1, y: 0 })
        ));

        let no_start = LevelDefinition::from_raw(raw(&["..", "##"]));
        assert!(matches!(no_start, Err(DataLoadError::MissingPlayerStart(_))));
    }

    #[test]
    fn test_grid_to_world_flips_rows() {
        let level = LevelDefinition::from_raw(raw(&["P.", "##"])).unwrap();
        assert_eq!(level.grid_to_world(0, 0), Vec2::new(0.5, 1.5));
        assert_eq!(level.grid_to_world(1, 1), Vec2::new(1.5, 0.5));
    }

    #[test]
    fn test_registry_order() {
        let mut registry = LevelRegistry::default();
        for (key, number) in [("b", 2), ("a", 1), ("c", 3)] {
            let mut level = LevelDefinition::builtin();
            level.number = number;
            registry.levels.insert(key.to_string(), level);
        }
        assert_eq!(registry.first_key().as_deref(), Some("a"));
        assert_eq!(registry.next_key("a").as_deref(), Some("b"));
        assert_eq!(registry.next_key("c"), None);
        assert_eq!(registry.next_key("zzz"), None);
    }

    #[test]
    fn test_load_dir_reads_level_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cave.level.ron"),
            r#"(
                name: "Cave",
                number: 2,
                palette: { 'x': Solid },
                grid: ["P..", "xxx"],
            )"#,
        )
        .unwrap();

        let mut registry = LevelRegistry::default();
        let failures = registry.load_dir(dir.path()).unwrap();
        assert!(failures.is_empty());
        assert_eq!(registry.get("cave").map(|level| level.platforms.len()), Some(1));
    }
}
