//! Level layouts
//!
//! A level is a constant asset: terrain, enemy patrols, the player start,
//! the finish threshold and the skill badges mushrooms unlock. Positions are
//! in tile units so the same layout works at any `Tuning::tile_size`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::grid::{TileError, TileGrid};
use crate::tuning::Tuning;

/// Errors raised while building a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level layout has no rows")]
    Empty,
    #[error(transparent)]
    Tile(#[from] TileError),
}

/// A skill badge revealed by collecting a power-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub description: String,
}

impl Badge {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Where an enemy starts and how far it walks either side (tile units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Left edge
    pub x: f32,
    /// Row line the enemy stands on
    pub ground: f32,
    pub patrol_range: f32,
}

impl EnemySpawn {
    /// Top-left world position for an enemy of `tuning.enemy_size`
    pub fn world_pos(&self, tuning: &Tuning) -> Vec2 {
        let tile = tuning.tile_size;
        Vec2::new(self.x * tile, self.ground * tile - tuning.enemy_size)
    }
}

/// A playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Pristine terrain
    pub grid: TileGrid,
    pub enemies: Vec<EnemySpawn>,
    /// Player left edge (x) and the row line under its feet (y), in tiles
    pub player_start: Vec2,
    /// Reaching this column line completes the level
    pub finish_x: f32,
    /// Badges in reveal order
    pub badges: Vec<Badge>,
}

/// Built-in level: rows top to bottom, one character per tile
const PIXEL_HILLS: [&str; 15] = [
    "........................................",
    "........................................",
    "........................................",
    "..........oooo..........................",
    "........................................",
    "...?....................................",
    "........................................",
    ".....###########?###########............",
    "....................oooo................",
    "......##########........P...............",
    "........................P...............",
    "####.##.####################.....?......",
    ".....................................CC.",
    "............^.......ooo...........m..CC.",
    "=============================...========",
];

impl Level {
    /// Parse terrain; everything else starts empty and the finish sits at
    /// the right edge of the grid
    pub fn parse(rows: &[&str]) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }
        let grid = TileGrid::parse(rows)?;
        let finish_x = grid.width() as f32;
        Ok(Self {
            grid,
            enemies: Vec::new(),
            player_start: Vec2::ZERO,
            finish_x,
            badges: Vec::new(),
        })
    }

    pub fn with_player_start(mut self, start: Vec2) -> Self {
        self.player_start = start;
        self
    }

    pub fn with_enemy(mut self, x: f32, ground: f32, patrol_range: f32) -> Self {
        self.enemies.push(EnemySpawn {
            x,
            ground,
            patrol_range,
        });
        self
    }

    pub fn with_finish_x(mut self, finish_x: f32) -> Self {
        self.finish_x = finish_x;
        self
    }

    pub fn with_badges(mut self, badges: Vec<Badge>) -> Self {
        self.badges = badges;
        self
    }

    /// Top-left world position of a freshly spawned player
    pub fn player_spawn_pos(&self, tuning: &Tuning) -> Vec2 {
        let tile = tuning.tile_size;
        Vec2::new(
            self.player_start.x * tile,
            self.player_start.y * tile - tuning.player_height,
        )
    }

    /// Finish threshold in world units
    pub fn finish_world_x(&self, tuning: &Tuning) -> f32 {
        self.finish_x * tuning.tile_size
    }

    /// The built-in level
    pub fn pixel_hills() -> Result<Self, LevelError> {
        // Standing on the row-11 ground and on the row-14 floor
        let ground = 11.0;
        let floor = 14.0;

        let level = Self::parse(&PIXEL_HILLS)?
            .with_player_start(Vec2::new(3.125, ground))
            .with_enemy(12.5, ground, 2.34375)
            .with_enemy(18.75, ground, 1.5625)
            .with_enemy(34.0625, floor, 0.9375)
            .with_finish_x(36.0)
            .with_badges(vec![
                Badge::new("Kotlin", "Modern, expressive language for the JVM."),
                Badge::new("Jetpack Compose", "Modern UI toolkit for Android."),
                Badge::new("Firebase", "Comprehensive Backend-as-a-Service (BaaS)."),
                Badge::new("2D Game Development", "Game mechanics and engine logic."),
            ]);
        Ok(level)
    }
}
