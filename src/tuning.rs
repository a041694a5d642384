//! Game balance and physics tuning
//!
//! Every rule constant the simulation reads lives here so hosts can tweak
//! feel without recompiling. Missing JSON fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Physics and rules configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Edge length of a tile in world units
    pub tile_size: f32,
    /// Fixed ticks per simulated second (drives the countdown)
    pub ticks_per_second: u32,

    // === Player physics (per tick) ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub head_bump_rebound: f32,
    pub stomp_rebound: f32,
    pub move_speed: f32,
    pub max_jumps: u8,
    pub landing_tolerance: f32,
    pub head_bump_tolerance: f32,

    // === Player body ===
    pub player_width: f32,
    pub player_height: f32,
    pub super_player_height: f32,

    // === Rules ===
    pub starting_lives: u8,
    pub time_limit_secs: u32,
    pub invincibility_ticks: u32,
    /// How many player heights below the play area a fall becomes fatal
    pub fall_margin_heights: f32,

    // === Entities ===
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub mushroom_size: f32,
    pub mushroom_speed: f32,

    // === Cosmetics / scoring ===
    pub score_indicator_ticks: u32,
    pub stomp_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            ticks_per_second: TICKS_PER_SECOND,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            head_bump_rebound: HEAD_BUMP_REBOUND,
            stomp_rebound: STOMP_REBOUND,
            move_speed: MOVE_SPEED,
            max_jumps: MAX_JUMPS,
            landing_tolerance: LANDING_TOLERANCE,
            head_bump_tolerance: HEAD_BUMP_TOLERANCE,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            super_player_height: SUPER_PLAYER_HEIGHT,

            starting_lives: STARTING_LIVES,
            time_limit_secs: TIME_LIMIT_SECS,
            invincibility_ticks: INVINCIBILITY_TICKS,
            fall_margin_heights: FALL_MARGIN_HEIGHTS,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            mushroom_size: MUSHROOM_SIZE,
            mushroom_speed: MUSHROOM_SPEED,

            score_indicator_ticks: SCORE_INDICATOR_TICKS,
            stomp_score: STOMP_SCORE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents are filled with defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!(
                    "Using default tuning ({}): {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if !(self.tile_size > 0.0) {
            return invalid("tile_size must be positive");
        }
        if self.ticks_per_second == 0 {
            return invalid("ticks_per_second must be positive");
        }
        if !(self.gravity > 0.0) {
            return invalid("gravity must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity must be negative (upward)");
        }
        if self.max_jumps == 0 {
            return invalid("max_jumps must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1");
        }
        if !(self.player_width > 0.0 && self.player_height > 0.0) {
            return invalid("player size must be positive");
        }
        if self.super_player_height < self.player_height {
            return invalid("super_player_height must not be smaller than player_height");
        }
        Ok(())
    }

    /// Height difference between super and normal form
    pub fn growth_delta(&self) -> f32 {
        self.super_player_height - self.player_height
    }
}
