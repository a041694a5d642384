//! Collision detection and response between entities
//!
//! Axis-aligned boxes for player/enemy/pickup contact, stomp-versus-damage
//! classification, and the player damage rules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::tuning::Tuning;
use crate::world_to_cell;

/// Axis-aligned bounding box (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grid cells this box covers, row-major in ascending order
    pub fn cells(&self, tile: f32) -> impl Iterator<Item = (i32, i32)> {
        const SKIN: f32 = 0.01;
        let rows = world_to_cell(self.min.y, tile)..=world_to_cell(self.max.y - SKIN, tile);
        let first_col = world_to_cell(self.min.x, tile);
        let last_col = world_to_cell(self.max.x - SKIN, tile);
        rows.flat_map(move |row| (first_col..=last_col).map(move |col| (row, col)))
    }
}

/// How a player/enemy contact resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Player lands on the enemy and squashes it
    Stomp,
    /// Enemy hurts the player
    Damage,
}

/// Classify a player/enemy contact.
///
/// `vy_before` is the player's vertical velocity before this tick's gravity
/// step. A stomp needs a descending player whose feet are above the enemy's
/// vertical midpoint; every other contact is damage.
pub fn classify_enemy_contact(player: &Aabb, vy_before: f32, enemy: &Aabb) -> Option<EnemyContact> {
    if !player.overlaps(enemy) {
        return None;
    }
    if vy_before > 0.0 && player.max.y < enemy.center().y {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::Damage)
    }
}

/// Result of applying damage to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible; nothing happened
    Ignored,
    /// Lost super form instead of a life
    Shrunk,
    /// Lost a life and was moved to the safe position
    Respawned { lives_left: u8 },
    /// Last life lost
    Died,
}

/// Apply a hit from an enemy
pub fn apply_damage(player: &mut Player, tuning: &Tuning) -> DamageOutcome {
    if player.is_invincible() {
        return DamageOutcome::Ignored;
    }
    if player.is_super {
        player.shrink(tuning);
        player.invincible_ticks = tuning.invincibility_ticks;
        return DamageOutcome::Shrunk;
    }
    lose_life(player, tuning)
}

/// Apply a fall out of the world.
///
/// Same rules as an enemy hit. When the hit costs no life (invincible or
/// super) the player is still pulled back to the safe position.
pub fn apply_fall_death(player: &mut Player, tuning: &Tuning) -> DamageOutcome {
    let outcome = apply_damage(player, tuning);
    if matches!(outcome, DamageOutcome::Ignored | DamageOutcome::Shrunk) {
        player.return_to_safe();
    }
    outcome
}

fn lose_life(player: &mut Player, tuning: &Tuning) -> DamageOutcome {
    player.lives = player.lives.saturating_sub(1);
    if player.lives == 0 {
        player.body.vel = Vec2::ZERO;
        return DamageOutcome::Died;
    }
    player.respawn(tuning.invincibility_ticks);
    DamageOutcome::Respawned {
        lives_left: player.lives,
    }
}
