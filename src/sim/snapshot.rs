//! Read-only view of a session for rendering, HUD and audio layers

use serde::Serialize;

use super::grid::TileGrid;
use super::state::{Enemy, GameSession, Mushroom, Player, ScoreIndicator, SessionPhase};
use crate::level::Badge;

/// Borrowed view of everything a frontend draws
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub mushrooms: &'a [Mushroom],
    pub score_indicators: &'a [ScoreIndicator],
    pub tiles: &'a TileGrid,
    pub coins: u32,
    pub score: u32,
    pub time_remaining_secs: u32,
    pub lives: u8,
    pub phase: SessionPhase,
    /// Badge awaiting its reveal dialog
    pub pending_badge: Option<&'a Badge>,
    /// Number of badges revealed so far
    pub badges_collected: usize,
    pub finish_x: f32,
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            enemies: &self.enemies,
            mushrooms: &self.mushrooms,
            score_indicators: &self.score_indicators,
            tiles: &self.grid,
            coins: self.coins,
            score: self.score,
            time_remaining_secs: self.time_remaining_secs,
            lives: self.player.lives,
            phase: self.phase,
            pending_badge: self.pending_badge.and_then(|i| self.level.badges.get(i)),
            badges_collected: self.collected_badges.len(),
            finish_x: self.level.finish_world_x(&self.tuning),
        }
    }
}
