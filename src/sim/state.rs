//! Game state and core simulation types
//!
//! The session exclusively owns every entity list and the mutable tile grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::grid::TileGrid;
use crate::level::{EnemySpawn, Level};
use crate::tuning::Tuning;

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulation running
    Active,
    /// A skill badge is being shown; simulation halts until dismissed
    PausedForDialog,
    /// Run ended (time up or out of lives)
    GameOver,
    /// Finish line reached
    LevelComplete,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::GameOver | SessionPhase::LevelComplete)
    }
}

/// Why a run ended in GameOver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    TimeUp,
    OutOfLives,
}

/// Side-channel notifications for audio/UI, collected per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// A QuestionBlock was struck from below
    BlockHit { row: i32, col: i32, spawned_mushroom: bool },
    /// Mushroom or spawner tile collected; carries the revealed badge index
    PowerupCollected { badge: Option<usize> },
    EnemyStomped { enemy: usize },
    CoinCollected { row: i32, col: i32 },
    /// Hit while super: shrank instead of losing a life
    PlayerDamaged,
    PlayerDied { lives_left: u8 },
    LevelCleared,
    GameOver { cause: GameOverCause },
}

/// Facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Position (top-left), velocity and extent of a moving box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Jumps used since last touching ground
    pub jump_count: u8,
    pub grounded: bool,
    /// Enlarged form from a power-up
    pub is_super: bool,
    /// Ticks of damage immunity left
    pub invincible_ticks: u32,
    pub lives: u8,
    /// Where the player last touched down, used as the respawn point
    pub safe_pos: Vec2,
}

impl Player {
    pub fn spawn(start: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(start, Vec2::new(tuning.player_width, tuning.player_height)),
            facing: Facing::Right,
            jump_count: 0,
            grounded: false,
            is_super: false,
            invincible_ticks: 0,
            lives: tuning.starting_lives,
            safe_pos: start,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn tick_invincibility(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
    }

    /// Grow into super form, keeping the feet planted
    pub fn grow(&mut self, tuning: &Tuning) {
        if self.is_super {
            return;
        }
        self.is_super = true;
        self.body.size.y = tuning.super_player_height;
        self.body.pos.y -= tuning.growth_delta();
    }

    /// Return to normal form, keeping the feet planted
    pub fn shrink(&mut self, tuning: &Tuning) {
        if !self.is_super {
            return;
        }
        self.is_super = false;
        self.body.size.y = tuning.player_height;
        self.body.pos.y += tuning.growth_delta();
    }

    /// Move back to the safe position with no momentum
    pub fn return_to_safe(&mut self) {
        self.body.pos = self.safe_pos;
        self.body.vel = Vec2::ZERO;
        self.jump_count = 0;
        self.grounded = false;
    }

    /// Return to the safe position with a fresh invincibility window
    pub fn respawn(&mut self, invincible_ticks: u32) {
        self.return_to_safe();
        self.invincible_ticks = invincible_ticks;
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// +1 (right) or -1 (left)
    pub direction: f32,
    pub speed: f32,
    pub origin_x: f32,
    /// Half-width of the patrol band around `origin_x`
    pub patrol_range: f32,
    /// False once stomped; squashed enemies stay for rendering
    pub alive: bool,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn, tuning: &Tuning) -> Self {
        let pos = spawn.world_pos(tuning);
        Self {
            pos,
            size: Vec2::splat(tuning.enemy_size),
            direction: 1.0,
            speed: tuning.enemy_speed,
            origin_x: pos.x,
            patrol_range: spawn.patrol_range * tuning.tile_size,
            alive: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A power-up mushroom released from a QuestionBlock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mushroom {
    pub body: Body,
    pub active: bool,
}

impl Mushroom {
    /// Spawn sitting in the cell at (row, col), resting on that cell's floor
    pub fn spawn_in_cell(row: i32, col: i32, tuning: &Tuning) -> Self {
        let tile = tuning.tile_size;
        let size = tuning.mushroom_size;
        let pos = Vec2::new(
            col as f32 * tile + (tile - size) / 2.0,
            (row + 1) as f32 * tile - size,
        );
        let mut body = Body::new(pos, Vec2::splat(size));
        body.vel.x = tuning.mushroom_speed;
        Self { body, active: true }
    }
}

/// Floating score text ("+100"), purely cosmetic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreIndicator {
    pub pos: Vec2,
    pub text: String,
    pub ticks_left: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Pristine level asset (restart source)
    pub(crate) level: Level,
    pub(crate) tuning: Tuning,
    /// Live terrain, mutated by block hits and pickups
    pub(crate) grid: TileGrid,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) mushrooms: Vec<Mushroom>,
    pub(crate) score_indicators: Vec<ScoreIndicator>,
    pub(crate) coins: u32,
    pub(crate) score: u32,
    pub(crate) time_remaining_secs: u32,
    /// Ticks elapsed inside the current countdown second
    pub(crate) second_ticks: u32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Badge indices in the order they were revealed
    pub(crate) collected_badges: Vec<usize>,
    /// Badge waiting on the dialog
    pub(crate) pending_badge: Option<usize>,
    pub(crate) phase: SessionPhase,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new session at the start of `level`
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::spawn(level.player_spawn_pos(&tuning), &tuning);
        let mut session = Self {
            grid: level.grid.clone(),
            player,
            enemies: Vec::new(),
            mushrooms: Vec::new(),
            score_indicators: Vec::new(),
            coins: 0,
            score: 0,
            time_remaining_secs: tuning.time_limit_secs,
            second_ticks: 0,
            time_ticks: 0,
            collected_badges: Vec::new(),
            pending_badge: None,
            phase: SessionPhase::Active,
            events: Vec::new(),
            level,
            tuning,
        };
        session.reset();
        log::info!(
            "Session started: {}x{} tiles, {} enemies, {} badges",
            session.grid.width(),
            session.grid.height(),
            session.enemies.len(),
            session.level.badges.len()
        );
        session
    }

    /// Reset every field to its initial value and restore pristine terrain
    pub fn restart(&mut self) {
        self.reset();
        log::info!("Session restarted");
    }

    fn reset(&mut self) {
        self.grid.restore(&self.level.grid);
        self.player = Player::spawn(self.level.player_spawn_pos(&self.tuning), &self.tuning);
        self.enemies = self
            .level
            .enemies
            .iter()
            .map(|spawn| Enemy::from_spawn(spawn, &self.tuning))
            .collect();
        self.mushrooms.clear();
        self.score_indicators.clear();
        self.coins = 0;
        self.score = 0;
        self.time_remaining_secs = self.tuning.time_limit_secs;
        self.second_ticks = 0;
        self.time_ticks = 0;
        self.collected_badges.clear();
        self.pending_badge = None;
        self.phase = SessionPhase::Active;
        self.events.clear();
    }

    /// Set horizontal velocity from an input axis (clamped to [-1, 1])
    pub fn apply_move_intent(&mut self, axis: f32) {
        let axis = if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.player.body.vel.x = axis * self.tuning.move_speed;
        if axis < 0.0 {
            self.player.facing = Facing::Left;
        } else if axis > 0.0 {
            self.player.facing = Facing::Right;
        }
    }

    /// Jump if any jumps remain. Mid-air jumps are allowed up to the cap.
    pub fn apply_jump_intent(&mut self) {
        if self.phase != SessionPhase::Active || self.player.jump_count >= self.tuning.max_jumps {
            return;
        }
        self.player.body.vel.y = self.tuning.jump_velocity;
        self.player.grounded = false;
        self.player.jump_count += 1;
        self.events.push(GameEvent::Jumped);
    }

    /// Close the badge dialog and resume play
    pub fn dismiss_dialog(&mut self) {
        if self.phase == SessionPhase::PausedForDialog {
            self.phase = SessionPhase::Active;
            self.pending_badge = None;
        }
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Height of the playable area in world units
    pub(crate) fn play_height(&self) -> f32 {
        self.grid.height() as f32 * self.tuning.tile_size
    }

    /// Vertical position past which a fall is fatal
    pub(crate) fn fall_death_y(&self) -> f32 {
        self.play_height() + self.tuning.fall_margin_heights * self.player.body.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use proptest::prelude::*;

    fn session() -> GameSession {
        GameSession::new(Level::pixel_hills().unwrap(), Tuning::default())
    }

    #[test]
    fn test_new_session_defaults() {
        let s = session();
        assert_eq!(s.phase, SessionPhase::Active);
        assert_eq!(s.player.lives, 3);
        assert_eq!(s.coins, 0);
        assert_eq!(s.enemies.len(), s.level.enemies.len());
        assert!(s.enemies.iter().all(|e| e.alive));
        assert_eq!(s.time_remaining_secs, s.tuning.time_limit_secs);
    }

    #[test]
    fn test_move_intent_sets_velocity_and_facing() {
        let mut s = session();
        s.apply_move_intent(-0.5);
        assert_eq!(s.player.body.vel.x, -0.5 * s.tuning.move_speed);
        assert_eq!(s.player.facing, Facing::Left);

        s.apply_move_intent(0.0);
        assert_eq!(s.player.body.vel.x, 0.0);
        assert_eq!(s.player.facing, Facing::Left);

        s.apply_move_intent(f32::NAN);
        assert_eq!(s.player.body.vel.x, 0.0);
    }

    #[test]
    fn test_jump_count_is_capped() {
        let mut s = session();
        for _ in 0..3 {
            s.apply_jump_intent();
        }
        assert_eq!(s.player.jump_count, 3);
        s.player.body.vel.y = 4.0;

        // Fourth jump is a no-op
        s.apply_jump_intent();
        assert_eq!(s.player.jump_count, 3);
        assert_eq!(s.player.body.vel.y, 4.0);
        let jumps = s
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Jumped)
            .count();
        assert_eq!(jumps, 3);
    }

    #[test]
    fn test_grow_and_shrink_keep_feet_planted() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(Vec2::new(100.0, 662.0), &tuning);
        let feet = player.body.bottom();

        player.grow(&tuning);
        assert!(player.is_super);
        assert_eq!(player.body.size.y, tuning.super_player_height);
        assert_eq!(player.body.bottom(), feet);

        player.shrink(&tuning);
        assert!(!player.is_super);
        assert_eq!(player.body.size.y, tuning.player_height);
        assert_eq!(player.body.bottom(), feet);
    }

    #[test]
    fn test_dismiss_only_leaves_dialog_phase() {
        let mut s = session();
        s.phase = SessionPhase::GameOver;
        s.dismiss_dialog();
        assert_eq!(s.phase, SessionPhase::GameOver);

        s.phase = SessionPhase::PausedForDialog;
        s.pending_badge = Some(0);
        s.dismiss_dialog();
        assert_eq!(s.phase, SessionPhase::Active);
        assert_eq!(s.pending_badge, None);
    }

    proptest! {
        #[test]
        fn move_intent_never_exceeds_move_speed(axis in proptest::num::f32::ANY) {
            let mut s = session();
            s.apply_move_intent(axis);
            let vx = s.player.body.vel.x;
            prop_assert!(vx.is_finite());
            prop_assert!(vx.abs() <= s.tuning.move_speed);
        }
    }
}
