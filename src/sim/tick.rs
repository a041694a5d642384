//! Fixed timestep simulation tick
//!
//! Advances a session deterministically. Order within one step:
//! countdown, player motion, enemy patrol, mushroom motion, enemy contacts,
//! mushroom pickups, coins, score text, then fall-death and finish checks.

use serde::{Deserialize, Serialize};

use super::ai;
use super::collision::{self, DamageOutcome, EnemyContact};
use super::grid::TileKind;
use super::kinematics::{self, VerticalContact, WallResponse};
use super::state::{GameEvent, GameOverCause, GameSession, Mushroom, ScoreIndicator, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Horizontal stick axis in [-1, 1]
    pub move_axis: f32,
    /// Jump button pressed this tick
    pub jump: bool,
    /// Close the badge dialog
    pub dismiss_dialog: bool,
    /// Start over
    pub restart: bool,
}

/// Apply one tick's input, then advance the session by one fixed step
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if input.restart {
        session.restart();
    }
    if input.dismiss_dialog {
        session.dismiss_dialog();
    }
    session.apply_move_intent(input.move_axis);
    if input.jump {
        session.apply_jump_intent();
    }
    session.tick(1);
}

impl GameSession {
    /// Advance by `delta_ticks` fixed steps
    pub fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.step();
        }
    }

    fn step(&mut self) {
        match self.phase {
            SessionPhase::Active => {}
            SessionPhase::PausedForDialog => {
                // The countdown waits for the dialog; invincibility does not
                self.player.tick_invincibility();
                return;
            }
            SessionPhase::GameOver | SessionPhase::LevelComplete => return,
        }

        self.time_ticks += 1;
        if self.advance_countdown() {
            return;
        }

        self.player.tick_invincibility();
        let vy_before = self.player.body.vel.y;
        self.move_player();

        for enemy in &mut self.enemies {
            ai::patrol(enemy);
        }
        for mushroom in &mut self.mushrooms {
            ai::update_mushroom(mushroom, &self.grid, &self.tuning);
        }
        let death_y = self.fall_death_y();
        self.mushrooms.retain(|m| m.body.pos.y <= death_y);

        self.resolve_enemy_contacts(vy_before);
        self.resolve_powerup_contacts();
        self.collect_coins();

        for indicator in &mut self.score_indicators {
            indicator.ticks_left = indicator.ticks_left.saturating_sub(1);
        }
        self.score_indicators.retain(|s| s.ticks_left > 0);

        self.check_fall_death();
        self.check_finish();
    }

    /// Count down one tick; returns true if time ran out
    fn advance_countdown(&mut self) -> bool {
        self.second_ticks += 1;
        if self.second_ticks < self.tuning.ticks_per_second {
            return false;
        }
        self.second_ticks = 0;
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            self.end_game(GameOverCause::TimeUp);
            return true;
        }
        false
    }

    fn move_player(&mut self) {
        let tile = self.tuning.tile_size;
        kinematics::resolve_horizontal(&mut self.player.body, &self.grid, tile, WallResponse::Stop);

        match kinematics::resolve_vertical(&mut self.player.body, &self.grid, &self.tuning) {
            VerticalContact::Landed { .. } => {
                // Safe position only moves on touchdown, not while walking
                if !self.player.grounded {
                    self.player.safe_pos = self.player.body.pos;
                }
                self.player.grounded = true;
                self.player.jump_count = 0;
            }
            VerticalContact::HeadBump { row, col } => {
                self.player.grounded = false;
                self.strike_block(row, col);
            }
            VerticalContact::Airborne => self.player.grounded = false,
        }
    }

    /// One-shot QuestionBlock effect
    fn strike_block(&mut self, row: i32, col: i32) {
        if self.grid.tile_at(row, col) != Some(TileKind::QuestionBlock) {
            return;
        }
        if let Err(e) = self.grid.set_tile(row, col, TileKind::Empty) {
            log::warn!("Could not clear struck block: {}", e);
            return;
        }

        let quota_open =
            self.collected_badges.len() + self.mushrooms.len() < self.level.badges.len();
        let room_above = self.grid.tile_at(row - 1, col) == Some(TileKind::Empty);
        let spawned = quota_open && room_above;
        if spawned {
            self.mushrooms
                .push(Mushroom::spawn_in_cell(row - 1, col, &self.tuning));
        }

        log::debug!("Hit block at row={}, col={} (mushroom: {})", row, col, spawned);
        self.events.push(GameEvent::BlockHit {
            row,
            col,
            spawned_mushroom: spawned,
        });
    }

    fn resolve_enemy_contacts(&mut self, vy_before: f32) {
        for i in 0..self.enemies.len() {
            if self.phase != SessionPhase::Active {
                return;
            }
            if !self.enemies[i].alive {
                continue;
            }

            let player_box = self.player.body.aabb();
            let enemy_box = self.enemies[i].aabb();
            match collision::classify_enemy_contact(&player_box, vy_before, &enemy_box) {
                None => {}
                Some(EnemyContact::Stomp) => {
                    let enemy = &mut self.enemies[i];
                    enemy.alive = false;
                    self.player.body.vel.y = self.tuning.stomp_rebound;
                    self.score += self.tuning.stomp_score;
                    self.score_indicators.push(ScoreIndicator {
                        pos: enemy.pos,
                        text: format!("+{}", self.tuning.stomp_score),
                        ticks_left: self.tuning.score_indicator_ticks,
                    });
                    self.events.push(GameEvent::EnemyStomped { enemy: i });
                }
                Some(EnemyContact::Damage) => self.damage_player(),
            }
        }
    }

    fn damage_player(&mut self) {
        let outcome = collision::apply_damage(&mut self.player, &self.tuning);
        self.apply_damage_outcome(outcome);
    }

    fn apply_damage_outcome(&mut self, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Shrunk => self.events.push(GameEvent::PlayerDamaged),
            DamageOutcome::Respawned { lives_left } => {
                log::info!("Player died, {} lives left", lives_left);
                self.events.push(GameEvent::PlayerDied { lives_left });
            }
            DamageOutcome::Died => {
                self.events.push(GameEvent::PlayerDied { lives_left: 0 });
                self.end_game(GameOverCause::OutOfLives);
            }
        }
    }

    /// Mushroom entities, then spawner tiles under the player
    fn resolve_powerup_contacts(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        let player_box = self.player.body.aabb();

        let mut collected = 0;
        for mushroom in &mut self.mushrooms {
            if mushroom.active && player_box.overlaps(&mushroom.body.aabb()) {
                mushroom.active = false;
                collected += 1;
            }
        }
        self.mushrooms.retain(|m| m.active);

        for (row, col) in player_box.cells(self.tuning.tile_size) {
            if self.grid.tile_at(row, col) == Some(TileKind::MushroomSpawner)
                && self.grid.set_tile(row, col, TileKind::Empty).is_ok()
            {
                collected += 1;
            }
        }

        for _ in 0..collected {
            self.collect_powerup();
        }
    }

    fn collect_powerup(&mut self) {
        self.player.grow(&self.tuning);

        let next = self.collected_badges.len();
        let badge = (next < self.level.badges.len()).then_some(next);
        if let Some(index) = badge {
            self.collected_badges.push(index);
            self.pending_badge = Some(index);
            self.phase = SessionPhase::PausedForDialog;
            log::info!("Badge unlocked: {}", self.level.badges[index].name);
        }
        self.events.push(GameEvent::PowerupCollected { badge });
    }

    fn collect_coins(&mut self) {
        let player_box = self.player.body.aabb();
        for (row, col) in player_box.cells(self.tuning.tile_size) {
            if self.grid.tile_at(row, col) == Some(TileKind::Coin)
                && self.grid.set_tile(row, col, TileKind::Empty).is_ok()
            {
                self.coins += 1;
                self.events.push(GameEvent::CoinCollected { row, col });
            }
        }
    }

    fn check_fall_death(&mut self) {
        if self.phase != SessionPhase::Active || self.player.body.pos.y <= self.fall_death_y() {
            return;
        }
        let outcome = collision::apply_fall_death(&mut self.player, &self.tuning);
        self.apply_damage_outcome(outcome);
    }

    fn check_finish(&mut self) {
        let finish_x = self.level.finish_world_x(&self.tuning);
        if self.phase != SessionPhase::Active || self.player.body.pos.x < finish_x {
            return;
        }
        self.phase = SessionPhase::LevelComplete;
        self.events.push(GameEvent::LevelCleared);
        log::info!(
            "Level complete: {} coins, score {}, {}s left",
            self.coins,
            self.score,
            self.time_remaining_secs
        );
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.phase = SessionPhase::GameOver;
        self.events.push(GameEvent::GameOver { cause });
        log::info!("Game over ({:?}) after {} ticks", cause, self.time_ticks);
    }
}
