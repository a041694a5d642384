//! Seeded input generator
//!
//! Drives a session without a human: runs right, hops over whatever stops it,
//! and closes badge dialogs. Used by the headless runner and for replay tests,
//! where the same seed must reproduce the same run tick for tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;
use super::state::SessionPhase;
use super::tick::TickInput;

/// Ticks without forward progress before the autopilot jumps
const STALL_TICKS: u32 = 3;
/// Chance per grounded tick of a spontaneous jump
const JUMP_CHANCE: f64 = 0.03;
/// Chance per tick of easing off or backing up
const HESITATE_CHANCE: f64 = 0.1;

/// Deterministic input source
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    last_x: f32,
    stalled_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_x: f32::NEG_INFINITY,
            stalled_ticks: 0,
        }
    }

    /// Choose the input for the next tick
    pub fn next_input(&mut self, snap: &Snapshot<'_>) -> TickInput {
        match snap.phase {
            SessionPhase::PausedForDialog => {
                return TickInput {
                    dismiss_dialog: true,
                    ..Default::default()
                };
            }
            SessionPhase::GameOver | SessionPhase::LevelComplete => return TickInput::default(),
            SessionPhase::Active => {}
        }

        let x = snap.player.body.pos.x;
        if x - self.last_x < 0.5 {
            self.stalled_ticks += 1;
        } else {
            self.stalled_ticks = 0;
        }
        self.last_x = x;

        let move_axis = if self.rng.random_bool(HESITATE_CHANCE) {
            self.rng.random_range(-1.0..=0.2)
        } else {
            self.rng.random_range(0.5..=1.0)
        };

        let stalled = self.stalled_ticks > STALL_TICKS;
        let jump = stalled || (snap.player.grounded && self.rng.random_bool(JUMP_CHANCE));
        if stalled {
            self.stalled_ticks = 0;
        }

        TickInput {
            move_axis,
            jump,
            ..Default::default()
        }
    }
}
