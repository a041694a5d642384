//! Pixel Dash headless runner
//!
//! Plays the built-in level with the seeded autopilot and prints a JSON
//! summary of the final state. Frontends embed the library instead.
//!
//! Usage: pixel-dash [TUNING.json] [--seed N] [--seconds N]

use std::error::Error;

use serde::Serialize;

use pixel_dash::consts::*;
use pixel_dash::sim::{Autopilot, GameEvent, GameSession, SessionPhase, tick};
use pixel_dash::{Level, Tuning};

/// Runner holding the session and its input source
struct Runner {
    session: GameSession,
    autopilot: Autopilot,
    accumulator: f32,
}

impl Runner {
    fn new(session: GameSession, seed: u64) -> Self {
        Self {
            session,
            autopilot: Autopilot::new(seed),
            accumulator: 0.0,
        }
    }

    /// Run as many fixed ticks as `dt` seconds of host time allow
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.autopilot.next_input(&self.session.snapshot());
            tick(&mut self.session, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.session.drain_events() {
                log_event(&event);
            }
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Jumped => log::trace!("Jump"),
        GameEvent::CoinCollected { row, col } => log::debug!("Coin at ({}, {})", row, col),
        GameEvent::PowerupCollected { badge: Some(i) } => log::info!("Badge {} revealed", i),
        GameEvent::LevelCleared => log::info!("Level cleared"),
        GameEvent::GameOver { cause } => log::info!("Game over: {:?}", cause),
        other => log::debug!("{:?}", other),
    }
}

#[derive(Debug)]
struct Args {
    tuning_path: Option<String>,
    seed: u64,
    seconds: u32,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        tuning_path: None,
        seed: 0,
        seconds: 120,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value.parse()?;
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                args.seconds = value.parse()?;
            }
            _ if arg.starts_with("--") => return Err(format!("unknown flag: {}", arg).into()),
            _ => args.tuning_path = Some(arg),
        }
    }
    Ok(args)
}

/// Final state printed on exit
#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    phase: SessionPhase,
    score: u32,
    coins: u32,
    lives: u8,
    time_remaining_secs: u32,
    badges_collected: usize,
    player_x: f32,
}

/// Host frames at the simulation rate, clamped for huge durations
fn frame_count(seconds: u32) -> u32 {
    seconds.saturating_mul(TICKS_PER_SECOND)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args()?;
    log::info!("Pixel Dash (headless) starting with seed {}", args.seed);

    let tuning = match &args.tuning_path {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let level = Level::pixel_hills()?;
    let mut runner = Runner::new(GameSession::new(level, tuning), args.seed);

    let frames = frame_count(args.seconds);
    for _ in 0..frames {
        runner.update(SIM_DT);
        if runner.session.phase().is_terminal() {
            break;
        }
    }

    let snap = runner.session.snapshot();
    let summary = Summary {
        seed: args.seed,
        ticks: runner.session.time_ticks(),
        phase: snap.phase,
        score: snap.score,
        coins: snap.coins,
        lives: snap.lives,
        time_remaining_secs: snap.time_remaining_secs,
        badges_collected: snap.badges_collected,
        player_x: snap.player.body.pos.x,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
