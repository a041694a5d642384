//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per call, no wall clock)
//! - Seeded RNG only (the autopilot; the rules themselves use none)
//! - Stable iteration order (entity lists in spawn order, grid cells row-major)
//! - No rendering or platform dependencies

pub mod ai;
pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod kinematics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Aabb, DamageOutcome, EnemyContact};
pub use grid::{TileError, TileGrid, TileKind};
pub use kinematics::{VerticalContact, WallResponse};
pub use snapshot::Snapshot;
pub use state::{
    Body, Enemy, Facing, GameEvent, GameOverCause, GameSession, Mushroom, Player, ScoreIndicator,
    SessionPhase,
};
pub use tick::{TickInput, tick};
