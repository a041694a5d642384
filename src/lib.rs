//! Pixel Dash - A tile-based side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `level`: Built-in level layout and level parsing
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input widgets are external: they read a
//! [`sim::Snapshot`] and feed intents back through [`sim::GameSession`].

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::Level;
pub use sim::GameSession;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation ticks per second (one tick is ~16ms)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum fixed steps run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Edge length of one tile in world units
    pub const TILE_SIZE: f32 = 64.0;

    /// Downward acceleration added to vertical velocity each tick
    pub const GRAVITY: f32 = 2.0;
    /// Vertical velocity applied by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -30.0;
    /// Downward velocity after bumping a ceiling with the head
    pub const HEAD_BUMP_REBOUND: f32 = 12.0;
    /// Upward velocity after stomping an enemy
    pub const STOMP_REBOUND: f32 = -15.0;
    /// Horizontal speed at full move axis (units per tick)
    pub const MOVE_SPEED: f32 = 5.0;
    /// Jumps allowed before touching ground again
    pub const MAX_JUMPS: u8 = 3;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 42.0;
    pub const PLAYER_HEIGHT: f32 = 42.0;
    pub const SUPER_PLAYER_HEIGHT: f32 = 60.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Countdown length in seconds
    pub const TIME_LIMIT_SECS: u32 = 300;
    /// Post-damage invulnerability (2.5s)
    pub const INVINCIBILITY_TICKS: u32 = 150;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Mushroom defaults
    pub const MUSHROOM_SIZE: f32 = 48.0;
    pub const MUSHROOM_SPEED: f32 = 2.0;

    /// Floating "+100" text
    pub const SCORE_INDICATOR_TICKS: u32 = 45;
    pub const STOMP_SCORE: u32 = 100;

    /// Landing snaps only if the feet were at most this far below the tile top
    pub const LANDING_TOLERANCE: f32 = 20.0;
    /// Head bumps register only if the head was at most this far inside the tile
    pub const HEAD_BUMP_TOLERANCE: f32 = 10.0;
    /// Player heights below the play area before a fall counts as a death
    pub const FALL_MARGIN_HEIGHTS: f32 = 2.0;
}

/// Map a world coordinate to a grid index (`floor(coord / tile_size)`).
///
/// Negative coordinates map to negative indices, which the grid treats as
/// out of range.
#[inline]
pub fn world_to_cell(coord: f32, tile_size: f32) -> i32 {
    (coord / tile_size).floor() as i32
}
