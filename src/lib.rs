//! Paddle Duel - a terminal Pong game against a scripted opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, scoring)
//! - `scheduler`: Fixed-rate loop driving the simulation
//! - `audio`: Tone synthesis for game events
//! - `ui`: Terminal rendering and keyboard input
//! - `settings`: Player preferences loaded from JSON

pub mod audio;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scheduler::{ExitReason, FixedRateScheduler, RunSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical units)
    pub const ARENA_WIDTH: i32 = 800;
    pub const ARENA_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 15;
    pub const PADDLE_HEIGHT: i32 = 90;
    /// Units per tick
    pub const PADDLE_SPEED: i32 = 5;
    /// Distance from the side wall to the paddle's outer edge
    pub const PADDLE_MARGIN: i32 = 50;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 15;
    /// Per-axis speed, units per tick. Only the sign ever changes.
    pub const BALL_SPEED: i32 = 7;

    /// First to this many points wins
    pub const WIN_SCORE: u32 = 5;

    /// Default scheduler rate
    pub const TICK_RATE_HZ: u32 = 60;
    pub const MAX_TICK_RATE_HZ: u32 = 240;
}
