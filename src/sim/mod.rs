//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed logical step per tick, no wall-clock time
//! - No randomness
//! - No rendering, audio or terminal dependencies

pub mod ai;
pub mod rect;
pub mod state;
pub mod tick;

pub use ai::{Steer, decide};
pub use rect::{Rect, overlaps};
pub use state::{
    Arena, Ball, Direction, GameEvent, GameMode, GameState, Paddle, Score, Side, Snapshot,
};
pub use tick::{TickInput, tick};
