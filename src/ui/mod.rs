//! Terminal front end
//!
//! Thin adapters between the simulation and a crossterm/ratatui terminal.
//! No game rules live here.

pub mod input;
pub mod render;

pub use input::{KeyCommand, TerminalInput, key_command};
pub use render::{TerminalPresenter, Viewport, draw};
