//! Fixed-step simulation tick
//!
//! One call to [`tick`] is one logical frame. The order of the steps below
//! is part of the game's behavior: wall, paddle and scoring checks all run
//! against the ball's freshly advanced position, one after another.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::ai;
use super::state::{Direction, GameEvent, GameMode, GameState, Side};
use crate::consts::WIN_SCORE;

/// Human input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Up key held
    pub up: bool,
    /// Down key held
    pub down: bool,
}

impl TickInput {
    pub fn up() -> Self {
        Self {
            up: true,
            down: false,
        }
    }

    pub fn down() -> Self {
        Self {
            up: false,
            down: true,
        }
    }

    /// Both keys held cancel out
    pub fn direction(&self) -> Option<Direction> {
        match (self.up, self.down) {
            (true, false) => Some(Direction::Up),
            (false, true) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Advance the game by one step and report what happened.
///
/// Does nothing once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.mode != GameMode::Playing {
        return events;
    }

    let arena = state.arena;

    // 1. Player paddle
    if let Some(dir) = input.direction() {
        state.player.move_dir(dir, &arena);
    }

    // 2. Opponent paddle
    if let Some(dir) = ai::decide(&state.opponent, &state.ball, &arena).direction() {
        state.opponent.move_dir(dir, &arena);
    }

    // 3. Ball
    state.ball.advance();

    // 4. Top/bottom walls. The ball is not pushed back inside.
    let ball = state.ball.rect;
    if ball.top() <= 0 || ball.bottom() >= arena.height {
        state.ball.vel.y = -state.ball.vel.y;
        events.push(GameEvent::WallHit);
    }

    // 5. Paddles. Re-fires on every tick the overlap lasts.
    if ball.overlaps(&state.player.rect) || ball.overlaps(&state.opponent.rect) {
        state.ball.vel.x = -state.ball.vel.x;
        events.push(GameEvent::PaddleHit);
    }

    // 6. Side walls
    if state.ball.rect.left() <= 0 {
        score_point(state, Side::Opponent, &mut events);
    }
    if state.ball.rect.right() >= arena.width {
        score_point(state, Side::Player, &mut events);
    }

    state.ticks += 1;
    events
}

fn score_point(state: &mut GameState, scorer: Side, events: &mut Vec<GameEvent>) {
    let total = state.score.increment(scorer);
    events.push(GameEvent::Score { scorer });
    debug!(
        "{} scored ({} - {})",
        scorer.label(),
        state.score.player,
        state.score.opponent
    );

    if total >= WIN_SCORE {
        state.mode = GameMode::GameOver { winner: scorer };
        events.push(GameEvent::GameOver { winner: scorer });
        info!(
            "Game over: {} wins {} - {} after {} ticks",
            scorer.label(),
            state.score.player,
            state.score.opponent,
            state.ticks + 1
        );
    } else {
        state.ball.reset(&state.arena);
    }
}
