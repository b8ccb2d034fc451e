//! Scripted opponent
//!
//! Chases the ball's vertical center one paddle step per tick. No prediction.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Ball, Direction, Paddle};
use crate::consts::PADDLE_SPEED;

/// Opponent movement decision for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    Up,
    Down,
    Hold,
}

impl Steer {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Steer::Up => Some(Direction::Up),
            Steer::Down => Some(Direction::Down),
            Steer::Hold => None,
        }
    }
}

/// Decide which way the opponent paddle should move.
///
/// The downward check runs first and the upward check sees the paddle where
/// that step would leave it. A downward step that would carry the center past
/// the ball is undone by the upward check, so the paddle holds.
pub fn decide(paddle: &Paddle, ball: &Ball, arena: &Arena) -> Steer {
    let ball_y = ball.rect.center_y();
    let mut rect = paddle.rect;

    let mut steer = Steer::Hold;
    if rect.center_y() < ball_y && rect.bottom() < arena.height {
        rect.translate(IVec2::new(0, PADDLE_SPEED));
        steer = Steer::Down;
    }
    if rect.center_y() > ball_y && rect.top() > 0 {
        steer = match steer {
            Steer::Down => Steer::Hold,
            _ => Steer::Up,
        };
    }
    steer
}
