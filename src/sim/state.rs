//! Game state and core simulation types
//!
//! `GameState` owns every entity and both scores. Outside the `sim` module
//! the state is read through accessors or a [`Snapshot`]; it changes only
//! through [`tick`](super::tick) and [`GameState::restart`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The fixed play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }
}

/// Which paddle a score, win or entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human, left paddle
    Player,
    /// Scripted, right paddle
    Opponent,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Opponent => "Opponent",
        }
    }
}

/// Vertical paddle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// A paddle. Only its vertical position ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
}

impl Paddle {
    pub fn new(side: Side, arena: &Arena) -> Self {
        let x = match side {
            Side::Player => PADDLE_MARGIN,
            Side::Opponent => arena.width - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        let y = arena.height / 2 - PADDLE_HEIGHT / 2;
        Self {
            side,
            rect: Rect::new(x, y, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Step one `PADDLE_SPEED` in `dir`.
    ///
    /// A step that would leave the arena is refused outright rather than
    /// clipped. Returns whether the paddle moved.
    pub fn move_dir(&mut self, dir: Direction, arena: &Arena) -> bool {
        let dy = match dir {
            Direction::Up => -PADDLE_SPEED,
            Direction::Down => PADDLE_SPEED,
        };
        let top = self.rect.top() + dy;
        if top < 0 || top + self.rect.h > arena.height {
            return false;
        }
        self.rect.y = top;
        true
    }

    /// Back to vertical center, horizontal position untouched
    pub fn recenter(&mut self, arena: &Arena) {
        self.rect.y = arena.height / 2 - self.rect.h / 2;
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Each component is always +/- `BALL_SPEED`
    pub vel: IVec2,
}

impl Ball {
    /// Centered in the arena, heading down-right
    pub fn new(arena: &Arena) -> Self {
        let mut rect = Rect::new(0, 0, BALL_SIZE, BALL_SIZE);
        rect.set_center(arena.center());
        Self {
            rect,
            vel: IVec2::splat(BALL_SPEED),
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    /// Serve again from the center after a point, both directions reversed
    pub fn reset(&mut self, arena: &Arena) {
        self.rect.set_center(arena.center());
        self.vel = -self.vel;
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point and return the new total for that side
    pub fn increment(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot += 1;
        *slot
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Playing,
    GameOver { winner: Side },
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball touched the top or bottom wall
    WallHit,
    /// Ball overlapped a paddle
    PaddleHit,
    /// Ball reached a side wall
    Score { scorer: Side },
    /// A side reached `WIN_SCORE`
    GameOver { winner: Side },
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Arena,
    pub player: Rect,
    pub opponent: Rect,
    pub ball: Rect,
    pub ball_vel: IVec2,
    pub score: Score,
    pub mode: GameMode,
    pub ticks: u64,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) arena: Arena,
    pub(crate) player: Paddle,
    pub(crate) opponent: Paddle,
    pub(crate) ball: Ball,
    pub(crate) score: Score,
    pub(crate) mode: GameMode,
    /// Playing ticks since the game (re)started
    pub(crate) ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Arena::default())
    }
}

impl GameState {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            player: Paddle::new(Side::Player, &arena),
            opponent: Paddle::new(Side::Opponent, &arena),
            ball: Ball::new(&arena),
            score: Score::new(),
            mode: GameMode::Playing,
            ticks: 0,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn opponent(&self) -> &Paddle {
        &self.opponent
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.mode, GameMode::GameOver { .. })
    }

    /// Start a new game after a game over.
    ///
    /// Ignored while playing. Returns whether the game was restarted.
    pub fn restart(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }
        self.score = Score::new();
        self.mode = GameMode::Playing;
        self.ball = Ball::new(&self.arena);
        self.player.recenter(&self.arena);
        self.opponent.recenter(&self.arena);
        self.ticks = 0;
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            arena: self.arena,
            player: self.player.rect,
            opponent: self.opponent.rect,
            ball: self.ball.rect,
            ball_vel: self.ball.vel,
            score: self.score,
            mode: self.mode,
            ticks: self.ticks,
        }
    }
}
