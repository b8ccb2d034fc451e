//! Terminal renderer
//!
//! Draws a [`Snapshot`] with ratatui: bordered play field, center divider,
//! both paddles, the ball, the scores and the game-over banner. Arena
//! coordinates are scaled to whatever cell area the terminal offers.

use std::io;

use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect as CellRect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::scheduler::Presenter;
use crate::sim::{Arena, GameMode, Rect, Snapshot};

/// Maps arena units onto a cell area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    area: CellRect,
    arena: Arena,
}

impl Viewport {
    pub fn new(area: CellRect, arena: Arena) -> Self {
        Self { area, arena }
    }

    fn scale(v: i32, cells: u16, units: i32) -> i64 {
        (v as i64 * cells as i64).div_euclid(units.max(1) as i64)
    }

    fn scale_up(v: i32, cells: u16, units: i32) -> i64 {
        let units = units.max(1) as i64;
        (v as i64 * cells as i64 + units - 1).div_euclid(units)
    }

    /// Cell holding an arena point, clamped into the area
    pub fn point(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if self.area.is_empty() {
            return None;
        }
        let col = Self::scale(x, self.area.width, self.arena.width)
            .clamp(0, self.area.width as i64 - 1) as u16;
        let row = Self::scale(y, self.area.height, self.arena.height)
            .clamp(0, self.area.height as i64 - 1) as u16;
        Some((self.area.x + col, self.area.y + row))
    }

    /// Cells covered by an arena rect: at least one cell, clamped into the area
    pub fn cells(&self, rect: &Rect) -> Option<CellRect> {
        if self.area.is_empty() {
            return None;
        }
        let (w, h) = (self.area.width as i64, self.area.height as i64);

        let x0 = Self::scale(rect.left(), self.area.width, self.arena.width).clamp(0, w - 1);
        let x1 = Self::scale_up(rect.right(), self.area.width, self.arena.width).clamp(x0 + 1, w);
        let y0 = Self::scale(rect.top(), self.area.height, self.arena.height).clamp(0, h - 1);
        let y1 =
            Self::scale_up(rect.bottom(), self.area.height, self.arena.height).clamp(y0 + 1, h);

        Some(CellRect::new(
            self.area.x + x0 as u16,
            self.area.y + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}

/// Draw one frame
pub fn draw(frame: &mut Frame, snapshot: &Snapshot) {
    let area = frame.area();
    let block = Block::bordered()
        .border_type(BorderType::Thick)
        .title(Line::from(" Paddle Duel ").centered())
        .title_bottom(Line::from(" W/S or \u{2191}/\u{2193} move \u{b7} Esc exit ").centered())
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let field = block.inner(area);
    frame.render_widget(block, area);

    let view = Viewport::new(field, snapshot.arena);
    let arena = snapshot.arena;

    // Center divider
    if let Some((col, _)) = view.point(arena.width / 2, 0) {
        let divider = Block::default()
            .borders(Borders::LEFT)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(divider, CellRect::new(col, field.y, 1, field.height));
    }

    // Scores near the top, at one and three quarters of the width
    let score_y = 20;
    for (value, x) in [
        (snapshot.score.player, arena.width / 4),
        (snapshot.score.opponent, 3 * arena.width / 4),
    ] {
        if let Some((col, row)) = view.point(x, score_y) {
            let text = value.to_string();
            let cell = CellRect::new(col, row, text.len() as u16, 1).intersection(field);
            let score = Paragraph::new(text).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(score, cell);
        }
    }

    let solid = Style::default().bg(Color::White);
    for paddle in [&snapshot.player, &snapshot.opponent] {
        if let Some(cells) = view.cells(paddle) {
            frame.render_widget(Block::default().style(solid), cells);
        }
    }
    if let Some(cells) = view.cells(&snapshot.ball) {
        frame.render_widget(Block::default().style(solid), cells);
    }

    if let GameMode::GameOver { winner } = snapshot.mode {
        draw_game_over(frame, field, winner.label());
    }
}

fn draw_game_over(frame: &mut Frame, field: CellRect, winner: &str) {
    let width = 32.min(field.width);
    let height = 6.min(field.height);
    let popup = CellRect::new(
        field.x + (field.width - width) / 2,
        field.y + (field.height - height) / 2,
        width,
        height,
    );
    let text = vec![
        Line::from(""),
        Line::from(format!("{winner} Wins!")).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("Y: Restart  N: Quit"),
    ];
    let banner = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::bordered()
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::White).bg(Color::Black)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(banner, popup);
}

/// [`Presenter`] backed by a ratatui terminal
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalPresenter<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.terminal.draw(|frame| draw(frame, snapshot))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Score, Side};
    use ratatui::backend::TestBackend;

    fn presenter(w: u16, h: u16) -> TerminalPresenter<TestBackend> {
        TerminalPresenter::new(Terminal::new(TestBackend::new(w, h)).unwrap())
    }

    fn screen_text(p: &TerminalPresenter<TestBackend>) -> String {
        p.terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_viewport_scales_rects() {
        let view = Viewport::new(CellRect::new(1, 1, 80, 30), Arena::default());
        // Player paddle: x 50..65, y 255..345 -> cols 5..7, rows 12..18
        let cells = view.cells(&Rect::new(50, 255, 15, 90)).unwrap();
        assert_eq!(cells, CellRect::new(6, 13, 2, 6));
    }

    #[test]
    fn test_viewport_keeps_tiny_rects_visible() {
        let view = Viewport::new(CellRect::new(0, 0, 10, 5), Arena::default());
        let cells = view.cells(&Rect::new(400, 300, 1, 1)).unwrap();
        assert_eq!((cells.width, cells.height), (1, 1));
    }

    #[test]
    fn test_viewport_clamps_overshoot() {
        let area = CellRect::new(2, 3, 40, 20);
        let view = Viewport::new(area, Arena::default());
        let past_left = view.cells(&Rect::new(-7, -7, 15, 15)).unwrap();
        assert_eq!((past_left.x, past_left.y), (2, 3));
        let past_right = view.cells(&Rect::new(797, 597, 15, 15)).unwrap();
        assert!(past_right.right() <= area.right());
        assert!(past_right.bottom() <= area.bottom());
        assert_eq!(view.point(900, 900), Some((41, 22)));
    }

    #[test]
    fn test_viewport_empty_area() {
        let view = Viewport::new(CellRect::new(0, 0, 0, 0), Arena::default());
        assert_eq!(view.cells(&Rect::new(0, 0, 10, 10)), None);
        assert_eq!(view.point(0, 0), None);
    }

    #[test]
    fn test_renders_playing_field() {
        let mut p = presenter(82, 32);
        let snapshot = GameState::default().snapshot();
        p.render(&snapshot).unwrap();

        let text = screen_text(&p);
        assert!(text.contains("Paddle Duel"));
        assert!(!text.contains("Wins!"));

        // Player paddle cell is filled
        let view = Viewport::new(CellRect::new(1, 1, 80, 30), snapshot.arena);
        let cells = view.cells(&snapshot.player).unwrap();
        let buffer = p.terminal().backend().buffer();
        assert_eq!(buffer[(cells.x, cells.y)].bg, Color::White);
    }

    #[test]
    fn test_renders_scores() {
        let mut p = presenter(82, 32);
        let mut snapshot = GameState::default().snapshot();
        snapshot.score = Score {
            player: 3,
            opponent: 4,
        };
        p.render(&snapshot).unwrap();

        // Player score at W/4: col 1 + 20, row 1 + 1
        let buffer = p.terminal().backend().buffer();
        assert_eq!(buffer[(21, 2)].symbol(), "3");
        assert_eq!(buffer[(61, 2)].symbol(), "4");
    }

    #[test]
    fn test_renders_game_over_banner() {
        let mut p = presenter(82, 32);
        let mut snapshot = GameState::default().snapshot();
        snapshot.mode = GameMode::GameOver {
            winner: Side::Opponent,
        };
        p.render(&snapshot).unwrap();

        let text = screen_text(&p);
        assert!(text.contains("Opponent Wins!"));
        assert!(text.contains("Y: Restart  N: Quit"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let mut p = presenter(4, 3);
        let mut snapshot = GameState::default().snapshot();
        snapshot.mode = GameMode::GameOver {
            winner: Side::Player,
        };
        p.render(&snapshot).unwrap();
    }
}
