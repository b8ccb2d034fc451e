//! Keyboard input handling
//!
//! Terminals deliver key presses (and auto-repeats), not key state. A paddle
//! key therefore counts as held for a short window after its last press.
//! When the terminal reports key releases, a key is held from press to
//! release instead.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::scheduler::{InputFrame, InputSource};
use crate::settings::Settings;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Up,
    Down,
    Restart,
    Quit,
    Close,
}

/// Map a key to its command
pub fn key_command(key: &KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyCommand::Close),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(KeyCommand::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyCommand::Down),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(KeyCommand::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(KeyCommand::Quit),
        KeyCode::Esc => Some(KeyCommand::Close),
        _ => None,
    }
}

/// Tracks whether one paddle key is down
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    last_press: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, now: Instant) {
        self.last_press = Some(now);
    }

    fn release(&mut self) {
        self.last_press = None;
    }

    /// `hold` of `None` means held until released
    fn is_held(&self, now: Instant, hold: Option<Duration>) -> bool {
        match (self.last_press, hold) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(hold)) => now.saturating_duration_since(at) <= hold,
        }
    }
}

/// Keyboard input from the controlling terminal
#[derive(Debug)]
pub struct TerminalInput {
    /// `None` when the terminal reports key releases
    hold: Option<Duration>,
    up: HeldKey,
    down: HeldKey,
}

impl TerminalInput {
    pub fn new(hold: Duration, release_events: bool) -> Self {
        Self {
            hold: if release_events { None } else { Some(hold) },
            up: HeldKey::default(),
            down: HeldKey::default(),
        }
    }

    pub fn from_settings(settings: &Settings, release_events: bool) -> Self {
        Self::new(settings.key_hold(), release_events)
    }

    /// Fold one terminal event into the frame being built
    pub fn handle_event(&mut self, event: &Event, now: Instant, frame: &mut InputFrame) {
        let Event::Key(key) = event else {
            return;
        };
        let Some(command) = key_command(key) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => match command {
                KeyCommand::Up => self.up.press(now),
                KeyCommand::Down => self.down.press(now),
                KeyCommand::Restart => frame.restart = true,
                KeyCommand::Quit => frame.quit = true,
                KeyCommand::Close => frame.close = true,
            },
            KeyEventKind::Release => match command {
                KeyCommand::Up => self.up.release(),
                KeyCommand::Down => self.down.release(),
                _ => {}
            },
        }
    }

    /// Finish a frame: fill in which paddle keys are held at `now`
    pub fn finish_frame(&self, now: Instant, frame: &mut InputFrame) {
        frame.keys.up = self.up.is_held(now, self.hold);
        frame.keys.down = self.down.is_held(now, self.hold);
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        let mut frame = InputFrame::default();
        // Drain everything queued since the last tick without blocking
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(&event, Instant::now(), &mut frame);
        }
        self.finish_frame(Instant::now(), &mut frame);
        Ok(frame)
    }
}
