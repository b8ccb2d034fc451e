//! Paddle Duel entry point
//!
//! Sets up logging and the terminal, then runs the game loop until the
//! player quits. Logs go to stderr; redirect them (`2>paddle.log`) to keep
//! the play field clean.

use std::io;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;

use paddle_duel::audio::{AudioManager, TerminalBell};
use paddle_duel::sim::GameState;
use paddle_duel::ui::{TerminalInput, TerminalPresenter};
use paddle_duel::{FixedRateScheduler, RunSummary, Settings};

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Paddle Duel starting...");

    let settings = Settings::load();

    let terminal = ratatui::try_init()?;
    let release_events = enable_release_events();

    let summary = play(&settings, TerminalPresenter::new(terminal), release_events);

    if release_events {
        if let Err(err) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
            log::warn!("Failed to restore keyboard mode: {err}");
        }
    }
    ratatui::restore();

    log::info!(
        "Exited ({:?}) at {} - {}",
        summary.exit,
        summary.last.score.player,
        summary.last.score.opponent
    );
    Ok(())
}

fn play<B: ratatui::backend::Backend>(
    settings: &Settings,
    mut presenter: TerminalPresenter<B>,
    release_events: bool,
) -> RunSummary {
    let mut state = GameState::default();
    let mut input = TerminalInput::from_settings(settings, release_events);
    let mut audio = AudioManager::from_settings(TerminalBell, settings);
    let mut scheduler = FixedRateScheduler::from_settings(settings);

    scheduler.run(&mut state, &mut input, &mut presenter, &mut audio)
}

/// Ask the terminal to report key releases. Returns whether it will.
fn enable_release_events() -> bool {
    match supports_keyboard_enhancement() {
        Ok(true) => {
            let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            match execute!(io::stdout(), PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Failed to enable key release events: {err}");
                    false
                }
            }
        }
        Ok(false) => {
            log::info!("Terminal does not report key releases, using hold window");
            false
        }
        Err(err) => {
            log::warn!("Could not query keyboard enhancement support: {err}");
            false
        }
    }
}
