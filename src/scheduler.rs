//! Fixed-rate game loop
//!
//! Polls input, advances the simulation one tick, forwards events to the
//! audio side, renders, then sleeps for one interval. There is no catch-up:
//! a slow frame simply makes the game run slower.
//!
//! Adapters report their own faults through `io::Result`; the loop logs
//! them and carries on, so a broken terminal or sound device never stops
//! the simulation.

use std::io;
use std::time::Duration;

use log::{info, warn};

use crate::consts::{MAX_TICK_RATE_HZ, TICK_RATE_HZ};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

/// Everything the player asked for during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Paddle keys
    pub keys: TickInput,
    /// Start a new game (game over only)
    pub restart: bool,
    /// Leave the game (game over only)
    pub quit: bool,
    /// Window/terminal close request, honored in any mode
    pub close: bool,
}

/// Supplies one input frame per tick
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputFrame>;
}

/// Draws a snapshot once per tick
pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Reacts to simulation events (sound, logging, ...)
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Suspends the loop between ticks
pub trait Pacer {
    fn wait(&mut self, interval: Duration);
}

/// Real-time pacing via `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Player declined a rematch
    Quit,
    /// Window/terminal closed
    Closed,
}

/// Outcome of [`FixedRateScheduler::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Loop iterations that reached the simulation step
    pub ticks: u64,
    pub exit: ExitReason,
    /// State as last rendered
    pub last: Snapshot,
}

/// Drives [`tick`] at a fixed rate
#[derive(Debug)]
pub struct FixedRateScheduler<P: Pacer = SleepPacer> {
    interval: Duration,
    pacer: P,
}

impl FixedRateScheduler<SleepPacer> {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self::with_pacer(tick_rate_hz, SleepPacer)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_rate_hz)
    }
}

impl<P: Pacer> FixedRateScheduler<P> {
    pub fn with_pacer(tick_rate_hz: u32, pacer: P) -> Self {
        let hz = if tick_rate_hz == 0 {
            warn!("Tick rate of 0 Hz requested, using {TICK_RATE_HZ} Hz");
            TICK_RATE_HZ
        } else {
            tick_rate_hz.min(MAX_TICK_RATE_HZ)
        };
        Self {
            interval: Duration::from_secs_f64(1.0 / hz as f64),
            pacer,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Run until the player quits or closes the game.
    pub fn run(
        &mut self,
        state: &mut GameState,
        input: &mut impl InputSource,
        presenter: &mut impl Presenter,
        sink: &mut impl EventSink,
    ) -> RunSummary {
        info!(
            "Starting game loop at {:.1} Hz",
            1.0 / self.interval.as_secs_f64()
        );
        let mut ticks = 0;
        let exit = loop {
            if let Some(reason) = step(state, input, presenter, sink) {
                break reason;
            }
            ticks += 1;
            self.pacer.wait(self.interval);
        };
        info!("Game loop finished after {ticks} ticks: {exit:?}");

        RunSummary {
            ticks,
            exit,
            last: state.snapshot(),
        }
    }
}

/// One loop iteration without the wait. Returns `Some` when the loop should end.
pub fn step(
    state: &mut GameState,
    input: &mut impl InputSource,
    presenter: &mut impl Presenter,
    sink: &mut impl EventSink,
) -> Option<ExitReason> {
    let frame = input.poll().unwrap_or_else(|err| {
        warn!("Input poll failed: {err}");
        InputFrame::default()
    });

    if frame.close {
        return Some(ExitReason::Closed);
    }
    if state.is_game_over() {
        if frame.quit {
            return Some(ExitReason::Quit);
        }
        if frame.restart && state.restart() {
            info!("Rematch started");
        }
    }

    for event in tick(state, &frame.keys) {
        sink.on_event(&event);
    }

    if let Err(err) = presenter.render(&state.snapshot()) {
        warn!("Render failed: {err}");
    }
    None
}
