//! Audio feedback for game events
//!
//! Short sine beeps generated in code - no sound files needed. Each effect is
//! synthesised once into a PCM buffer and handed to a [`ToneSink`] whenever
//! the matching event fires. Playback is fire-and-forget: a failing sink is
//! logged and otherwise ignored.

use std::f32::consts::TAU;
use std::io::{self, Write};

use log::{debug, warn};

use crate::scheduler::EventSink;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Output sample rate for synthesised tones
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits top or bottom wall
    WallHit,
    /// Ball hits a paddle
    PaddleHit,
    /// A point was scored
    Score,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::WallHit,
        SoundEffect::PaddleHit,
        SoundEffect::Score,
    ];

    /// Effect for a simulation event. Game over is silent.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { .. } => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::WallHit => Tone::new(220.0, 0.1),
            SoundEffect::PaddleHit => Tone::new(440.0, 0.1),
            SoundEffect::Score => Tone::new(880.0, 0.2),
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::WallHit => 0,
            SoundEffect::PaddleHit => 1,
            SoundEffect::Score => 2,
        }
    }
}

/// A pure sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_secs: f32,
}

impl Tone {
    pub const fn new(freq_hz: f32, duration_secs: f32) -> Self {
        Self {
            freq_hz,
            duration_secs,
        }
    }

    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (sample_rate as f32 * self.duration_secs) as usize
    }
}

/// Interleaved stereo 16-bit PCM
#[derive(Debug, Clone, PartialEq)]
pub struct ToneBuffer {
    pub sample_rate: u32,
    pub frames: Vec<[i16; 2]>,
}

impl ToneBuffer {
    pub fn duration_secs(&self) -> f32 {
        self.frames.len() as f32 / self.sample_rate as f32
    }
}

/// Render `tone` at half amplitude scaled by `volume` (0.0 - 1.0).
pub fn synthesize(tone: Tone, volume: f32, sample_rate: u32) -> ToneBuffer {
    let amplitude = 0.5 * volume.clamp(0.0, 1.0);
    let count = tone.sample_count(sample_rate);
    let frames = (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let s = (amplitude * (TAU * tone.freq_hz * t).sin() * i16::MAX as f32) as i16;
            [s, s]
        })
        .collect();
    ToneBuffer {
        sample_rate,
        frames,
    }
}

/// Somewhere to send synthesised tones
pub trait ToneSink {
    fn play(&mut self, effect: SoundEffect, buffer: &ToneBuffer) -> io::Result<()>;
}

/// Rings the terminal bell. Terminals can't play PCM, so the buffer is unused.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl ToneSink for TerminalBell {
    fn play(&mut self, _effect: SoundEffect, _buffer: &ToneBuffer) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _buffer: &ToneBuffer) -> io::Result<()> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<S: ToneSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// One buffer per effect, indexed by `SoundEffect::index`
    bank: Vec<ToneBuffer>,
}

impl<S: ToneSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        let mut manager = Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            bank: Vec::new(),
        };
        manager.rebuild_bank();
        manager
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.master_volume = settings.master_volume.clamp(0.0, 1.0);
        manager.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        manager.muted = settings.muted;
        manager.rebuild_bank();
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.rebuild_bank();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
        self.rebuild_bank();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn buffer(&self, effect: SoundEffect) -> &ToneBuffer {
        &self.bank[effect.index()]
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        let buffer = &self.bank[effect.index()];
        if let Err(err) = self.sink.play(effect, buffer) {
            warn!("Failed to play {effect:?}: {err}");
        }
    }

    fn rebuild_bank(&mut self) {
        let volume = self.master_volume * self.sfx_volume;
        self.bank = SoundEffect::ALL
            .iter()
            .map(|effect| synthesize(effect.tone(), volume, SAMPLE_RATE))
            .collect();
        debug!("Synthesised tone bank at volume {volume:.2}");
    }
}

impl<S: ToneSink> EventSink for AudioManager<S> {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
        fail: bool,
    }

    impl ToneSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _buffer: &ToneBuffer) -> io::Result<()> {
            self.played.push(effect);
            if self.fail {
                return Err(io::Error::other("device unplugged"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::WallHit),
            Some(SoundEffect::WallHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleHit),
            Some(SoundEffect::PaddleHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Score {
                scorer: Side::Player
            }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                winner: Side::Player
            }),
            None
        );
    }

    #[test]
    fn test_tones_are_distinct() {
        let wall = SoundEffect::WallHit.tone();
        let paddle = SoundEffect::PaddleHit.tone();
        let score = SoundEffect::Score.tone();
        assert_eq!(wall, Tone::new(220.0, 0.1));
        assert_eq!(paddle, Tone::new(440.0, 0.1));
        assert_eq!(score, Tone::new(880.0, 0.2));
    }

    #[test]
    fn test_synthesize_length_and_amplitude() {
        let buffer = synthesize(Tone::new(440.0, 0.1), 1.0, SAMPLE_RATE);
        assert_eq!(buffer.frames.len(), 4410);
        assert!((buffer.duration_secs() - 0.1).abs() < 1e-4);
        assert_eq!(buffer.frames[0], [0, 0]);

        let peak = buffer.frames.iter().map(|f| f[0].abs()).max().unwrap();
        assert!(peak > 16_000 && peak <= 16_384, "peak {peak}");
        assert!(buffer.frames.iter().all(|f| f[0] == f[1]), "mono in stereo");
    }

    #[test]
    fn test_synthesize_scales_with_volume() {
        let loud = synthesize(Tone::new(220.0, 0.05), 1.0, SAMPLE_RATE);
        let quiet = synthesize(Tone::new(220.0, 0.05), 0.25, SAMPLE_RATE);
        let peak = |b: &ToneBuffer| b.frames.iter().map(|f| f[0].abs()).max().unwrap();
        assert!(peak(&quiet) < peak(&loud) / 3);
        let silent = synthesize(Tone::new(220.0, 0.05), 0.0, SAMPLE_RATE);
        assert!(silent.frames.iter().all(|f| *f == [0, 0]));
    }

    #[test]
    fn test_manager_plays_events() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.on_event(&GameEvent::WallHit);
        audio.on_event(&GameEvent::GameOver {
            winner: Side::Opponent,
        });
        audio.on_event(&GameEvent::Score {
            scorer: Side::Opponent,
        });
        assert_eq!(
            audio.sink().played,
            vec![SoundEffect::WallHit, SoundEffect::Score]
        );
        assert_eq!(audio.buffer(SoundEffect::Score).frames.len(), 8820);
    }

    #[test]
    fn test_muted_manager_is_silent() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::from_settings(Recorder::default(), &settings);
        audio.on_event(&GameEvent::PaddleHit);
        assert!(audio.sink().played.is_empty());

        audio.set_muted(false);
        audio.on_event(&GameEvent::PaddleHit);
        assert_eq!(audio.sink().played, vec![SoundEffect::PaddleHit]);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_sfx_volume(0.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.on_event(&GameEvent::WallHit);
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let mut audio = AudioManager::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        audio.on_event(&GameEvent::WallHit);
        audio.on_event(&GameEvent::PaddleHit);
        assert_eq!(audio.sink().played.len(), 2);
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new(NullSink);
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
    }
}
