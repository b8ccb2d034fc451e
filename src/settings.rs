//! Game settings and preferences
//!
//! Stored as JSON next to the game (or wherever `PADDLE_DUEL_SETTINGS`
//! points). Loading never fails: anything missing or unreadable falls back
//! to the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TICK_RATE_HZ, TICK_RATE_HZ};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate_hz: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all tones
    pub muted: bool,

    // === Input ===
    /// How long a key counts as held after its last press/repeat (ms)
    pub key_hold_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            key_hold_ms: 120,
        }
    }
}

impl Settings {
    /// Environment variable overriding the settings file location
    pub const PATH_ENV: &'static str = "PADDLE_DUEL_SETTINGS";

    /// Settings file name used when the variable is unset
    const FILE_NAME: &'static str = "paddle-duel.json";

    /// Where settings are read from and written to
    pub fn default_path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Failed to read {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("Invalid settings in {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Clamp every field into its usable range
    pub fn sanitized(mut self) -> Self {
        self.tick_rate_hz = match self.tick_rate_hz {
            0 => TICK_RATE_HZ,
            hz => hz.min(MAX_TICK_RATE_HZ),
        };
        self.master_volume = clamp_unit(self.master_volume);
        self.sfx_volume = clamp_unit(self.sfx_volume);
        self
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
