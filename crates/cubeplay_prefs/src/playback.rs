use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

/// Named playback speed.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantArray,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlaybackSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlaybackPreferences {
    /// Time between steps at [`PlaybackSpeed::Slow`], in milliseconds.
    pub slow_ms: u64,
    /// Time between steps at [`PlaybackSpeed::Normal`], in milliseconds.
    pub normal_ms: u64,
    /// Time between steps at [`PlaybackSpeed::Fast`], in milliseconds.
    pub fast_ms: u64,
    /// Control calls that arrive within this many milliseconds of the previous
    /// accepted call are ignored.
    pub debounce_ms: u64,
    /// Speed used when a session starts.
    pub default_speed: PlaybackSpeed,
}

impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            slow_ms: 1000,
            normal_ms: 500,
            fast_ms: 200,
            debounce_ms: 100,
            default_speed: PlaybackSpeed::Normal,
        }
    }
}

impl PlaybackPreferences {
    /// Returns the time between steps at `speed`.
    pub fn step_duration(&self, speed: PlaybackSpeed) -> Duration {
        Duration::from_millis(match speed {
            PlaybackSpeed::Slow => self.slow_ms,
            PlaybackSpeed::Normal => self.normal_ms,
            PlaybackSpeed::Fast => self.fast_ms,
        })
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
