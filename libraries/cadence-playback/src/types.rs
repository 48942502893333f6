//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Track descriptor
///
/// Immutable once loaded into a [`Catalog`](crate::Catalog). Field names
/// serialize in camelCase so browser catalogs load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Cover art location, opaque to the core
    #[serde(default)]
    pub image_path: String,

    /// Audio location handed to the playback clock
    #[serde(default)]
    pub audio_path: String,

    /// Track length in seconds
    pub total_duration: f64,
}

impl Track {
    /// Create a track with empty asset paths
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        total_duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            image_path: String::new(),
            audio_path: String::new(),
            total_duration,
        }
    }
}

/// Transport state
///
/// Elapsed time is carried alongside in both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// Clock stopped, position held
    #[default]
    Paused,

    /// Clock running
    Playing,
}

/// Repeat mode
///
/// Storage form of the `loop` / `loopOne` pair. Both flags can never be set
/// at once because they share one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial shuffle state (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Nominal clock tick interval in milliseconds (default: 1000)
    pub tick_interval_ms: u64,

    /// "Previous" restarts the current track past this position (default: 1.0s)
    pub restart_threshold_secs: f64,

    /// Fixed seed for shuffle ordering; entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: RepeatMode::Off,
            tick_interval_ms: 1000,
            restart_threshold_secs: 1.0,
            shuffle_seed: None,
        }
    }
}

impl PlaybackConfig {
    /// Tick interval in seconds, the delta a timer clock reports per tick
    pub fn tick_interval_secs(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback progress as a percentage in `[0, 100]`
///
/// Zero when either value is zero or unusable.
pub fn progress_percent(elapsed: f64, total: f64) -> f64 {
    if elapsed > 0.0 && total > 0.0 && elapsed.is_finite() && total.is_finite() {
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
