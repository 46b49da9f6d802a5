//! Core types for playback control

use serde::{Deserialize, Serialize};

/// A playable audio item with display metadata
///
/// Tracks are created when the playlist is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier within the playlist
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover art URI
    #[serde(alias = "coverArtUrl")]
    pub cover_art_ref: String,

    /// Audio source URI handed to the media resource
    #[serde(alias = "audioSrc")]
    pub audio_ref: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        cover_art_ref: impl Into<String>,
        audio_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_art_ref: cover_art_ref.into(),
            audio_ref: audio_ref.into(),
        }
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    Off,

    /// Loop the entire playlist
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the repeat button cycle: Off -> All -> One -> Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.75)
    pub volume: f32,

    /// Volume restored when unmuting with no remembered level (default: 0.1)
    pub unmute_fallback_volume: f32,

    /// Seed for the shuffle RNG; `None` uses the thread RNG
    pub shuffle_seed: Option<u64>,

    /// Minimum seconds of progress between position update events (default: 1.0)
    pub position_update_interval: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.75,
            unmute_fallback_volume: 0.1,
            shuffle_seed: None,
            position_update_interval: 1.0,
        }
    }
}
