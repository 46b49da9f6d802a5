//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the controller and drained by the host:
//! - Track changes
//! - Play/pause intent changes
//! - Position and duration updates
//! - Volume, shuffle and repeat changes
//! - Media failures

use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Selected track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Play/pause intent changed
    StateChanged {
        /// Whether playback is requested
        is_playing: bool,
    },

    /// Position update (throttled by `position_update_interval`)
    PositionUpdate {
        /// Elapsed seconds
        elapsed: f64,
        /// Track duration, if known
        duration: Option<f64>,
    },

    /// Track duration became known
    DurationChanged {
        /// Duration in seconds
        duration: f64,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// Volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle state
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Playback stopped at the end of the playlist
    ReachedEnd,

    /// Media resource failure (playback intent left unchanged)
    Error {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_for_the_ui() {
        let event = PlaybackEvent::RepeatChanged {
            mode: RepeatMode::All,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"RepeatChanged":{"mode":"all"}}"#);

        let back: PlaybackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
