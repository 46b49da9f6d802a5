//! Platform-agnostic media resource abstraction
//!
//! Abstracts the one playable media element the controller drives (an HTML
//! audio element on the web, any player object elsewhere).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Playable media resource
///
/// Implementors forward commands to the underlying player. Playback start is
/// asynchronous: `play` only requests it, and the outcome is reported later
/// through [`MediaNotification::PlaybackStarted`] or
/// [`MediaNotification::PlayRejected`].
pub trait MediaResource {
    /// Currently loaded source URI, if any
    fn source(&self) -> Option<String>;

    /// Replace the source URI
    fn set_source(&mut self, uri: &str);

    /// Start loading the current source
    fn load(&mut self);

    /// Request playback start
    ///
    /// # Returns
    /// * `Ok(())` - Request issued (may still be rejected asynchronously)
    /// * `Err(_)` - Request refused immediately
    fn play(&mut self) -> Result<()>;

    /// Request playback stop
    fn pause(&mut self) -> Result<()>;

    /// Jump to an absolute position in seconds
    fn seek(&mut self, seconds: f64);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Set muted flag
    fn set_muted(&mut self, muted: bool);

    /// Subscribe to resource notifications
    ///
    /// Called once when the binding is created.
    fn attach(&mut self) -> Result<()> {
        Ok(())
    }

    /// Unsubscribe from resource notifications
    ///
    /// Called once when the binding is dropped.
    fn detach(&mut self) {}
}

/// Instruction from the transport state machine to the media binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaCommand {
    /// Selected track changed (or was re-selected)
    SelectSource {
        /// Audio URI of the selected track
        audio_ref: String,
    },

    /// Start playback
    Play,

    /// Stop playback
    Pause,

    /// Jump to position
    Seek {
        /// Target position in seconds
        seconds: f64,
    },

    /// Apply volume and mute state
    ApplyVolume {
        /// Volume level (0.0-1.0)
        volume: f32,
        /// Whether output is muted
        muted: bool,
    },
}

/// Asynchronous notification from the media resource
///
/// Every notification names the source it belongs to so that late
/// notifications for a replaced source can be ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaNotification {
    /// Metadata is ready
    MetadataLoaded {
        /// Source URI
        source: String,
        /// Reported duration in seconds (may be NaN or infinite)
        duration: f64,
    },

    /// Playback position advanced
    TimeUpdate {
        /// Source URI
        source: String,
        /// Current position in seconds
        position: f64,
    },

    /// Playback reached the end of the source
    Ended {
        /// Source URI
        source: String,
    },

    /// A play request was fulfilled
    PlaybackStarted {
        /// Source URI
        source: String,
    },

    /// The resource paused
    PlaybackPaused {
        /// Source URI
        source: String,
    },

    /// A play request was rejected (autoplay policy, network, decode)
    PlayRejected {
        /// Source URI
        source: String,
        /// Reason reported by the resource
        reason: String,
    },
}

impl MediaNotification {
    /// Source URI this notification belongs to
    pub fn source(&self) -> &str {
        match self {
            MediaNotification::MetadataLoaded { source, .. }
            | MediaNotification::TimeUpdate { source, .. }
            | MediaNotification::Ended { source }
            | MediaNotification::PlaybackStarted { source }
            | MediaNotification::PlaybackPaused { source }
            | MediaNotification::PlayRejected { source, .. } => source,
        }
    }
}

/// Recording media resource for unit tests
///
/// Logs every call so tests can assert on command order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMedia {
    pub source: Option<String>,
    pub calls: Vec<String>,
    pub reject_play: bool,
    pub attached: bool,
}

#[cfg(test)]
impl MediaResource for RecordingMedia {
    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.calls.push(format!("set_source {}", uri));
    }

    fn load(&mut self) {
        self.calls.push("load".to_string());
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push("play".to_string());
        if self.reject_play {
            return Err(crate::error::PlaybackError::Media(
                "play() request was blocked".to_string(),
            ));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push("pause".to_string());
        Ok(())
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(format!("seek {}", seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(format!("volume {}", volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(format!("muted {}", muted));
    }

    fn attach(&mut self) -> Result<()> {
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}
