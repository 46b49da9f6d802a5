//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist has no tracks
    #[error("No track available")]
    EmptyPlaylist,

    /// Two tracks share the same id
    #[error("Duplicate track id: {0}")]
    DuplicateTrackId(String),

    /// Track id is not part of the playlist
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Seek requested before metadata arrived
    #[error("Track duration is not known yet")]
    DurationUnknown,

    /// Volume is not a number
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),

    /// Media resource rejected a command
    #[error("Media error: {0}")]
    Media(String),

    /// Playlist could not be decoded
    #[error("Playlist decode error: {0}")]
    Playlist(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
