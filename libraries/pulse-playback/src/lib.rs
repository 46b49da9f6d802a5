//! Pulse - Playback Control
//!
//! Transport bar logic for a fixed playlist played through one media
//! resource.
//!
//! This crate provides:
//! - Play/pause, next/previous and direct track selection
//! - Seeking once the track duration is known
//! - Volume with mute/unmute and restore of the pre-mute level
//! - Shuffle that keeps the current track first
//! - Repeat modes (Off, All, One)
//! - Display formatting (`m:ss` labels, volume icon level)
//! - Queued events for UI synchronization
//!
//! # Architecture
//!
//! `pulse-playback` is platform-agnostic. The controller drives any
//! [`MediaResource`]; the `wasm` feature ships one backed by an
//! `HtmlAudioElement`.
//!
//! State changes happen in [`Transport`], which returns [`MediaCommand`]s.
//! [`MediaBinding`] applies them to the resource and filters notifications
//! for sources that are no longer selected.
//!
//! # Example: Basic Playback
//!
//! ```rust,ignore
//! use pulse_playback::{PlaybackConfig, PlaybackController, Playlist, Track};
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("1", "Song One", "Artist", "covers/1.jpg", "audio/1.mp3"),
//!     Track::new("2", "Song Two", "Artist", "covers/2.jpg", "audio/2.mp3"),
//! ])?;
//!
//! // `resource` is any MediaResource implementation
//! let mut controller = PlaybackController::new(playlist, PlaybackConfig::default(), resource);
//!
//! controller.play_pause();
//! controller.next();
//! controller.set_volume(0.5)?;
//!
//! for event in controller.drain_events() {
//!     // update the UI
//! }
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust,ignore
//! use pulse_playback::RepeatMode;
//!
//! controller.toggle_shuffle();
//! controller.set_repeat(RepeatMode::All);
//!
//! let snapshot = controller.snapshot();
//! assert!(snapshot.shuffle_enabled);
//! ```

mod binding;
mod config;
mod controller;
mod error;
mod events;
mod format;
mod media;
mod order;
mod playlist;
mod transport;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use binding::MediaBinding;
pub use controller::{PlaybackController, PlaybackSnapshot};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use format::{format_duration, format_time, seek_slider_max};
pub use media::{MediaCommand, MediaNotification, MediaResource};
pub use order::{compute_order, identity_order};
pub use playlist::Playlist;
pub use transport::{PlaybackState, Transport};
pub use types::{PlaybackConfig, RepeatMode, Track};
pub use volume::{Volume, VolumeIcon};
