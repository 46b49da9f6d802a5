//! Playback controller - core orchestration
//!
//! Wires the transport state machine to the media binding, turns resource
//! notifications back into transitions, and queues UI events.

use crate::{
    binding::MediaBinding,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    format::{format_duration, format_time, seek_slider_max},
    media::{MediaCommand, MediaNotification, MediaResource},
    playlist::Playlist,
    transport::{PlaybackState, Transport},
    types::{PlaybackConfig, RepeatMode, Track},
    volume::VolumeIcon,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Read-only display snapshot for the transport bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Selected track, `None` when no track is available
    pub track: Option<Track>,

    /// Playback intent
    pub is_playing: bool,

    /// Playback confirmed by the media resource
    pub confirmed_playing: bool,

    /// Elapsed seconds
    pub elapsed: f64,

    /// Duration in seconds, if known
    pub duration: Option<f64>,

    /// Elapsed as `m:ss`
    pub elapsed_label: String,

    /// Duration as `m:ss` (`0:00` when unknown)
    pub duration_label: String,

    /// Whether the seek slider is usable
    pub seek_enabled: bool,

    /// Seek slider maximum (1.0 while the duration is unknown)
    pub seek_max: f64,

    /// Volume level (0.0-1.0)
    pub volume: f32,

    /// Volume slider value (0.0 while muted)
    pub slider_volume: f32,

    /// Mute state
    pub is_muted: bool,

    /// Volume icon level
    pub volume_icon: VolumeIcon,

    /// Shuffle state
    pub shuffle_enabled: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Position in the play order
    pub position: usize,

    /// Number of tracks in the playlist
    pub track_count: usize,
}

/// Subset of state compared before and after a transition to derive events
#[derive(Debug, Clone, Default, PartialEq)]
struct Digest {
    track_id: Option<String>,
    is_playing: bool,
    volume: f32,
    is_muted: bool,
    shuffle_enabled: bool,
    repeat_mode: RepeatMode,
}

/// Central playback control
///
/// Owns the playback state and exactly one media resource. All calls are
/// expected from a single thread (UI event handlers and resource callbacks).
pub struct PlaybackController<M: MediaResource> {
    transport: Transport,
    binding: MediaBinding<M>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,

    // State as of the last commit, for change events
    committed: Digest,

    // Position update throttling
    position_update_interval: f64,
    last_position_event: Option<f64>,
}

impl<M: MediaResource> PlaybackController<M> {
    /// Create controller over `playlist`, driving `resource`
    ///
    /// The first track's source is loaded immediately; playback stays paused.
    /// Unusable config values are replaced (see [`PlaybackConfig::sanitized`]).
    pub fn new(playlist: Playlist, config: PlaybackConfig, resource: M) -> Self {
        let config = config.sanitized();
        let transport = Transport::new(playlist, &config);
        let mut binding = MediaBinding::new(resource);

        for e in binding.apply(&transport.initial_commands()) {
            warn!("Initial media setup failed: {}", e);
        }

        match transport.current_track() {
            Some(track) => info!(
                "Playback controller ready ({} tracks, first: {})",
                transport.playlist().len(),
                track.title
            ),
            None => info!("Playback controller ready with no track available"),
        }

        let mut controller = Self {
            committed: Digest::default(),
            transport,
            binding,
            pending_events: Vec::new(),
            position_update_interval: config.position_update_interval,
            last_position_event: None,
        };
        controller.committed = controller.digest();
        controller
    }

    // ===== Inbound controls =====

    /// Toggle play/pause
    pub fn play_pause(&mut self) {
        let commands = self.transport.play_pause();
        self.commit(commands);
    }

    /// Seek to an absolute position in seconds (clamped to the track)
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let commands = self.transport.seek(seconds)?;
        if commands.is_empty() {
            return Ok(());
        }

        self.commit(commands);
        self.emit_position_update();
        Ok(())
    }

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let commands = self.transport.set_volume(volume)?;
        self.commit(commands);
        Ok(())
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        let commands = self.transport.toggle_mute();
        self.commit(commands);
    }

    /// Skip to next track (user action)
    pub fn next(&mut self) {
        self.advance(false);
    }

    /// Advance to the next track
    ///
    /// `auto_advance` marks natural completion, which stops at the end of
    /// the playlist when repeat is off.
    pub fn advance(&mut self, auto_advance: bool) {
        let was_playing = self.transport.state().is_playing;
        let commands = self.transport.next(auto_advance);
        let stopped = auto_advance && was_playing && !self.transport.state().is_playing;

        self.commit(commands);

        if stopped {
            self.pending_events.push(PlaybackEvent::ReachedEnd);
        }
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        let commands = self.transport.previous();
        self.commit(commands);
    }

    /// Play a specific track from the playlist
    pub fn select(&mut self, track_id: &str) -> Result<()> {
        if !self.transport.has_track() {
            return Ok(());
        }

        let commands = self.transport.select(track_id)?;
        self.commit(commands);
        Ok(())
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        let commands = self.transport.toggle_shuffle();
        self.commit(commands);
    }

    /// Set shuffle state
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.transport.state().shuffle_enabled != enabled {
            self.toggle_shuffle();
        }
    }

    /// Cycle repeat mode Off -> All -> One -> Off
    pub fn cycle_repeat(&mut self) {
        let commands = self.transport.cycle_repeat();
        self.commit(commands);
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        let commands = self.transport.set_repeat(mode);
        self.commit(commands);
    }

    // ===== Resource notifications =====

    /// Handle a notification from the media resource
    ///
    /// Notifications for a source other than the selected one are ignored.
    pub fn handle_notification(&mut self, notification: MediaNotification) {
        if !self.binding.accept(&notification) {
            return;
        }

        match notification {
            MediaNotification::MetadataLoaded { source, duration } => {
                if self.transport.on_metadata_loaded(duration) {
                    debug!("Duration of {} is {:.1}s", source, duration);
                    self.pending_events
                        .push(PlaybackEvent::DurationChanged { duration });
                } else {
                    warn!("Ignoring invalid duration {} for {}", duration, source);
                }
            }
            MediaNotification::TimeUpdate { position, .. } => {
                if self.transport.on_time_progressed(position) {
                    self.maybe_emit_position_update();
                }
            }
            MediaNotification::Ended { source } => {
                debug!("Track ended: {}", source);
                if self.transport.state().repeat_mode == RepeatMode::One {
                    let commands = self.transport.on_track_ended();
                    self.commit(commands);
                } else {
                    self.advance(true);
                }
            }
            MediaNotification::PlayRejected { source, reason } => {
                // Intent stays as requested; the user retries with play/pause
                warn!("Playback of {} was rejected: {}", source, reason);
                self.pending_events.push(PlaybackEvent::Error {
                    message: format!("Playback rejected: {}", reason),
                });
            }
            MediaNotification::PlaybackStarted { .. }
            | MediaNotification::PlaybackPaused { .. } => {}
        }
    }

    // ===== State Queries =====

    /// Display snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.transport.state();

        PlaybackSnapshot {
            track: self.transport.current_track().cloned(),
            is_playing: state.is_playing,
            confirmed_playing: self.binding.confirmed_playing(),
            elapsed: state.elapsed,
            duration: state.duration,
            elapsed_label: format_time(state.elapsed),
            duration_label: format_duration(state.duration),
            seek_enabled: state.duration.is_some_and(|d| d > 0.0),
            seek_max: seek_slider_max(state.duration),
            volume: state.volume.level(),
            slider_volume: state.volume.effective(),
            is_muted: state.volume.is_muted(),
            volume_icon: state.volume.icon(),
            shuffle_enabled: state.shuffle_enabled,
            repeat_mode: state.repeat_mode,
            position: state.position,
            track_count: self.transport.playlist().len(),
        }
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.transport.current_track()
    }

    /// Selected track, or `EmptyPlaylist` when no track is available
    pub fn require_track(&self) -> Result<&Track> {
        self.transport
            .current_track()
            .ok_or(PlaybackError::EmptyPlaylist)
    }

    /// Whether a track is available
    pub fn has_track(&self) -> bool {
        self.transport.has_track()
    }

    /// Transport state
    pub fn state(&self) -> &PlaybackState {
        self.transport.state()
    }

    /// Bound media resource
    pub fn resource(&self) -> &M {
        self.binding.resource()
    }

    /// Bound media resource (mutable)
    pub fn resource_mut(&mut self) -> &mut M {
        self.binding.resource_mut()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The UI should call this after each interaction or periodically
    /// (e.g., every animation frame) to synchronize with playback state.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn digest(&self) -> Digest {
        let state = self.transport.state();
        Digest {
            track_id: self.transport.current_track().map(|t| t.id.clone()),
            is_playing: state.is_playing,
            volume: state.volume.level(),
            is_muted: state.volume.is_muted(),
            shuffle_enabled: state.shuffle_enabled,
            repeat_mode: state.repeat_mode,
        }
    }

    /// Apply commands to the resource and queue events for what changed
    /// since the last commit
    fn commit(&mut self, commands: Vec<MediaCommand>) {
        for e in self.binding.apply(&commands) {
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }

        let after = self.digest();
        let before = std::mem::replace(&mut self.committed, after.clone());
        self.emit_changes(&before, &after);
    }

    fn emit_changes(&mut self, before: &Digest, after: &Digest) {
        if before.track_id != after.track_id {
            if let Some(track_id) = after.track_id.clone() {
                info!("Track changed to {}", track_id);
                self.last_position_event = None;
                self.pending_events.push(PlaybackEvent::TrackChanged {
                    track_id,
                    previous_track_id: before.track_id.clone(),
                });
            }
        }

        if before.is_playing != after.is_playing {
            self.pending_events.push(PlaybackEvent::StateChanged {
                is_playing: after.is_playing,
            });
        }

        if before.volume != after.volume || before.is_muted != after.is_muted {
            self.pending_events.push(PlaybackEvent::VolumeChanged {
                volume: after.volume,
                is_muted: after.is_muted,
            });
        }

        if before.shuffle_enabled != after.shuffle_enabled {
            self.pending_events.push(PlaybackEvent::ShuffleChanged {
                enabled: after.shuffle_enabled,
            });
        }

        if before.repeat_mode != after.repeat_mode {
            self.pending_events.push(PlaybackEvent::RepeatChanged {
                mode: after.repeat_mode,
            });
        }
    }

    fn maybe_emit_position_update(&mut self) {
        let elapsed = self.transport.state().elapsed;
        let due = match self.last_position_event {
            Some(last) => elapsed < last || elapsed - last >= self.position_update_interval,
            None => true,
        };

        if due {
            self.emit_position_update();
        }
    }

    fn emit_position_update(&mut self) {
        let state = self.transport.state();
        self.last_position_event = Some(state.elapsed);
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            elapsed: state.elapsed,
            duration: state.duration,
        });
    }
}
