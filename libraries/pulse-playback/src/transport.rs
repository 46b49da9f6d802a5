//! Transport state machine
//!
//! Every transition is a total function on [`PlaybackState`] that returns
//! the media commands needed to mirror the new state onto the resource.
//! Transitions never talk to the resource themselves.

use crate::{
    error::{PlaybackError, Result},
    media::MediaCommand,
    order::{compute_order, identity_order},
    playlist::Playlist,
    types::{PlaybackConfig, RepeatMode, Track},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

/// Mutable playback state, owned by the transport
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Current play order (permutation of playlist indices)
    pub ordered_indices: Vec<usize>,

    /// Index into `ordered_indices` of the selected track
    pub position: usize,

    /// Playback intent (not confirmed by the resource)
    pub is_playing: bool,

    /// Elapsed seconds in the selected track
    pub elapsed: f64,

    /// Track duration in seconds, `None` until metadata arrives
    pub duration: Option<f64>,

    /// Volume level and mute state
    pub volume: Volume,

    /// Shuffle toggle
    pub shuffle_enabled: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,
}

/// Transport state machine over a fixed playlist
pub struct Transport {
    playlist: Playlist,
    state: PlaybackState,
    rng: Box<dyn RngCore>,
}

impl Transport {
    /// Create transport positioned on the first track, paused
    pub fn new(playlist: Playlist, config: &PlaybackConfig) -> Self {
        let config = config.sanitized();
        let rng: Box<dyn RngCore> = match config.shuffle_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };

        let state = PlaybackState {
            ordered_indices: identity_order(playlist.len()),
            position: 0,
            is_playing: false,
            elapsed: 0.0,
            duration: None,
            volume: Volume::new(config.volume, config.unmute_fallback_volume),
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
        };

        Self {
            playlist,
            state,
            rng,
        }
    }

    /// Commands that bring a fresh resource in line with the initial state
    pub fn initial_commands(&self) -> Vec<MediaCommand> {
        let mut commands = Vec::with_capacity(2);
        if let Some(track) = self.current_track() {
            commands.push(MediaCommand::SelectSource {
                audio_ref: track.audio_ref.clone(),
            });
        }
        commands.push(self.volume_command());
        commands
    }

    // ===== Queries =====

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Playlist being walked
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Whether any track is available
    pub fn has_track(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Playlist index of the selected track
    pub fn current_index(&self) -> Option<usize> {
        self.state.ordered_indices.get(self.state.position).copied()
    }

    /// Selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index().and_then(|i| self.playlist.get(i))
    }

    // ===== Transitions =====

    /// Toggle play/pause
    pub fn play_pause(&mut self) -> Vec<MediaCommand> {
        if !self.has_track() {
            return Vec::new();
        }

        self.state.is_playing = !self.state.is_playing;
        debug!("play_pause -> is_playing={}", self.state.is_playing);

        if self.state.is_playing {
            vec![MediaCommand::Play]
        } else {
            vec![MediaCommand::Pause]
        }
    }

    /// Seek within the selected track
    ///
    /// Target is clamped to `[0, duration]`; NaN seeks to 0.
    pub fn seek(&mut self, target: f64) -> Result<Vec<MediaCommand>> {
        if !self.has_track() {
            return Ok(Vec::new());
        }

        let duration = self.state.duration.ok_or(PlaybackError::DurationUnknown)?;
        let seconds = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, duration)
        };

        self.state.elapsed = seconds;
        Ok(vec![MediaCommand::Seek { seconds }])
    }

    /// Set volume level; zero mutes, anything else unmutes
    pub fn set_volume(&mut self, level: f32) -> Result<Vec<MediaCommand>> {
        if !self.has_track() {
            return Ok(Vec::new());
        }

        if !self.state.volume.set_level(level) {
            return Err(PlaybackError::InvalidVolume(level));
        }

        Ok(vec![self.volume_command()])
    }

    /// Toggle mute, remembering the last non-zero level
    pub fn toggle_mute(&mut self) -> Vec<MediaCommand> {
        if !self.has_track() {
            return Vec::new();
        }

        self.state.volume.toggle_mute();
        vec![self.volume_command()]
    }

    /// Advance to the next track in play order
    ///
    /// Wraps to the start of the order. An auto-advance past the last track
    /// with repeat off stops playback on the last track instead.
    pub fn next(&mut self, auto_advance: bool) -> Vec<MediaCommand> {
        let len = self.state.ordered_indices.len();
        if len == 0 {
            return Vec::new();
        }

        let candidate = self.state.position + 1;
        let wrapped = candidate >= len;

        if wrapped && auto_advance && self.state.repeat_mode == RepeatMode::Off {
            debug!("Reached end of playlist, stopping");
            self.state.is_playing = false;
            self.state.elapsed = 0.0;
            return vec![MediaCommand::Pause, MediaCommand::Seek { seconds: 0.0 }];
        }

        let position = if wrapped { 0 } else { candidate };

        let keep_intent =
            auto_advance && position == 0 && self.state.repeat_mode != RepeatMode::All;
        if !keep_intent {
            self.state.is_playing = true;
        }

        self.select_position(position)
    }

    /// Go back to the previous track in play order, wrapping to the last
    pub fn previous(&mut self) -> Vec<MediaCommand> {
        let len = self.state.ordered_indices.len();
        if len == 0 {
            return Vec::new();
        }

        let position = if self.state.position == 0 {
            len - 1
        } else {
            self.state.position - 1
        };

        self.state.is_playing = true;
        self.select_position(position)
    }

    /// Jump to a specific track and start playing it
    pub fn select(&mut self, track_id: &str) -> Result<Vec<MediaCommand>> {
        let index = self
            .playlist
            .index_of(track_id)
            .ok_or_else(|| PlaybackError::TrackNotFound(track_id.to_string()))?;

        let position = self
            .state
            .ordered_indices
            .iter()
            .position(|&i| i == index)
            .ok_or_else(|| PlaybackError::TrackNotFound(track_id.to_string()))?;

        self.state.is_playing = true;
        Ok(self.select_position(position))
    }

    /// Flip shuffle and recompute the play order around the current track
    ///
    /// The selected track never changes: enabling pins it at position 0,
    /// disabling moves the position back to its playlist index.
    pub fn toggle_shuffle(&mut self) -> Vec<MediaCommand> {
        if !self.has_track() {
            return Vec::new();
        }

        self.state.shuffle_enabled = !self.state.shuffle_enabled;

        let current = self.current_index();
        let current_id = current
            .and_then(|i| self.playlist.get(i))
            .map(|t| t.id.clone());

        self.state.ordered_indices = compute_order(
            &self.playlist,
            current_id.as_deref(),
            self.state.shuffle_enabled,
            &mut *self.rng,
        );

        self.state.position = if self.state.shuffle_enabled {
            0
        } else {
            current.unwrap_or(0)
        };

        debug!(
            "Shuffle {} (order: {:?})",
            if self.state.shuffle_enabled { "enabled" } else { "disabled" },
            self.state.ordered_indices
        );

        Vec::new()
    }

    /// Cycle repeat mode Off -> All -> One -> Off
    pub fn cycle_repeat(&mut self) -> Vec<MediaCommand> {
        if self.has_track() {
            self.state.repeat_mode = self.state.repeat_mode.cycle();
        }
        Vec::new()
    }

    /// Set repeat mode directly
    pub fn set_repeat(&mut self, mode: RepeatMode) -> Vec<MediaCommand> {
        if self.has_track() {
            self.state.repeat_mode = mode;
        }
        Vec::new()
    }

    // ===== Resource notifications =====

    /// Selected track finished playing naturally
    pub fn on_track_ended(&mut self) -> Vec<MediaCommand> {
        if !self.has_track() {
            return Vec::new();
        }

        if self.state.repeat_mode == RepeatMode::One {
            self.state.elapsed = 0.0;
            self.state.is_playing = true;
            return vec![MediaCommand::Seek { seconds: 0.0 }, MediaCommand::Play];
        }

        self.next(true)
    }

    /// Metadata arrived; returns false if the duration was rejected
    pub fn on_metadata_loaded(&mut self, duration: f64) -> bool {
        if !duration.is_finite() || duration < 0.0 {
            return false;
        }

        self.state.duration = Some(duration);
        true
    }

    /// Playback position advanced; returns false if the value was rejected
    pub fn on_time_progressed(&mut self, position: f64) -> bool {
        if !position.is_finite() {
            return false;
        }

        self.state.elapsed = position.max(0.0);
        true
    }

    // ===== Internal =====

    fn select_position(&mut self, position: usize) -> Vec<MediaCommand> {
        let previous_ref = self.current_track().map(|t| t.audio_ref.clone());

        self.state.position = position;
        self.state.elapsed = 0.0;

        let Some(audio_ref) = self.current_track().map(|t| t.audio_ref.clone()) else {
            self.state.duration = None;
            return Vec::new();
        };

        // Same source is only rewound, so no new metadata will arrive
        if previous_ref.as_ref() != Some(&audio_ref) {
            self.state.duration = None;
        }

        let mut commands = vec![MediaCommand::SelectSource { audio_ref }];

        if self.state.is_playing {
            commands.push(MediaCommand::Play);
        }

        commands
    }

    fn volume_command(&self) -> MediaCommand {
        MediaCommand::ApplyVolume {
            volume: self.state.volume.level(),
            muted: self.state.volume.is_muted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_transport(len: usize) -> Transport {
        let tracks = (0..len)
            .map(|i| {
                Track::new(
                    format!("t{}", i),
                    format!("Track {}", i),
                    "Artist",
                    "cover.jpg",
                    format!("/audio/{}.mp3", i),
                )
            })
            .collect();
        let config = PlaybackConfig {
            shuffle_seed: Some(11),
            ..Default::default()
        };
        Transport::new(Playlist::new(tracks).unwrap(), &config)
    }

    #[test]
    fn starts_paused_on_first_track() {
        let transport = create_transport(3);
        let state = transport.state();
        assert_eq!(state.position, 0);
        assert!(!state.is_playing);
        assert!(!state.shuffle_enabled);
        assert_eq!(state.repeat_mode, RepeatMode::Off);
        assert_eq!(state.volume.level(), 0.75);
        assert_eq!(transport.current_track().unwrap().id, "t0");
    }

    #[test]
    fn play_pause_flips_intent() {
        let mut transport = create_transport(2);

        assert_eq!(transport.play_pause(), vec![MediaCommand::Play]);
        assert!(transport.state().is_playing);

        assert_eq!(transport.play_pause(), vec![MediaCommand::Pause]);
        assert!(!transport.state().is_playing);
    }

    #[test]
    fn next_selects_and_plays() {
        let mut transport = create_transport(3);

        let commands = transport.next(false);
        assert_eq!(
            commands,
            vec![
                MediaCommand::SelectSource {
                    audio_ref: "/audio/1.mp3".to_string()
                },
                MediaCommand::Play,
            ]
        );
        assert_eq!(transport.state().position, 1);
        assert!(transport.state().is_playing);
    }

    #[test]
    fn manual_next_wraps_even_with_repeat_off() {
        let mut transport = create_transport(3);
        transport.next(false);
        transport.next(false);
        transport.next(false);
        assert_eq!(transport.state().position, 0);
        assert!(transport.state().is_playing);
    }

    #[test]
    fn auto_advance_at_end_with_repeat_off_stops() {
        let mut transport = create_transport(2);
        transport.next(false);
        transport.on_time_progressed(42.0);

        let commands = transport.next(true);
        assert_eq!(
            commands,
            vec![MediaCommand::Pause, MediaCommand::Seek { seconds: 0.0 }]
        );
        assert_eq!(transport.state().position, 1);
        assert!(!transport.state().is_playing);
        assert_eq!(transport.state().elapsed, 0.0);
    }

    #[test]
    fn auto_advance_landing_on_start_keeps_intent_without_repeat_all() {
        let mut transport = create_transport(2);
        transport.set_repeat(RepeatMode::One);
        transport.next(false);
        transport.play_pause(); // paused on last track

        transport.next(true);
        assert_eq!(transport.state().position, 0);
        assert!(!transport.state().is_playing);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut transport = create_transport(4);
        transport.previous();
        assert_eq!(transport.state().position, 3);
        assert!(transport.state().is_playing);
    }

    #[test]
    fn track_change_resets_elapsed_and_duration() {
        let mut transport = create_transport(3);
        transport.on_metadata_loaded(200.0);
        transport.on_time_progressed(33.0);

        transport.next(false);
        assert_eq!(transport.state().elapsed, 0.0);
        assert_eq!(transport.state().duration, None);
    }

    #[test]
    fn single_track_wrap_keeps_duration() {
        let mut transport = create_transport(1);
        transport.on_metadata_loaded(200.0);
        transport.on_time_progressed(50.0);

        let commands = transport.next(false);
        assert_eq!(
            commands,
            vec![
                MediaCommand::SelectSource {
                    audio_ref: "/audio/0.mp3".to_string()
                },
                MediaCommand::Play
            ]
        );
        assert_eq!(transport.state().elapsed, 0.0);
        assert_eq!(transport.state().duration, Some(200.0));
    }

    #[test]
    fn seek_requires_duration_and_clamps() {
        let mut transport = create_transport(1);
        assert!(matches!(
            transport.seek(10.0),
            Err(PlaybackError::DurationUnknown)
        ));

        transport.on_metadata_loaded(120.0);
        assert_eq!(
            transport.seek(500.0).unwrap(),
            vec![MediaCommand::Seek { seconds: 120.0 }]
        );
        assert_eq!(transport.state().elapsed, 120.0);

        transport.seek(-4.0).unwrap();
        assert_eq!(transport.state().elapsed, 0.0);

        transport.seek(f64::NAN).unwrap();
        assert_eq!(transport.state().elapsed, 0.0);
    }

    #[test]
    fn invalid_metadata_is_filtered() {
        let mut transport = create_transport(1);
        assert!(!transport.on_metadata_loaded(f64::NAN));
        assert!(!transport.on_metadata_loaded(f64::INFINITY));
        assert_eq!(transport.state().duration, None);

        assert!(transport.on_metadata_loaded(99.5));
        assert_eq!(transport.state().duration, Some(99.5));
    }

    #[test]
    fn repeat_one_replays_current_track() {
        let mut transport = create_transport(3);
        transport.set_repeat(RepeatMode::One);
        transport.next(false);
        transport.on_time_progressed(180.0);

        let commands = transport.on_track_ended();
        assert_eq!(
            commands,
            vec![MediaCommand::Seek { seconds: 0.0 }, MediaCommand::Play]
        );
        assert_eq!(transport.state().position, 1);
        assert_eq!(transport.state().elapsed, 0.0);
        assert!(transport.state().is_playing);
    }

    #[test]
    fn shuffle_keeps_selected_track() {
        let mut transport = create_transport(6);
        transport.next(false);
        transport.next(false); // t2

        transport.toggle_shuffle();
        assert_eq!(transport.state().position, 0);
        assert_eq!(transport.state().ordered_indices[0], 2);
        assert_eq!(transport.current_track().unwrap().id, "t2");

        transport.next(false);
        let now = transport.current_index().unwrap();

        transport.toggle_shuffle();
        assert_eq!(transport.state().ordered_indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(transport.state().position, now);
    }

    #[test]
    fn select_by_id() {
        let mut transport = create_transport(4);
        let commands = transport.select("t3").unwrap();
        assert_eq!(transport.state().position, 3);
        assert_eq!(commands.last(), Some(&MediaCommand::Play));

        assert!(matches!(
            transport.select("nope"),
            Err(PlaybackError::TrackNotFound(_))
        ));
    }

    #[test]
    fn empty_playlist_is_inert() {
        let mut transport = create_transport(0);

        assert!(transport.play_pause().is_empty());
        assert!(transport.next(false).is_empty());
        assert!(transport.previous().is_empty());
        assert!(transport.toggle_shuffle().is_empty());
        assert!(transport.toggle_mute().is_empty());
        assert!(transport.on_track_ended().is_empty());
        assert!(transport.seek(3.0).unwrap().is_empty());
        assert!(transport.set_volume(0.2).unwrap().is_empty());
        transport.cycle_repeat();

        assert!(!transport.state().is_playing);
        assert_eq!(transport.state().repeat_mode, RepeatMode::Off);
        assert!(transport.current_track().is_none());
    }
}
