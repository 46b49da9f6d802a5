//! Media binding
//!
//! One-to-one adapter between transport commands and a single
//! [`MediaResource`]. Owns the resource for its whole lifetime: attaches on
//! creation, detaches on drop.

use crate::{
    error::{PlaybackError, Result},
    media::{MediaCommand, MediaNotification, MediaResource},
};
use tracing::{debug, warn};

/// Binding between transport state and one media resource
pub struct MediaBinding<M: MediaResource> {
    resource: M,

    /// Source the transport last selected; notifications for anything else are stale
    expected_source: Option<String>,

    /// Playback state confirmed by the resource
    confirmed_playing: bool,
}

impl<M: MediaResource> MediaBinding<M> {
    /// Bind a resource and subscribe to its notifications
    pub fn new(mut resource: M) -> Self {
        if let Err(e) = resource.attach() {
            warn!("Failed to subscribe to media notifications: {}", e);
        }

        Self {
            resource,
            expected_source: None,
            confirmed_playing: false,
        }
    }

    /// Apply commands in order
    ///
    /// Failures are logged and returned; remaining commands still run.
    pub fn apply(&mut self, commands: &[MediaCommand]) -> Vec<PlaybackError> {
        let mut failures = Vec::new();

        for command in commands {
            if let Err(e) = self.apply_one(command) {
                warn!("Media command {:?} failed: {}", command, e);
                failures.push(e);
            }
        }

        failures
    }

    fn apply_one(&mut self, command: &MediaCommand) -> Result<()> {
        match command {
            MediaCommand::SelectSource { audio_ref } => {
                if self.resource.source().as_deref() == Some(audio_ref.as_str()) {
                    // Same source re-selected (single-track wrap): rewind
                    self.resource.seek(0.0);
                } else {
                    debug!("Loading source {}", audio_ref);
                    self.resource.set_source(audio_ref);
                    self.resource.load();
                    self.confirmed_playing = false;
                }
                self.expected_source = Some(audio_ref.clone());
            }
            MediaCommand::Play => {
                if let Err(e) = self.resource.play() {
                    self.confirmed_playing = false;
                    return Err(e);
                }
            }
            MediaCommand::Pause => {
                self.resource.pause()?;
                self.confirmed_playing = false;
            }
            MediaCommand::Seek { seconds } => {
                self.resource.seek(*seconds);
            }
            MediaCommand::ApplyVolume { volume, muted } => {
                self.resource
                    .set_volume(if *muted { 0.0 } else { *volume });
                self.resource.set_muted(*muted);
            }
        }

        Ok(())
    }

    /// Check a notification against the expected source
    ///
    /// Returns false for stale notifications. Updates the confirmed
    /// playback flag for accepted ones.
    pub fn accept(&mut self, notification: &MediaNotification) -> bool {
        if self.expected_source.as_deref() != Some(notification.source()) {
            debug!(
                "Ignoring stale notification for {} (expected {:?})",
                notification.source(),
                self.expected_source
            );
            return false;
        }

        match notification {
            MediaNotification::PlaybackStarted { .. } => self.confirmed_playing = true,
            MediaNotification::PlaybackPaused { .. }
            | MediaNotification::PlayRejected { .. }
            | MediaNotification::Ended { .. } => self.confirmed_playing = false,
            MediaNotification::MetadataLoaded { .. } | MediaNotification::TimeUpdate { .. } => {}
        }

        true
    }

    /// Whether the resource confirmed that it is playing
    pub fn confirmed_playing(&self) -> bool {
        self.confirmed_playing
    }

    /// Source the binding expects notifications for
    pub fn expected_source(&self) -> Option<&str> {
        self.expected_source.as_deref()
    }

    /// Bound resource
    pub fn resource(&self) -> &M {
        &self.resource
    }

    /// Bound resource (mutable)
    pub fn resource_mut(&mut self) -> &mut M {
        &mut self.resource
    }
}

impl<M: MediaResource> Drop for MediaBinding<M> {
    fn drop(&mut self) {
        debug!("Releasing media resource");
        self.resource.detach();
    }
}
