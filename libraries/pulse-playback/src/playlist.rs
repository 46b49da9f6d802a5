//! Playlist source
//!
//! Fixed, validated sequence of tracks injected into the controller.

use crate::error::{PlaybackError, Result};
use crate::types::Track;
use std::collections::HashSet;

/// Ordered sequence of tracks, fixed for the session
///
/// Track ids are guaranteed unique. An empty playlist is valid; the
/// controller reports "no track available" for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist, rejecting duplicate track ids
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(PlaybackError::DuplicateTrackId(track.id.clone()));
            }
        }

        Ok(Self { tracks })
    }

    /// Decode a playlist from a JSON array of tracks
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get track by playlist index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Playlist index of a track id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(
            id,
            format!("Song {}", id),
            "Artist",
            format!("https://img/{}.jpg", id),
            format!("https://audio/{}.mp3", id),
        )
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Playlist::new(vec![track("a"), track("b"), track("a")]);
        match result {
            Err(PlaybackError::DuplicateTrackId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn empty_playlist_is_valid() {
        let playlist = Playlist::new(Vec::new()).unwrap();
        assert!(playlist.is_empty());
        assert_eq!(playlist.get(0), None);
    }

    #[test]
    fn index_lookup() {
        let playlist = Playlist::new(vec![track("a"), track("b"), track("c")]).unwrap();
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.index_of("c"), Some(2));
        assert_eq!(playlist.index_of("missing"), None);
        assert_eq!(playlist.get(1).map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn from_json_validates_ids() {
        let json = r#"[
            {"id": "x", "title": "X", "artist": "A", "cover_art_ref": "c", "audio_ref": "x.mp3"},
            {"id": "x", "title": "Y", "artist": "A", "cover_art_ref": "c", "audio_ref": "y.mp3"}
        ]"#;
        assert!(matches!(
            Playlist::from_json(json),
            Err(PlaybackError::DuplicateTrackId(_))
        ));
    }

    #[test]
    fn from_json_reports_malformed_input() {
        assert!(matches!(
            Playlist::from_json("{not json"),
            Err(PlaybackError::Playlist(_))
        ));
    }
}
