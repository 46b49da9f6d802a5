/// Common test utilities and fixtures
use pulse_playback::{
    MediaNotification, MediaResource, PlaybackConfig, PlaybackController, PlaybackError, Playlist,
    Track,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Media resource that records calls instead of playing audio
#[derive(Debug, Default)]
pub struct MockMedia {
    pub source: Option<String>,
    pub calls: Vec<String>,
    pub reject_play: bool,
    pub attached: bool,
    pub released: Rc<Cell<bool>>,
    pub volume: f32,
    pub muted: bool,
    pub position: f64,
}

impl MediaResource for MockMedia {
    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.position = 0.0;
        self.calls.push(format!("set_source {}", uri));
    }

    fn load(&mut self) {
        self.calls.push("load".to_string());
    }

    fn play(&mut self) -> pulse_playback::Result<()> {
        self.calls.push("play".to_string());
        if self.reject_play {
            return Err(PlaybackError::Media("NotAllowedError".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) -> pulse_playback::Result<()> {
        self.calls.push("pause".to_string());
        Ok(())
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
        self.calls.push(format!("seek {}", seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.calls.push(format!("volume {}", volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.calls.push(format!("muted {}", muted));
    }

    fn attach(&mut self) -> pulse_playback::Result<()> {
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.released.set(true);
    }
}

pub mod fixtures {
    /// Demo playlist used by the web front end
    pub const DEMO_TRACKS: [(&str, &str, &str); 4] = [
        ("1", "SoundHelix Song 1", "T. Schürger"),
        ("2", "SoundHelix Song 2", "T. Schürger"),
        ("3", "SoundHelix Song 3", "T. Schürger"),
        ("4", "SoundHelix Song 4", "T. Schürger"),
    ];

    pub fn audio_src(id: &str) -> String {
        format!(
            "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{}.mp3",
            id
        )
    }
}

/// The four-track demo playlist
pub fn demo_playlist() -> Playlist {
    let tracks = fixtures::DEMO_TRACKS
        .iter()
        .map(|(id, title, artist)| {
            Track::new(
                *id,
                *title,
                *artist,
                format!("https://picsum.photos/seed/{}/300/300", id),
                fixtures::audio_src(id),
            )
        })
        .collect();

    Playlist::new(tracks).expect("demo playlist has unique ids")
}

/// Controller over the demo playlist with a fixed shuffle seed
pub fn create_controller() -> PlaybackController<MockMedia> {
    init_tracing();
    let config = PlaybackConfig {
        shuffle_seed: Some(7),
        ..Default::default()
    };
    PlaybackController::new(demo_playlist(), config, MockMedia::default())
}

/// Notifications as the resource would report them for the selected source
pub fn current_source(controller: &PlaybackController<MockMedia>) -> String {
    controller
        .current_track()
        .map(|t| t.audio_ref.clone())
        .unwrap_or_default()
}

pub fn metadata(controller: &PlaybackController<MockMedia>, duration: f64) -> MediaNotification {
    MediaNotification::MetadataLoaded {
        source: current_source(controller),
        duration,
    }
}

pub fn time_update(controller: &PlaybackController<MockMedia>, position: f64) -> MediaNotification {
    MediaNotification::TimeUpdate {
        source: current_source(controller),
        position,
    }
}

pub fn ended(controller: &PlaybackController<MockMedia>) -> MediaNotification {
    MediaNotification::Ended {
        source: current_source(controller),
    }
}
