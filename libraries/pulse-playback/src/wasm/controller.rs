//! WASM-compatible PlaybackController wrapper

use super::{resource::HtmlAudioResource, types::WasmTrack};
use crate::{PlaybackConfig, PlaybackController, PlaybackError, Playlist, RepeatMode, Track};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

type Shared = Rc<RefCell<PlaybackController<HtmlAudioResource>>>;

/// WASM-compatible playback controller
///
/// Wraps [`PlaybackController`] with a JavaScript-friendly API. The host
/// renders from `snapshot()` and consumes `drainEvents()` after each input.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    inner: Shared,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Create a controller over a fresh `<audio>` element
    ///
    /// `tracks` is an array of `{ id, title, artist, coverArtUrl, audioSrc }`.
    /// `config` is an optional `PlaybackConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(tracks: JsValue, config: JsValue) -> Result<WasmPlaybackController, JsValue> {
        let element = create_audio_element()?;
        Self::with_element(tracks, config, element)
    }

    /// Create a controller over an existing `<audio>` element
    #[wasm_bindgen(js_name = withElement)]
    pub fn with_element(
        tracks: JsValue,
        config: JsValue,
        element: HtmlAudioElement,
    ) -> Result<WasmPlaybackController, JsValue> {
        console_error_panic_hook::set_once();

        let tracks: Vec<WasmTrack> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
        let playlist =
            Playlist::new(tracks.into_iter().map(Track::from).collect()).map_err(to_js)?;

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        config.validate().map_err(to_js)?;

        let inner = Rc::new_cyclic(|handle| {
            let resource = HtmlAudioResource::new(element, handle.clone());
            RefCell::new(PlaybackController::new(playlist, config, resource))
        });

        Ok(Self { inner })
    }

    // ===== Playback Control =====

    /// Toggle play/pause
    #[wasm_bindgen(js_name = playPause)]
    pub fn play_pause(&self) {
        self.with(|c| c.play_pause());
    }

    /// Skip to next track
    pub fn next(&self) {
        self.with(|c| c.next());
    }

    /// Go to previous track
    pub fn previous(&self) {
        self.with(|c| c.previous());
    }

    /// Jump to a track by id
    pub fn select(&self, track_id: &str) -> Result<(), JsValue> {
        self.with(|c| c.select(track_id)).map_err(to_js)
    }

    /// Seek to position in seconds
    pub fn seek(&self, seconds: f64) -> Result<(), JsValue> {
        self.with(|c| c.seek(seconds)).map_err(to_js)
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f32) -> Result<(), JsValue> {
        self.with(|c| c.set_volume(level)).map_err(to_js)
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.with(|c| c.toggle_mute());
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) {
        self.with(|c| c.toggle_shuffle());
    }

    /// Cycle repeat mode (off -> all -> one -> off)
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&self) {
        self.with(|c| c.cycle_repeat());
    }

    /// Set repeat mode ("off" | "all" | "one")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&self, mode: &str) -> Result<(), JsValue> {
        let repeat = match mode {
            "off" => RepeatMode::Off,
            "all" => RepeatMode::All,
            "one" => RepeatMode::One,
            _ => {
                return Err(JsValue::from_str(
                    "Invalid repeat mode. Use 'off', 'all', or 'one'",
                ))
            }
        };

        self.with(|c| c.set_repeat(repeat));
        Ok(())
    }

    // ===== State Queries =====

    /// Display snapshot for the transport bar
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.with(|c| c.snapshot());
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Take all events queued since the last call
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        let events = self.with(|c| c.drain_events());
        serde_wasm_bindgen::to_value(&events)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Currently selected track (throws when the playlist is empty)
    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> Result<WasmTrack, JsValue> {
        self.with(|c| c.require_track().map(WasmTrack::from))
            .map_err(to_js)
    }
}

impl WasmPlaybackController {
    /// Run `f` against the controller, then deliver notifications that
    /// arrived while it was borrowed
    fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<HtmlAudioResource>) -> R) -> R {
        let mut controller = self.inner.borrow_mut();
        let result = f(&mut controller);

        while let Some(notification) = controller.resource().pop_backlog() {
            controller.handle_notification(notification);
        }

        result
    }
}

fn create_audio_element() -> Result<HtmlAudioElement, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let element = document
        .create_element("audio")?
        .dyn_into::<HtmlAudioElement>()
        .map_err(|_| JsValue::from_str("Failed to create audio element"))?;
    element.set_attribute("preload", "metadata")?;

    Ok(element)
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
