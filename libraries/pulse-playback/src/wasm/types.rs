//! WASM-compatible type definitions

use crate::Track;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// WASM-compatible track
///
/// Field names follow the JavaScript convention (`coverArtUrl`, `audioSrc`).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[wasm_bindgen]
pub struct WasmTrack {
    id: String,
    title: String,
    artist: String,
    cover_art_url: String,
    audio_src: String,
}

#[wasm_bindgen]
impl WasmTrack {
    /// Create a new track
    #[wasm_bindgen(constructor)]
    pub fn new(
        id: String,
        title: String,
        artist: String,
        cover_art_url: String,
        audio_src: String,
    ) -> Self {
        Self {
            id,
            title,
            artist,
            cover_art_url,
            audio_src,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn artist(&self) -> String {
        self.artist.clone()
    }

    #[wasm_bindgen(getter, js_name = coverArtUrl)]
    pub fn cover_art_url(&self) -> String {
        self.cover_art_url.clone()
    }

    #[wasm_bindgen(getter, js_name = audioSrc)]
    pub fn audio_src(&self) -> String {
        self.audio_src.clone()
    }
}

impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover_art_url: track.cover_art_ref.clone(),
            audio_src: track.audio_ref.clone(),
        }
    }
}

impl From<WasmTrack> for Track {
    fn from(track: WasmTrack) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist,
            cover_art_ref: track.cover_art_url,
            audio_ref: track.audio_src,
        }
    }
}
