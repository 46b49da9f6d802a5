//! WASM bindings for pulse-playback
//!
//! Drives an `HtmlAudioElement` from the playback controller so the
//! transport bar can run in a browser.

#[cfg(feature = "wasm")]
pub mod types;

#[cfg(feature = "wasm")]
pub mod resource;

#[cfg(feature = "wasm")]
pub mod controller;

#[cfg(feature = "wasm")]
pub use controller::WasmPlaybackController;

#[cfg(feature = "wasm")]
pub use resource::HtmlAudioResource;

#[cfg(feature = "wasm")]
pub use types::WasmTrack;
