//! WASM-compatible Player wrapper

use super::clock::JsClock;
use crate::{Catalog, PlaybackConfig, PlaybackError, Player, Track};
use js_sys::{Function, Object};
use wasm_bindgen::prelude::*;

/// WASM-compatible player
///
/// This wraps the core Player with a JavaScript-friendly API. Every call
/// forwards the events it produced to the `onEvent` callback.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player,

    // Event callback
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player from a catalog array and a clock object
    ///
    /// `catalog` is an array of `{id, name, artist, imagePath, audioPath,
    /// totalDuration}`; `clock` may define `start`, `stop`, `seekTo(seconds)`
    /// and `load(audioPath, id)`.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: JsValue, clock: Object, config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let records: Vec<Track> = serde_wasm_bindgen::from_value(catalog)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse catalog: {}", e)))?;
        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let catalog = Catalog::load(records).map_err(to_js)?;

        Ok(Self {
            inner: Player::new(catalog, config, Box::new(JsClock::new(clock))),
            on_event: None,
        })
    }

    // ===== Intents =====

    /// Rebuild the queue around a track and play it
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&mut self, id: &str) -> Result<bool, JsValue> {
        let outcome = self.inner.select_track(id).map_err(to_js)?;
        self.flush_events();
        Ok(!outcome.is_noop())
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        self.inner.toggle_play_pause();
        self.flush_events();
    }

    pub fn play(&mut self) {
        self.inner.play();
        self.flush_events();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = skipNext)]
    pub fn skip_next(&mut self) {
        self.inner.skip_next();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = skipPrevious)]
    pub fn skip_previous(&mut self) {
        self.inner.skip_previous();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = cycleLoop)]
    pub fn cycle_loop(&mut self) {
        self.inner.cycle_loop();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
        self.flush_events();
    }

    /// Scrub to a position in seconds
    pub fn seek(&mut self, seconds: f64) -> Result<(), JsValue> {
        self.inner.seek(seconds).map_err(to_js)?;
        self.flush_events();
        Ok(())
    }

    // ===== Clock & Loader Signals =====

    /// Deliver a clock tick
    ///
    /// Returns the boundary action (`"advance"`, `"stop"`, `"repeatTrack"`)
    /// if one fired, otherwise `undefined`.
    pub fn tick(&mut self, delta_secs: f64) -> Result<JsValue, JsValue> {
        let action = self.inner.tick(delta_secs).map_err(to_js)?;
        self.flush_events();
        match action {
            Some(action) => serde_wasm_bindgen::to_value(&action)
                .map_err(|e| JsValue::from_str(&format!("Failed to convert action: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Report that the audio element could not play the current track
    #[wasm_bindgen(js_name = trackUnavailable)]
    pub fn track_unavailable(&mut self, reason: &str) {
        self.inner.track_unavailable(reason);
        self.flush_events();
    }

    // ===== State Queries =====

    /// Current state as a plain JS object
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or(JsValue::NULL)
    }

    /// Catalog tracks in display order
    pub fn catalog(&self) -> JsValue {
        let tracks: Vec<&Track> = self.inner.catalog().iter().collect();
        serde_wasm_bindgen::to_value(&tracks).unwrap_or(JsValue::NULL)
    }

    /// Current track followed by the rest of the queue
    pub fn remaining(&self) -> JsValue {
        let tracks: Vec<&Track> = self.inner.remaining().collect();
        serde_wasm_bindgen::to_value(&tracks).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    #[wasm_bindgen(js_name = progressPercent)]
    pub fn progress_percent(&self) -> f64 {
        self.inner.progress_percent()
    }

    // ===== Event Listeners =====

    /// Register the event callback; receives one event object per call
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };
        for event in events {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
