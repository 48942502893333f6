//! Playback clock backed by a JavaScript object

use crate::{PlaybackClock, Track};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Clock that forwards to `start`, `stop`, `seekTo` and `load` functions on
/// a JS object
///
/// Missing functions are skipped, so a host can implement only what it
/// needs. The host is expected to call `WasmPlayer::tick` while started.
pub struct JsClock {
    target: Object,
}

impl JsClock {
    pub fn new(target: Object) -> Self {
        Self { target }
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    }

    fn call(&self, name: &str, args: &[JsValue]) {
        let Some(function) = self.method(name) else {
            return;
        };
        let result = match args {
            [] => function.call0(&self.target),
            [a] => function.call1(&self.target, a),
            [a, b, ..] => function.call2(&self.target, a, b),
        };
        if let Err(err) = result {
            tracing::warn!(method = name, error = ?err, "clock callback threw");
        }
    }
}

impl PlaybackClock for JsClock {
    fn start(&mut self) {
        self.call("start", &[]);
    }

    fn stop(&mut self) {
        self.call("stop", &[]);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.call("seekTo", &[JsValue::from_f64(seconds)]);
    }

    fn load(&mut self, track: &Track) {
        self.call(
            "load",
            &[
                JsValue::from_str(&track.audio_path),
                JsValue::from_str(&track.id),
            ],
        );
    }
}
