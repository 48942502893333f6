//! WASM bindings for cadence-playback
//!
//! This module provides WebAssembly bindings for the Player, allowing the
//! playback core to drive an HTML audio element in the browser.

pub mod clock;
pub mod player;

pub use clock::JsClock;
pub use player::WasmPlayer;
