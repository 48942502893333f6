//! Cadence CLI - headless host for cadence-playback
//!
//! Reads line commands from stdin, drives the player from a timer, and
//! prints what happened. Logs go to stderr; stdout carries only player
//! output.

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use error::{CliError, Result};
