//! Immutable track catalog
//!
//! Loaded once at startup. Tracks are validated, sorted by name
//! (case-insensitive, stable) and shared as `Arc<Track>` so queues reference
//! them instead of copying.

use crate::error::{PlaybackError, Result};
use crate::types::Track;
use std::collections::HashSet;
use std::sync::Arc;

/// Validated, name-ordered list of tracks
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Arc<Track>>,
}

impl Catalog {
    /// Validate and sort `records`
    ///
    /// Fails with [`PlaybackError::Validation`] on the first record with an
    /// empty id, a duplicate id, or a non-positive duration, and when the
    /// list is empty.
    pub fn load(records: Vec<Track>) -> Result<Self> {
        if records.is_empty() {
            return Err(PlaybackError::validation(0, "catalog contains no tracks"));
        }

        validate(&records)?;

        let mut tracks: Vec<Arc<Track>> = records.into_iter().map(Arc::new).collect();
        // sort_by_cached_key is stable, ties keep insertion order
        tracks.sort_by_cached_key(|t| t.name.to_lowercase());

        tracing::debug!(tracks = tracks.len(), "catalog loaded");
        Ok(Self { tracks })
    }

    /// Parse a JSON array of track records and [`load`](Self::load) it
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Track> = serde_json::from_str(json)?;
        Self::load(records)
    }

    /// Number of tracks (never zero)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a loaded catalog
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in catalog order
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Iterate tracks in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().map(|t| t.as_ref())
    }

    /// Catalog position of the track with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Look up a track by id
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id).map(|t| t.as_ref())
    }
}

fn validate(records: &[Track]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, track) in records.iter().enumerate() {
        if track.id.trim().is_empty() {
            return Err(PlaybackError::validation(index, "track id is empty"));
        }
        if !track.total_duration.is_finite() || track.total_duration <= 0.0 {
            return Err(PlaybackError::validation(
                index,
                format!(
                    "track '{}' has non-positive duration {}",
                    track.id, track.total_duration
                ),
            ));
        }
        if !seen.insert(track.id.as_str()) {
            return Err(PlaybackError::validation(
                index,
                format!("duplicate track id '{}'", track.id),
            ));
        }
    }
    Ok(())
}
