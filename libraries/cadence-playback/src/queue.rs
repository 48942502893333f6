//! Play queue derived from the catalog
//!
//! A queue is always a full permutation of the catalog with a cursor:
//!
//! ```text
//! catalog:   A B C D E
//! select C:  C D E A B      (sequential: rotation)
//! select C:  C E A D B      (shuffled: C pinned, rest permuted)
//!            ^ current_index = 0
//! ```
//!
//! `advance`/`retreat` only move the cursor and wrap in both directions.
//! Whether playback repeats or stops at the end is decided by
//! [`boundary`](crate::boundary), not here.

use crate::catalog::Catalog;
use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffle_tracks;
use crate::types::Track;
use rand::Rng;
use std::sync::Arc;

/// Ordered permutation of the catalog with a play cursor
#[derive(Debug, Clone)]
pub struct Queue {
    /// Every catalog track exactly once
    tracks: Vec<Arc<Track>>,

    /// Always `< tracks.len()`
    current_index: usize,
}

impl Queue {
    /// Queue in catalog order, cursor on the first track
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            tracks: catalog.tracks().to_vec(),
            current_index: 0,
        }
    }

    /// Build a fresh queue headed by the track with `id`
    ///
    /// Sequential: the catalog rotated so the selection comes first.
    /// Shuffled: the selection followed by the rest of the catalog in random
    /// order.
    pub fn select_track<R: Rng + ?Sized>(
        catalog: &Catalog,
        id: &str,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self> {
        let selected = catalog
            .position(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.to_string()))?;
        let all = catalog.tracks();

        let tracks = if shuffle {
            let mut rest: Vec<Arc<Track>> = all[..selected]
                .iter()
                .chain(&all[selected + 1..])
                .cloned()
                .collect();
            shuffle_tracks(&mut rest, rng);

            let mut tracks = Vec::with_capacity(all.len());
            tracks.push(Arc::clone(&all[selected]));
            tracks.extend(rest);
            tracks
        } else {
            all[selected..].iter().chain(&all[..selected]).cloned().collect()
        };

        Ok(Self {
            tracks,
            current_index: 0,
        })
    }

    /// Move the cursor forward, wrapping past the end
    pub fn advance(&mut self) {
        self.current_index = (self.current_index + 1) % self.tracks.len();
    }

    /// Move the cursor back, wrapping before the start
    pub fn retreat(&mut self) {
        let len = self.tracks.len();
        self.current_index = (self.current_index + len - 1) % len;
    }

    /// Current track followed by the rest of the queue
    ///
    /// Recomputed from the cursor on every call.
    pub fn peek_remaining(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks[self.current_index..].iter().map(|t| t.as_ref())
    }

    /// Track under the cursor
    pub fn current(&self) -> &Track {
        &self.tracks[self.current_index]
    }

    /// Cursor position
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the cursor is on the final entry
    pub fn is_last(&self) -> bool {
        self.current_index == self.tracks.len() - 1
    }

    /// Number of entries (equals the catalog size)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; queues are built from non-empty catalogs
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Entries in queue order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.iter().map(|t| t.as_ref())
    }

    /// Track ids in queue order
    pub fn ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}
