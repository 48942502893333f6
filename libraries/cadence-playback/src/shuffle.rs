//! Shuffle ordering for queue rebuilds
//!
//! Uniform random permutation (Fisher-Yates via `SliceRandom`). Callers pass
//! the RNG so a player can be seeded for reproducible orderings.

use crate::types::Track;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Shuffle tracks in place
///
/// Each track has equal probability of appearing at any position.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Arc<Track>], rng: &mut R) {
    tracks.shuffle(rng);
}
