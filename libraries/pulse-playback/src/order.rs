//! Order strategy for playlist traversal
//!
//! Computes the active play order: identity when shuffle is off, otherwise a
//! Fisher-Yates shuffle with the current track pinned at position 0 so that
//! toggling shuffle never jumps tracks.

use crate::playlist::Playlist;
use rand::seq::SliceRandom;
use rand::Rng;

/// Compute the play order over `playlist`
///
/// Returns a permutation of `0..playlist.len()`. When `shuffle_enabled` is
/// true and `current_track_id` is in the playlist, its index is placed first
/// and the remainder is uniformly shuffled.
pub fn compute_order<R: Rng + ?Sized>(
    playlist: &Playlist,
    current_track_id: Option<&str>,
    shuffle_enabled: bool,
    rng: &mut R,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..playlist.len()).collect();

    if !shuffle_enabled || order.len() <= 1 {
        return order;
    }

    let pinned = current_track_id.and_then(|id| playlist.index_of(id));

    match pinned {
        Some(index) => {
            order.remove(index);
            order.shuffle(rng);
            order.insert(0, index);
        }
        None => {
            order.shuffle(rng);
        }
    }

    order
}

/// Identity order for a playlist of `len` tracks
pub fn identity_order(len: usize) -> Vec<usize> {
    (0..len).collect()
}
