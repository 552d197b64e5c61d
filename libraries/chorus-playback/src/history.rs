//! Recent-play tracking
//!
//! Bounded most-recent-first list of played tracks. Every `play` lands
//! the current track here; re-playing a queued track moves it back to
//! the front instead of duplicating it. The list is capped, dropping the
//! oldest entry once full, and is kept independent of the queue so
//! clearing one never touches the other.

use chorus_core::Track;
use std::collections::VecDeque;

/// Default maximum number of recent plays kept
const DEFAULT_RECENT_LIMIT: usize = 200;

/// Bounded recency list of played tracks, newest first
#[derive(Debug, Clone)]
pub struct RecentPlays {
    /// Played tracks, front = most recent
    tracks: VecDeque<Track>,

    /// Maximum number of entries
    limit: usize,
}

impl RecentPlays {
    /// Create a recent-play list with the given capacity
    pub fn new(limit: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(limit.min(DEFAULT_RECENT_LIMIT)),
            limit,
        }
    }

    /// Record a play of this track
    ///
    /// The track moves to the front; any earlier entry with the same
    /// identifier is dropped. Tracks with an empty identifier are
    /// ignored. At capacity the oldest entry is evicted.
    pub fn add(&mut self, track: Track) {
        if track.id.as_str().is_empty() {
            return;
        }

        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(self.limit);
    }

    /// All recent plays, most recent first
    pub fn all(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Get entry at position (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Forget all recent plays
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Change the capacity, evicting oldest entries if shrinking
    pub fn resize(&mut self, limit: usize) {
        self.limit = limit;
        self.tracks.truncate(limit);
    }
}

impl Default for RecentPlays {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}
