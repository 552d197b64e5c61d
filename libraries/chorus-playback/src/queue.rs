//! Insert-cursor queue
//!
//! A flat ordered track list with two cursors:
//! - Current index: the track the transport is playing
//! - Next-insert cursor: where the next "play next" insertion lands
//!
//! ```text
//! Queue:
//!   [0] Track A   <- current index
//!   [1] Track X   <- first insert_next call
//!   [2] Track Y   <- second insert_next call (cursor advanced)
//!   [3] Track B
//!   [4] Track C
//! ```
//!
//! The cursor advances after every `insert_next` so repeated calls land
//! in call order, and is re-anchored to (current + 1) whenever the
//! current track changes through advancement.

use chorus_core::{Track, TrackId};

use crate::error::{PlaybackError, Result};

/// Ordered track list with a current-position cursor
///
/// Track identifiers are unique within the queue: appending an
/// already-queued identifier selects it instead of duplicating it, and
/// `insert_next` relocates an existing occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Queue {
    /// Tracks in play order
    tracks: Vec<Track>,

    /// Index of the currently selected track
    current_index: usize,

    /// Where the next `insert_next` lands, when set
    next_insert_index: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current_index: 0,
            next_insert_index: None,
        }
    }

    /// Create a queue from an existing track list
    ///
    /// Used to restore a persisted session. The index is clamped to the
    /// last valid position if it points past the end.
    pub fn with_tracks(tracks: Vec<Track>, current_index: usize) -> Self {
        let current_index = if tracks.is_empty() {
            0
        } else {
            current_index.min(tracks.len() - 1)
        };

        Self {
            tracks,
            current_index,
            next_insert_index: None,
        }
    }

    /// Append a track and select it
    ///
    /// If the identifier is already queued the existing entry is selected
    /// instead: the queue keeps its length and order, only the current
    /// index moves. Otherwise the track is pushed to the end and becomes
    /// current.
    pub fn append(&mut self, track: Track) {
        if let Some(existing) = self.position_of(&track.id) {
            self.current_index = existing;
        } else {
            self.tracks.push(track);
            self.current_index = self.tracks.len() - 1;
        }
    }

    /// Append a batch of tracks one at a time
    ///
    /// Each entry goes through `append`. The batch stops at the first
    /// entry whose identifier is already queued, leaving that entry
    /// selected and the remainder unprocessed.
    pub fn append_all(&mut self, tracks: Vec<Track>) {
        for track in tracks {
            if let Some(existing) = self.position_of(&track.id) {
                self.current_index = existing;
                break;
            }
            self.tracks.push(track);
            self.current_index = self.tracks.len() - 1;
        }
    }

    /// Insert a track right after the insert cursor
    ///
    /// Any existing occurrence of the identifier is removed first. The
    /// insertion index is the next-insert cursor if set, else
    /// (current index + 1), clamped to the queue bounds after the
    /// removal. The cursor then advances past the inserted track so
    /// repeated calls land in call order.
    pub fn insert_next(&mut self, track: Track) {
        if let Some(existing) = self.position_of(&track.id) {
            self.tracks.remove(existing);
        }

        let base_index = self
            .next_insert_index
            .unwrap_or(self.current_index + 1);
        let insert_index = base_index.min(self.tracks.len());

        self.tracks.insert(insert_index, track);
        self.next_insert_index = Some(insert_index + 1);
    }

    /// Remove a track by identifier
    ///
    /// Returns the removed track, or `None` if the identifier was not
    /// queued. The current index is left untouched: removing a track at
    /// or before it shifts which track it addresses, and removing the
    /// tail can leave it dangling until the next advancement re-wraps it.
    pub fn remove(&mut self, id: &TrackId) -> Option<Track> {
        let position = self.position_of(id)?;
        Some(self.tracks.remove(position))
    }

    /// Re-anchor the insert cursor to (current index + 1)
    ///
    /// Called whenever the current track changes through advancement so
    /// "play next" stays attached to the now-playing track.
    pub fn reset_insert_cursor(&mut self) {
        self.next_insert_index = Some(self.current_index + 1);
    }

    /// Replace the whole queue and select the first track
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current_index = 0;
        self.next_insert_index = None;
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current_index = 0;
        self.next_insert_index = None;
    }

    /// Select the track at `index`
    pub fn set_current_index(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        self.current_index = index;
        Ok(())
    }

    /// Write a resolved URL into the queued track with this identifier
    ///
    /// Mutation is keyed on the identifier rather than a position so a
    /// late resolution can only ever fill in the track it was requested
    /// for. Returns false if the track has left the queue.
    pub fn set_track_url(&mut self, id: &TrackId, url: impl Into<String>) -> bool {
        match self.tracks.iter_mut().find(|t| &t.id == id) {
            Some(track) => {
                track.url = Some(url.into());
                true
            }
            None => false,
        }
    }

    /// Get the currently selected track
    ///
    /// `None` when the queue is empty or the index is dangling after a
    /// removal.
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Current index position
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Where the next `insert_next` will land, if armed
    pub fn next_insert_index(&self) -> Option<usize> {
        self.next_insert_index
    }

    /// All queued tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::TrackId;

    fn create_test_track(id: &str, title: &str) -> Track {
        Track::new(TrackId::new(id), title)
    }

    fn queue_of(ids: &[&str]) -> Queue {
        let tracks = ids
            .iter()
            .map(|id| create_test_track(id, &format!("Track {}", id)))
            .collect();
        Queue::with_tracks(tracks, 0)
    }

    fn ids(queue: &Queue) -> Vec<&str> {
        queue.tracks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current_track().is_none());
    }

    #[test]
    fn append_selects_the_new_track() {
        let mut queue = Queue::new();
        queue.append(create_test_track("1", "Track 1"));
        queue.append(create_test_track("2", "Track 2"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current_track().unwrap().id.as_str(), "2");
    }

    #[test]
    fn append_existing_keeps_length_and_selects_it() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_current_index(2).unwrap();

        queue.append(create_test_track("b", "Track b"));

        assert_eq!(queue.len(), 3);
        assert_eq!(ids(&queue), vec!["a", "b", "c"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn append_all_stops_at_first_existing() {
        let mut queue = queue_of(&["a", "b", "c"]);

        queue.append_all(vec![
            create_test_track("d", "Track d"),
            create_test_track("b", "Track b"),
            create_test_track("e", "Track e"),
        ]);

        // d lands, b short-circuits the batch, e never gets looked at
        assert_eq!(ids(&queue), vec!["a", "b", "c", "d"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn append_all_dedupes_within_the_batch() {
        let mut queue = Queue::new();

        queue.append_all(vec![
            create_test_track("x", "Track x"),
            create_test_track("x", "Track x"),
        ]);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn insert_next_lands_after_current() {
        let mut queue = queue_of(&["a", "b", "c"]);

        queue.insert_next(create_test_track("x", "Track x"));

        assert_eq!(ids(&queue), vec!["a", "x", "b", "c"]);
        assert_eq!(queue.next_insert_index(), Some(2));
    }

    #[test]
    fn insert_next_sequences_in_call_order() {
        let mut queue = queue_of(&["a", "b", "c"]);

        queue.insert_next(create_test_track("x", "Track x"));
        queue.insert_next(create_test_track("y", "Track y"));

        assert_eq!(ids(&queue), vec!["a", "x", "y", "b", "c"]);
    }

    #[test]
    fn insert_next_relocates_existing_track() {
        let mut queue = queue_of(&["a", "b", "c"]);

        queue.insert_next(create_test_track("c", "Track c"));

        assert_eq!(ids(&queue), vec!["a", "c", "b"]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn insert_next_clamps_past_the_end() {
        let mut queue = queue_of(&["a", "b"]);
        queue.set_current_index(1).unwrap();

        queue.insert_next(create_test_track("x", "Track x"));
        queue.insert_next(create_test_track("y", "Track y"));

        assert_eq!(ids(&queue), vec!["a", "b", "x", "y"]);
    }

    #[test]
    fn reset_insert_cursor_reanchors() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.insert_next(create_test_track("x", "Track x"));
        assert_eq!(queue.next_insert_index(), Some(2));

        queue.set_current_index(2).unwrap();
        queue.reset_insert_cursor();

        assert_eq!(queue.next_insert_index(), Some(3));
    }

    #[test]
    fn remove_filters_by_id() {
        let mut queue = queue_of(&["a", "b", "c"]);

        let removed = queue.remove(&TrackId::new("b")).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(ids(&queue), vec!["a", "c"]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut queue = queue_of(&["a"]);
        assert!(queue.remove(&TrackId::new("zzz")).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn remove_leaves_current_index_untouched() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_current_index(2).unwrap();

        queue.remove(&TrackId::new("a")).unwrap();

        // Index still 2, now past the end until the next advancement
        assert_eq!(queue.current_index(), 2);
        assert!(queue.current_track().is_none());
    }

    #[test]
    fn with_tracks_clamps_index() {
        let tracks = vec![
            create_test_track("a", "Track a"),
            create_test_track("b", "Track b"),
        ];
        let queue = Queue::with_tracks(tracks, 99);
        assert_eq!(queue.current_index(), 1);

        let empty = Queue::with_tracks(Vec::new(), 5);
        assert_eq!(empty.current_index(), 0);
    }

    #[test]
    fn set_current_index_checks_bounds() {
        let mut queue = queue_of(&["a", "b"]);
        assert!(queue.set_current_index(1).is_ok());
        assert!(matches!(
            queue.set_current_index(2),
            Err(PlaybackError::IndexOutOfBounds(2))
        ));
    }

    #[test]
    fn set_track_url_writes_by_id() {
        let mut queue = queue_of(&["a", "b"]);

        assert!(queue.set_track_url(&TrackId::new("b"), "https://cdn.example.com/b.mp3"));
        assert_eq!(
            queue.tracks()[1].url.as_deref(),
            Some("https://cdn.example.com/b.mp3")
        );

        assert!(!queue.set_track_url(&TrackId::new("gone"), "https://x"));
    }

    #[test]
    fn replace_resets_cursors() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_current_index(2).unwrap();
        queue.insert_next(create_test_track("x", "Track x"));

        queue.replace(vec![create_test_track("z", "Track z")]);

        assert_eq!(ids(&queue), vec!["z"]);
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.next_insert_index(), None);
    }

    #[test]
    fn clear_queue() {
        let mut queue = queue_of(&["a", "b"]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_insert_index(), None);
    }
}
