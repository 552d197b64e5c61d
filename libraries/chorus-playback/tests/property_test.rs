//! Property-based tests for the playback queue and recent plays
//!
//! Uses proptest to verify invariants across many random inputs.
//! Every property here guards a contract the controller relies on:
//! unique queue ids, call-ordered play-next inserts, bounded history.

use chorus_core::{Track, TrackId};
use chorus_playback::{Queue, RecentPlays};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,10}",                        // id
        "[A-Za-z ]{1,30}",                       // title
        proptest::option::of("[A-Za-z ]{1,20}"), // artist
    )
        .prop_map(|(id, title, artist)| {
            let mut track = Track::new(TrackId::new(id), title);
            track.artist = artist;
            track
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..50)
}

/// Insert ids drawn from an uppercase alphabet so they can never
/// collide with the lowercase seed ids.
fn insert_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z]{3,8}", 1..8).prop_map(|set| set.into_iter().collect())
}

// ===== Property Tests =====

proptest! {
    /// Property: queue ids stay unique through every kind of edit
    #[test]
    fn queue_ids_stay_unique(
        initial in arbitrary_tracks(),
        edits in prop::collection::vec((0u8..4, arbitrary_track()), 1..30)
    ) {
        let mut queue = Queue::new();
        queue.append_all(initial);

        for (op, track) in edits {
            match op {
                0 => queue.append(track),
                1 => queue.insert_next(track),
                2 => {
                    let _ = queue.remove(&track.id);
                }
                _ => queue.append_all(vec![track]),
            }

            let mut seen = HashSet::new();
            for t in queue.tracks() {
                prop_assert!(seen.insert(t.id.clone()), "duplicate id {} in queue", t.id);
            }
        }
    }

    /// Property: consecutive play-next inserts land contiguously after
    /// the current track, in call order
    #[test]
    fn insert_next_keeps_call_order(
        seed in arbitrary_tracks(),
        inserts in insert_ids()
    ) {
        let mut queue = Queue::new();
        queue.append_all(seed);
        prop_assume!(!queue.is_empty());
        let current = queue.current_index();

        for id in &inserts {
            queue.insert_next(Track::new(TrackId::new(id.clone()), "Inserted"));
        }

        let got: Vec<&str> = queue
            .tracks()
            .iter()
            .skip(current + 1)
            .take(inserts.len())
            .map(|t| t.id.as_str())
            .collect();
        let want: Vec<&str> = inserts.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want, "inserts out of call order");
    }

    /// Property: appending an already queued id never changes the
    /// queue, only the current index
    #[test]
    fn append_existing_keeps_length(
        tracks in arbitrary_tracks(),
        pick in any::<prop::sample::Index>()
    ) {
        let mut queue = Queue::new();
        queue.append_all(tracks);
        prop_assume!(!queue.is_empty());

        let track = pick.get(queue.tracks()).clone();
        let before: Vec<TrackId> = queue.tracks().iter().map(|t| t.id.clone()).collect();

        queue.append(track.clone());

        let after: Vec<TrackId> = queue.tracks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(after, before, "append of existing id reshaped the queue");
        prop_assert_eq!(
            queue.current_track().map(|t| t.id.clone()),
            Some(track.id),
            "append of existing id did not select it"
        );
    }

    /// Property: removing a track keeps the remaining order intact
    #[test]
    fn remove_preserves_relative_order(
        tracks in arbitrary_tracks(),
        pick in any::<prop::sample::Index>()
    ) {
        let mut queue = Queue::new();
        queue.append_all(tracks);
        prop_assume!(queue.len() >= 2);

        let victim = pick.get(queue.tracks()).id.clone();
        let expected: Vec<TrackId> = queue
            .tracks()
            .iter()
            .map(|t| t.id.clone())
            .filter(|id| *id != victim)
            .collect();

        let removed = queue.remove(&victim);
        prop_assert!(removed.is_some());

        let got: Vec<TrackId> = queue.tracks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(got, expected, "removal reordered the survivors");
    }

    /// Property: after a cursor reset the next insert lands right
    /// after the current track again
    #[test]
    fn reset_cursor_targets_slot_after_current(
        seed in arbitrary_tracks(),
        inserts in insert_ids()
    ) {
        let mut queue = Queue::new();
        queue.append_all(seed);
        prop_assume!(!queue.is_empty());

        for id in &inserts {
            queue.insert_next(Track::new(TrackId::new(id.clone()), "Inserted"));
        }
        queue.reset_insert_cursor();

        let current = queue.current_index();
        queue.insert_next(Track::new(TrackId::new("zz-fresh"), "Fresh"));

        prop_assert_eq!(queue.tracks()[current + 1].id.as_str(), "zz-fresh");
        prop_assert_eq!(queue.next_insert_index(), Some(current + 2));
    }

    /// Property: recent plays stay bounded, deduped and newest first
    #[test]
    fn recent_plays_stay_bounded_and_unique(
        limit in 1usize..50,
        plays in prop::collection::vec(arbitrary_track(), 1..200)
    ) {
        let mut recent = RecentPlays::new(limit);
        for track in plays.iter().cloned() {
            recent.add(track);
        }

        prop_assert!(recent.len() <= limit, "recent plays grew past the limit");

        let mut seen = HashSet::new();
        for track in recent.all() {
            prop_assert!(seen.insert(track.id.clone()), "duplicate id in recent plays");
        }

        let last = plays.last().expect("at least one play");
        prop_assert_eq!(recent.all()[0].id.clone(), last.id.clone(), "newest play not first");
    }
}
