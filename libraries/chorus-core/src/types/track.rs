/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A streamable track as the player sees it.
///
/// Everything except `id` is display or playback metadata. The `url`
/// field starts out empty for tracks queued from catalog listings and is
/// filled in lazily the first time the track is about to be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Cover image reference
    pub cover: Option<String>,

    /// Resolved audio URL, absent until first playback attempt
    pub url: Option<String>,

    /// Track duration in seconds
    pub duration_secs: Option<u64>,

    /// Whether the user has favorited this track
    pub liked: bool,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: None,
            album: None,
            cover: None,
            url: None,
            duration_secs: None,
            liked: false,
        }
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }

    /// Set the track duration from a Duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = Some(duration.as_secs());
    }
}
