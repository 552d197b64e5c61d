//! Types for Chorus Player server API requests and responses.

use chorus_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Response Envelope
// =============================================================================

/// Code the server uses for a successful operation.
pub const CODE_OK: i64 = 0;

/// Standard envelope wrapping every server payload.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Operation result code, [`CODE_OK`] on success
    pub code: i64,
    /// Human-readable outcome message
    #[serde(default)]
    pub message: String,
    /// Payload, absent for bare acknowledgements
    pub data: Option<T>,
}

// =============================================================================
// Stream URL Types
// =============================================================================

/// Response from the stream URL resolver.
///
/// The resolver answers without the standard envelope: `data` carries one
/// entry per requested id, and the `url` inside may be null when the track
/// is not available at the requested quality.
#[derive(Debug, Deserialize)]
pub struct SongUrlResponse {
    #[serde(default)]
    pub data: Vec<SongUrlEntry>,
}

/// Single resolver entry.
#[derive(Debug, Deserialize)]
pub struct SongUrlEntry {
    pub url: Option<String>,
}

// =============================================================================
// Recent Play Types
// =============================================================================

/// Request body for reporting a play.
#[derive(Debug, Serialize)]
pub struct ReportPlayRequest {
    #[serde(rename = "songId")]
    pub song_id: String,
}

/// Request body for a recent plays page.
#[derive(Debug, Serialize)]
pub struct RecentPlaysRequest {
    #[serde(rename = "pageNum")]
    pub page_num: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// One page of the server-side recent plays, newest first.
#[derive(Debug, Default, Deserialize)]
pub struct RecentPlaysPage {
    #[serde(default)]
    pub items: Vec<RecentPlayItem>,
    #[serde(default)]
    pub total: u64,
}

/// Single recent play entry.
///
/// The server sends numeric song ids and the duration as a string of
/// whole seconds; [`From<RecentPlayItem>`] normalizes both into [`Track`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPlayItem {
    pub song_id: i64,
    #[serde(default)]
    pub song_name: String,
    pub artist_name: Option<String>,
    pub album: Option<String>,
    pub duration: Option<String>,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
}

impl From<RecentPlayItem> for Track {
    fn from(item: RecentPlayItem) -> Self {
        let mut track = Track::new(TrackId::new(item.song_id.to_string()), item.song_name);
        track.artist = item.artist_name;
        track.album = item.album;
        track.cover = item.cover_url;
        track.url = item.audio_url;
        track.duration_secs = item.duration.and_then(|d| d.parse().ok());
        track
    }
}
