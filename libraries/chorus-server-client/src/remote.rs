//! Playback remote adapter.
//!
//! Bridges the HTTP client into the `chorus_playback::PlaybackRemote`
//! port so the playback manager can resolve stream URLs and report plays
//! without knowing about HTTP.

use crate::client::ChorusClient;
use crate::error::ClientError;
use async_trait::async_trait;
use chorus_core::{AudioQuality, TrackId};
use chorus_playback::{PlaybackError, PlaybackRemote};

#[async_trait]
impl PlaybackRemote for ChorusClient {
    async fn resolve_url(
        &self,
        track_id: &TrackId,
        quality: AudioQuality,
    ) -> chorus_playback::Result<Option<String>> {
        self.resolve_song_url(track_id.as_str(), quality)
            .await
            .map_err(into_playback_error)
    }

    async fn report_played(&self, track_id: &TrackId) -> chorus_playback::Result<()> {
        self.report_recent_play(track_id.as_str())
            .await
            .map_err(into_playback_error)
    }
}

fn into_playback_error(err: ClientError) -> PlaybackError {
    PlaybackError::Remote(err.to_string())
}
