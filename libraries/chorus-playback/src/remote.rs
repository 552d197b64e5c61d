//! Remote service port for playback
//!
//! The controller only ever needs two things from the streaming service:
//! a playable URL for a track and a place to report plays. Both sit
//! behind `PlaybackRemote` so the HTTP client stays out of this crate.

use crate::error::Result;
use async_trait::async_trait;
use chorus_core::{AudioQuality, TrackId};

/// Remote operations the playback controller depends on
#[async_trait]
pub trait PlaybackRemote: Send + Sync {
    /// Resolve a playable stream URL for a track
    ///
    /// `Ok(None)` means the service answered but offers no stream for
    /// this track at the requested quality.
    async fn resolve_url(&self, track_id: &TrackId, quality: AudioQuality)
        -> Result<Option<String>>;

    /// Report that a track started playing
    ///
    /// Callers treat this as fire-and-forget; failures are logged and
    /// never affect playback.
    async fn report_played(&self, track_id: &TrackId) -> Result<()>;
}

/// Scriptable remote for testing
///
/// Resolves from a fixed map and records reported plays so tests can
/// assert on them.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct StubRemote {
    urls: std::collections::HashMap<String, String>,
    fail_resolve: bool,
    reports: std::sync::Arc<std::sync::Mutex<Vec<TrackId>>>,
}

#[cfg(test)]
impl StubRemote {
    /// Remote that knows no URLs and accepts all reports
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a URL to resolve for a track id
    pub fn with_url(mut self, track_id: &str, url: &str) -> Self {
        self.urls.insert(track_id.to_string(), url.to_string());
        self
    }

    /// Make every resolution fail
    pub fn failing_resolve(mut self) -> Self {
        self.fail_resolve = true;
        self
    }

    /// Track ids reported so far, in order
    pub fn reported(&self) -> Vec<TrackId> {
        self.reports.lock().expect("stub remote poisoned").clone()
    }
}

#[cfg(test)]
#[async_trait]
impl PlaybackRemote for StubRemote {
    async fn resolve_url(
        &self,
        track_id: &TrackId,
        _quality: AudioQuality,
    ) -> Result<Option<String>> {
        if self.fail_resolve {
            return Err(crate::error::PlaybackError::Remote(
                "resolver unavailable".to_string(),
            ));
        }
        Ok(self.urls.get(track_id.as_str()).cloned())
    }

    async fn report_played(&self, track_id: &TrackId) -> Result<()> {
        self.reports
            .lock()
            .expect("stub remote poisoned")
            .push(track_id.clone());
        Ok(())
    }
}
