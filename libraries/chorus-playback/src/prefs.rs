//! Player preference keys and persistence
//!
//! The controller persists small bits of state (volume, resume position,
//! stream quality) through the `PreferenceStore` trait so the embedding
//! application decides where they live. Reads and writes go through the
//! `Preferences` facade, which swallows store failures with a warning:
//! a broken preference backend must never take playback down with it.

use crate::error::Result;
use chorus_core::{AudioQuality, TrackId};
use std::time::Duration;
use tracing::warn;

/// Preference key for whether playback resumes from the last position
pub const PREF_RESUME_ENABLED: &str = "player.resume_enabled";

/// Preference key for whether playback starts on its own after startup
pub const PREF_AUTOPLAY: &str = "player.autoplay";

/// Preference key for the volume level (0-100)
pub const PREF_VOLUME: &str = "player.volume";

/// Preference key for the last played track id
pub const PREF_LAST_TRACK_ID: &str = "player.last_track_id";

/// Preference key for the last playback position in whole seconds
pub const PREF_LAST_POSITION: &str = "player.last_position_secs";

/// Preference key for the preferred stream quality
pub const PREF_QUALITY: &str = "player.quality";

/// Backing store for player preferences
///
/// Implementors map string keys to string values; parsing and defaulting
/// stay in the `Preferences` facade on top.
pub trait PreferenceStore: Send {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, doing nothing when it is absent
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Typed view over a preference store
///
/// Every accessor is infallible: a failing store reads as unset and
/// writes are dropped with a warning.
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    /// Wrap a preference store
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, error = %e, "Preference read failed");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key = key, error = %e, "Preference write failed");
        }
    }

    fn read_bool(&self, key: &str) -> bool {
        matches!(self.read(key).as_deref(), Some("1") | Some("true"))
    }

    fn write_bool(&mut self, key: &str, value: bool) {
        self.write(key, if value { "1" } else { "0" });
    }

    /// Whether playback should resume from the persisted position
    pub fn resume_enabled(&self) -> bool {
        self.read_bool(PREF_RESUME_ENABLED)
    }

    /// Enable or disable resuming from the persisted position
    pub fn set_resume_enabled(&mut self, enabled: bool) {
        self.write_bool(PREF_RESUME_ENABLED, enabled);
    }

    /// Whether playback should start on its own after startup
    pub fn autoplay(&self) -> bool {
        self.read_bool(PREF_AUTOPLAY)
    }

    /// Enable or disable autoplay after startup
    pub fn set_autoplay(&mut self, enabled: bool) {
        self.write_bool(PREF_AUTOPLAY, enabled);
    }

    /// Persisted volume level, clamped to 0-100
    pub fn volume(&self) -> Option<u8> {
        self.read(PREF_VOLUME)
            .and_then(|raw| raw.parse::<u8>().ok())
            .map(|level| level.min(100))
    }

    /// Persist the volume level
    pub fn set_volume(&mut self, level: u8) {
        self.write(PREF_VOLUME, &level.to_string());
    }

    /// Persisted stream quality
    pub fn quality(&self) -> Option<AudioQuality> {
        self.read(PREF_QUALITY).and_then(|raw| raw.parse().ok())
    }

    /// Persist the stream quality
    pub fn set_quality(&mut self, quality: AudioQuality) {
        self.write(PREF_QUALITY, quality.as_str());
    }

    /// Last played track and position, `None` unless both were persisted
    pub fn last_played(&self) -> Option<(TrackId, u64)> {
        let id = self.read(PREF_LAST_TRACK_ID)?;
        let secs = self.read(PREF_LAST_POSITION)?.parse().ok()?;
        Some((TrackId::new(id), secs))
    }

    /// Persist the currently playing track and position
    pub fn set_last_played(&mut self, track_id: &TrackId, position_secs: u64) {
        self.write(PREF_LAST_TRACK_ID, track_id.as_str());
        self.write(PREF_LAST_POSITION, &position_secs.to_string());
    }

    /// Resume offset for a track, when resuming applies to it
    ///
    /// `Some` only when resuming is enabled, the persisted track id
    /// matches and the persisted position is past zero.
    pub fn resume_offset_for(&self, track_id: &TrackId) -> Option<Duration> {
        if !self.resume_enabled() {
            return None;
        }
        let (last_id, secs) = self.last_played()?;
        (last_id == *track_id && secs > 0).then(|| Duration::from_secs(secs))
    }
}

/// In-memory preference store for testing
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what the controller persisted.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
    failing: bool,
}

#[cfg(test)]
impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Read a raw value directly, bypassing the facade
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("memory store poisoned")
            .get(key)
            .cloned()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(crate::error::PlaybackError::Preferences(
                "store offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.values
            .lock()
            .expect("memory store poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.values
            .lock()
            .expect("memory store poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> (Preferences, MemoryStore) {
        let store = MemoryStore::new();
        (Preferences::new(Box::new(store.clone())), store)
    }

    #[test]
    fn booleans_round_trip_as_digits() {
        let (mut prefs, store) = prefs();

        assert!(!prefs.resume_enabled());
        prefs.set_resume_enabled(true);
        assert!(prefs.resume_enabled());
        assert_eq!(store.raw(PREF_RESUME_ENABLED).as_deref(), Some("1"));

        prefs.set_resume_enabled(false);
        assert!(!prefs.resume_enabled());
        assert_eq!(store.raw(PREF_RESUME_ENABLED).as_deref(), Some("0"));
    }

    #[test]
    fn boolean_accepts_true_literal() {
        let (prefs, store) = prefs();
        let mut raw = store.clone();
        raw.set(PREF_AUTOPLAY, "true").unwrap();
        assert!(prefs.autoplay());
    }

    #[test]
    fn volume_parses_and_clamps() {
        let (prefs, store) = prefs();
        let mut raw = store.clone();

        assert_eq!(prefs.volume(), None);
        raw.set(PREF_VOLUME, "73").unwrap();
        assert_eq!(prefs.volume(), Some(73));
        raw.set(PREF_VOLUME, "250").unwrap();
        assert_eq!(prefs.volume(), Some(100));
        raw.set(PREF_VOLUME, "loud").unwrap();
        assert_eq!(prefs.volume(), None);
    }

    #[test]
    fn quality_round_trips() {
        let (mut prefs, _store) = prefs();
        prefs.set_quality(AudioQuality::Lossless);
        assert_eq!(prefs.quality(), Some(AudioQuality::Lossless));
    }

    #[test]
    fn last_played_needs_both_keys() {
        let (mut prefs, store) = prefs();
        let mut raw = store.clone();

        assert_eq!(prefs.last_played(), None);
        raw.set(PREF_LAST_TRACK_ID, "track-9").unwrap();
        assert_eq!(prefs.last_played(), None);

        prefs.set_last_played(&TrackId::new("track-9"), 42);
        assert_eq!(prefs.last_played(), Some((TrackId::new("track-9"), 42)));
    }

    #[test]
    fn resume_offset_requires_enabled_matching_and_nonzero() {
        let (mut prefs, _store) = prefs();
        let id = TrackId::new("track-1");

        prefs.set_last_played(&id, 90);
        assert_eq!(prefs.resume_offset_for(&id), None);

        prefs.set_resume_enabled(true);
        assert_eq!(prefs.resume_offset_for(&id), Some(Duration::from_secs(90)));
        assert_eq!(prefs.resume_offset_for(&TrackId::new("track-2")), None);

        prefs.set_last_played(&id, 0);
        assert_eq!(prefs.resume_offset_for(&id), None);
    }

    #[test]
    fn failing_store_reads_as_unset() {
        let mut prefs = Preferences::new(Box::new(MemoryStore::failing()));
        assert!(!prefs.resume_enabled());
        assert_eq!(prefs.volume(), None);
        assert_eq!(prefs.last_played(), None);
        prefs.set_volume(80);
    }
}
