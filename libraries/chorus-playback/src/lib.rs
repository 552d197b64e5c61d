//! Chorus Player - Playback Control
//!
//! Platform-agnostic playback control for Chorus Player.
//!
//! This crate provides:
//! - Queue with a "play next" insert cursor and id-based dedupe
//! - Playback modes (sequential, shuffle, repeat all, repeat one)
//! - Volume control (linear, 0-100, persisted)
//! - Resume-from-last-position across restarts
//! - Recent plays (newest first, bounded)
//! - Lazy stream URL resolution through a remote service port
//! - Audio level sampling for visualization
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `chorus-playback` is completely platform-agnostic:
//! - No dependency on any audio backend
//! - No dependency on any HTTP client
//! - No dependency on chorus-storage (preference files)
//!
//! The embedder injects three ports into [`PlaybackManager`]: a
//! [`MediaOutput`] that owns the actual stream, a [`PreferenceStore`]
//! for persisted player state and a [`PlaybackRemote`] for URL
//! resolution and play reporting. Output backends deliver
//! [`MediaSignal`]s back; the UI drains [`PlaybackEvent`]s.
//!
//! # Example: Queue Editing
//!
//! ```rust
//! use chorus_core::{Track, TrackId};
//! use chorus_playback::Queue;
//!
//! let mut queue = Queue::with_tracks(
//!     vec![
//!         Track::new(TrackId::new("a"), "First"),
//!         Track::new(TrackId::new("b"), "Second"),
//!     ],
//!     0,
//! );
//!
//! // "Play next" inserts land right behind the current track.
//! queue.insert_next(Track::new(TrackId::new("c"), "Next up"));
//!
//! assert_eq!(queue.len(), 3);
//! assert_eq!(queue.tracks()[1].id, TrackId::new("c"));
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use chorus_core::{AudioQuality, Track, TrackId};
//! use chorus_playback::{
//!     LevelTap, MediaOutput, PlaybackManager, PlaybackRemote, PlayerConfig,
//!     PreferenceStore, Queue, Result,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // Implement MediaOutput for your audio backend
//! struct MyOutput;
//!
//! impl MediaOutput for MyOutput {
//!     fn load(&mut self, _url: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Option<Duration> { None }
//!     fn set_gain(&mut self, _gain: f32) {}
//!     fn attach_tap(&mut self, _tap: LevelTap) -> Result<()> { Ok(()) }
//! }
//!
//! struct MyStore;
//!
//! impl PreferenceStore for MyStore {
//!     fn get(&self, _key: &str) -> Result<Option<String>> { Ok(None) }
//!     fn set(&mut self, _key: &str, _value: &str) -> Result<()> { Ok(()) }
//!     fn remove(&mut self, _key: &str) -> Result<()> { Ok(()) }
//! }
//!
//! struct MyRemote;
//!
//! #[async_trait]
//! impl PlaybackRemote for MyRemote {
//!     async fn resolve_url(
//!         &self,
//!         _track_id: &TrackId,
//!         _quality: AudioQuality,
//!     ) -> Result<Option<String>> {
//!         Ok(None)
//!     }
//!
//!     async fn report_played(&self, _track_id: &TrackId) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<()> {
//! let mut queue = Queue::new();
//! queue.append(Track::new(TrackId::new("track-1"), "My Song"));
//!
//! let mut manager = PlaybackManager::new(
//!     queue,
//!     Box::new(MyStore),
//!     Arc::new(MyRemote),
//!     Box::new(MyOutput),
//!     PlayerConfig::default(),
//! );
//!
//! manager.start().await?;
//! manager.set_volume(80);
//! manager.toggle_play().await?;
//!
//! for event in manager.drain_events() {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod history;
mod manager;
mod output;
pub mod prefs;
mod queue;
mod remote;
mod sampler;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::RecentPlays;
pub use manager::PlaybackManager;
pub use output::{MediaOutput, MediaSignal};
pub use prefs::{PreferenceStore, Preferences};
pub use queue::Queue;
pub use remote::PlaybackRemote;
pub use sampler::{LevelSampler, LevelTap};
pub use types::{PlayMode, PlayerConfig};
