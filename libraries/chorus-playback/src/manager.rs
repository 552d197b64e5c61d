//! Playback manager - core orchestration
//!
//! Coordinates queue, recent plays, volume, playback modes, resume
//! persistence and the level sampler over an injected media output.
//! The embedder constructs it with its platform ports, forwards
//! `MediaSignal`s from the output backend and drains `PlaybackEvent`s
//! for whatever surface renders them.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    history::RecentPlays,
    output::{MediaOutput, MediaSignal},
    prefs::{PreferenceStore, Preferences},
    queue::Queue,
    remote::PlaybackRemote,
    sampler::{LevelSampler, LevelTap},
    types::{PlayMode, PlayerConfig},
    volume::Volume,
};
use chorus_core::{AudioQuality, Track, TrackId};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Central playback control
///
/// Owns all playback state:
/// - Queue with the play-next insert cursor
/// - Recent plays (newest first, bounded)
/// - Volume (0-100, persisted)
/// - Playback modes (sequential, shuffle, repeat all, repeat one)
/// - Resume-from-last-position bookkeeping
/// - The audio level sampler feed
///
/// All mutation goes through `&mut self`; the embedder serializes
/// access and pumps output signals through [`handle_signal`].
///
/// [`handle_signal`]: PlaybackManager::handle_signal
pub struct PlaybackManager {
    // Queue and history
    queue: Queue,
    recent: RecentPlays,

    // Injected ports
    prefs: Preferences,
    remote: Arc<dyn PlaybackRemote>,
    output: Box<dyn MediaOutput>,

    // Transport state
    playing: bool,
    mode: PlayMode,
    volume: Volume,
    quality: AudioQuality,

    // Which track the output currently holds, if any
    loaded_track: Option<TrackId>,

    // Armed resume offset, applied once metadata is in
    pending_resume: Option<Duration>,

    // Level sampling, spawned lazily on first play
    sampler: Option<LevelSampler>,

    config: PlayerConfig,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create a playback manager over the given ports
    ///
    /// Volume and quality come back from the preference store when
    /// previously persisted, falling back to the config defaults. The
    /// restored volume is applied to the output right away.
    pub fn new(
        queue: Queue,
        store: Box<dyn PreferenceStore>,
        remote: Arc<dyn PlaybackRemote>,
        mut output: Box<dyn MediaOutput>,
        config: PlayerConfig,
    ) -> Self {
        let prefs = Preferences::new(store);
        let volume = Volume::new(prefs.volume().unwrap_or(config.default_volume));
        let quality = prefs.quality().unwrap_or(config.quality);
        output.set_gain(volume.gain());

        Self {
            queue,
            recent: RecentPlays::new(config.recent_limit),
            prefs,
            remote,
            output,
            playing: false,
            mode: PlayMode::default(),
            volume,
            quality,
            loaded_track: None,
            pending_resume: None,
            sampler: None,
            config,
            pending_events: Vec::new(),
        }
    }

    /// Prepare the current track and honor the autoplay preference
    ///
    /// Call once after construction. Loads the current track (arming
    /// any resume offset) and starts playback when autoplay is on.
    /// Does nothing on an empty queue.
    pub async fn start(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        self.load_current().await?;
        if self.prefs.autoplay() {
            self.play().await?;
        }
        Ok(())
    }

    // ===== Playback Control =====

    /// Start or resume playback of the current track
    ///
    /// Loads the current track first when nothing was ever loaded. When
    /// stream metadata is not in yet, the actual output start (and any
    /// armed resume seek) waits for the `MetadataLoaded` signal; the
    /// playing flag flips immediately either way. Every call records
    /// the track in recent plays and reports it to the remote service
    /// in the background.
    pub async fn play(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if self.loaded_track.is_none() {
            self.load_current().await?;
        }
        self.ensure_sampler();

        if self.pending_resume.is_none() {
            if let Some(id) = self.queue.current_track().map(|t| t.id.clone()) {
                self.pending_resume = self.prefs.resume_offset_for(&id);
            }
        }

        if self.output.duration().is_some() {
            if let Some(offset) = self.pending_resume.take() {
                if let Err(e) = self.output.seek(offset) {
                    warn!(error = %e, "Resume seek failed");
                }
            }
            self.start_output();
        }
        // Without metadata the seek and start run on MetadataLoaded.

        self.playing = true;
        self.emit_state_changed();

        if let Some(track) = self.queue.current_track().cloned() {
            self.recent.add(track.clone());
            self.report_play(track.id);
        }

        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.output.pause();
        self.playing = false;
        self.emit_state_changed();
    }

    /// Toggle between playing and paused
    pub async fn toggle_play(&mut self) -> Result<()> {
        if self.playing {
            self.pause();
            Ok(())
        } else {
            self.play().await
        }
    }

    /// Jump to a position in the current track
    ///
    /// The position is handed to the output as given; out-of-range
    /// values are the backend's problem.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.output.seek(position)
    }

    // ===== Track Navigation =====

    /// Advance to the next track according to the playback mode
    pub async fn next_track(&mut self) -> Result<()> {
        self.advance(true).await
    }

    /// Go back to the previous track according to the playback mode
    pub async fn previous_track(&mut self) -> Result<()> {
        self.advance(false).await
    }

    /// Select a queue index and play it
    pub async fn play_index(&mut self, index: usize) -> Result<()> {
        let previous = self.queue.current_track().map(|t| t.id.clone());
        self.queue.set_current_index(index)?;
        self.finish_switch(previous).await
    }

    async fn advance(&mut self, forward: bool) -> Result<()> {
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        let previous = self.queue.current_track().map(|t| t.id.clone());
        let len = self.queue.len();

        match self.mode {
            PlayMode::RepeatOne => {
                // Same track from the top, index untouched.
                if let Err(e) = self.output.seek(Duration::ZERO) {
                    warn!(error = %e, "Restart seek failed");
                }
            }
            PlayMode::Shuffle => {
                let index = rand::thread_rng().gen_range(0..len);
                self.queue.set_current_index(index)?;
            }
            PlayMode::Sequential | PlayMode::RepeatAll => {
                let current = self.queue.current_index();
                let index = if forward {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                };
                self.queue.set_current_index(index)?;
            }
        }

        self.finish_switch(previous).await
    }

    /// Common tail of every track switch: reload, play, reset the
    /// insert cursor behind the new current track.
    async fn finish_switch(&mut self, previous: Option<TrackId>) -> Result<()> {
        self.load_current().await?;
        self.play().await?;
        self.queue.reset_insert_cursor();

        if let Some(track_id) = self.queue.current_track().map(|t| t.id.clone()) {
            if previous.as_ref() != Some(&track_id) {
                self.emit_track_changed(track_id, previous);
            }
        }
        Ok(())
    }

    /// Load the current track into the output
    ///
    /// Resolves a stream URL through the remote service when the track
    /// has none yet and writes it back onto the queue entry. Resolution
    /// failures are logged and leave the output untouched, so a later
    /// play attempt resolves again. Does nothing when no current track
    /// exists.
    pub async fn load_current(&mut self) -> Result<()> {
        let Some(track) = self.queue.current_track().cloned() else {
            return Ok(());
        };

        if track.url.is_none() {
            match self.remote.resolve_url(&track.id, self.quality).await {
                Ok(Some(url)) => {
                    self.queue.set_track_url(&track.id, url);
                }
                Ok(None) => {
                    warn!(track_id = %track.id, "No playable URL for track");
                    return Ok(());
                }
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "URL resolution failed");
                    return Ok(());
                }
            }
        }

        // Re-read: the current track may have moved while resolving.
        let Some((track_id, url)) = self
            .queue
            .current_track()
            .and_then(|t| t.url.clone().map(|url| (t.id.clone(), url)))
        else {
            return Ok(());
        };

        if let Err(e) = self.output.load(&url) {
            warn!(track_id = %track_id, error = %e, "Loading stream failed");
            self.emit_error(e.to_string());
            return Ok(());
        }

        self.loaded_track = Some(track_id.clone());
        self.pending_resume = self.prefs.resume_offset_for(&track_id);
        Ok(())
    }

    // ===== Output Signals =====

    /// Feed a signal from the output backend
    ///
    /// `MetadataLoaded` applies any armed resume seek and starts the
    /// output when playback is already intended. `TimeUpdate` persists
    /// the position for resume and emits a position event. `Ended`
    /// advances per the playback mode.
    pub async fn handle_signal(&mut self, signal: MediaSignal) {
        match signal {
            MediaSignal::MetadataLoaded { duration } => {
                if let Some(offset) = self.pending_resume.take() {
                    if let Err(e) = self.output.seek(offset) {
                        warn!(error = %e, "Resume seek failed");
                    }
                }
                if self.playing {
                    self.start_output();
                }
                let position = self.output.position();
                self.emit_position_update(position, Some(duration));
            }
            MediaSignal::TimeUpdate { position } => {
                if let Some(id) = self.queue.current_track().map(|t| t.id.clone()) {
                    self.prefs.set_last_played(&id, position.as_secs());
                }
                let duration = self.output.duration();
                self.emit_position_update(position, duration);
            }
            MediaSignal::Ended => {
                if let Err(e) = self.next_track().await {
                    debug!(error = %e, "Advance after track end failed");
                }
            }
        }
    }

    // ===== Queue Management =====

    /// Append a track, or select it when already queued
    pub fn add_track(&mut self, track: Track) {
        self.queue.append(track);
        self.emit_queue_changed();
    }

    /// Append a batch of tracks, stopping at the first already queued
    pub fn add_tracks(&mut self, tracks: Vec<Track>) {
        self.queue.append_all(tracks);
        self.emit_queue_changed();
    }

    /// Insert a track into the play-next slot
    pub fn insert_next(&mut self, track: Track) {
        self.queue.insert_next(track);
        self.emit_queue_changed();
    }

    /// Remove a track from the queue by id
    pub fn remove_track(&mut self, track_id: &TrackId) -> Option<Track> {
        let removed = self.queue.remove(track_id);
        if removed.is_some() {
            self.emit_queue_changed();
        }
        removed
    }

    /// Replace the whole queue, starting over from the first track
    pub fn replace_queue(&mut self, tracks: Vec<Track>) {
        self.queue.replace(tracks);
        self.emit_queue_changed();
    }

    /// Clear the queue
    ///
    /// An already loaded stream keeps playing; only the queue empties.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Move the play-next cursor back behind the current track
    pub fn reset_insert_cursor(&mut self) {
        self.queue.reset_insert_cursor();
    }

    // ===== Mode, Volume, Quality =====

    /// Set the playback mode
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.emit_mode_changed();
    }

    /// Current playback mode
    pub fn play_mode(&self) -> PlayMode {
        self.mode
    }

    /// Set volume (0-100), persist it and scale the output gain
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.prefs.set_volume(self.volume.level());
        self.output.set_gain(self.volume.gain());
        self.emit_volume_changed();
    }

    /// Current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Set the preferred stream quality and persist it
    ///
    /// Applies to the next URL resolution; the loaded stream is not
    /// reloaded.
    pub fn set_quality(&mut self, quality: AudioQuality) {
        self.quality = quality;
        self.prefs.set_quality(quality);
    }

    /// Preferred stream quality
    pub fn quality(&self) -> AudioQuality {
        self.quality
    }

    /// Enable or disable resuming from the persisted position
    pub fn set_resume_enabled(&mut self, enabled: bool) {
        self.prefs.set_resume_enabled(enabled);
    }

    /// Enable or disable autoplay on startup
    pub fn set_autoplay(&mut self, enabled: bool) {
        self.prefs.set_autoplay(enabled);
    }

    // ===== State Queries =====

    /// Whether playback is intended to be running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Currently selected track, if the index points at one
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_track()
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        self.output.position()
    }

    /// Duration of the loaded stream, `None` until metadata is known
    pub fn duration(&self) -> Option<Duration> {
        self.output.duration()
    }

    /// The queue, for read-only inspection
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Locally recorded recent plays, newest first
    pub fn recent_plays(&self) -> Vec<&Track> {
        self.recent.all()
    }

    /// Forget all locally recorded recent plays
    pub fn clear_recent_plays(&mut self) {
        self.recent.clear();
    }

    /// Latest audio level in 1.0..=1.15, 1.0 before playback starts
    pub fn level(&self) -> f32 {
        self.sampler.as_ref().map_or(1.0, LevelSampler::level)
    }

    // ===== Shutdown =====

    /// Persist final state and stop the level sampler
    pub async fn shutdown(&mut self) {
        let position_secs = self.output.position().as_secs();
        if let Some(id) = self.queue.current_track().map(|t| t.id.clone()) {
            self.prefs.set_last_played(&id, position_secs);
        }
        if let Some(sampler) = self.sampler.take() {
            sampler.stop().await;
        }
    }

    // ===== Internals =====

    fn ensure_sampler(&mut self) {
        if self.sampler.is_some() {
            return;
        }
        let tap = LevelTap::new();
        if let Err(e) = self.output.attach_tap(tap.clone()) {
            warn!(error = %e, "Could not attach level tap");
            return;
        }
        self.sampler = Some(LevelSampler::spawn(tap, self.config.sampler_period));
    }

    /// Start the output, downgrading refusal to an error event
    fn start_output(&mut self) {
        if let Err(e) = self.output.play() {
            warn!(error = %e, "Output refused to start");
            self.emit_error(e.to_string());
        }
    }

    /// Report a play to the remote service in the background
    fn report_play(&self, track_id: TrackId) {
        let remote = Arc::clone(&self.remote);
        tokio::spawn(async move {
            if let Err(e) = remote.report_played(&track_id).await {
                debug!(track_id = %track_id, error = %e, "Recent-play report failed");
            }
        });
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain. The embedder
    /// should call this periodically to synchronize its UI.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Emit a state changed event
    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            playing: self.playing,
        });
    }

    /// Emit a track changed event
    fn emit_track_changed(&mut self, track_id: TrackId, previous_track_id: Option<TrackId>) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    /// Emit a position update event
    fn emit_position_update(&mut self, position: Duration, duration: Option<Duration>) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: position.as_secs(),
            duration_secs: duration.map(|d| d.as_secs()),
        });
    }

    /// Emit a mode changed event
    fn emit_mode_changed(&mut self) {
        self.pending_events
            .push(PlaybackEvent::ModeChanged { mode: self.mode });
    }

    /// Emit a volume changed event
    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    /// Emit a queue changed event
    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Emit an error event
    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}
