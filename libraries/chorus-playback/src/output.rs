//! Platform-agnostic media output trait
//!
//! Abstracts the playing media stream for different backends (a desktop
//! audio pipeline, a webview media element, a test fake). The controller
//! drives it through commands and hears back through `MediaSignal`s the
//! backend delivers to `PlaybackManager::handle_signal`.

use crate::error::Result;
use crate::sampler::LevelTap;
use std::time::Duration;

/// Platform-agnostic media output
///
/// Implementors own the actual audio stream: load a URL, start and stop
/// it, report position and duration. Metadata (duration) is unknown
/// between `load` and the backend's `MetadataLoaded` signal, which is
/// what the controller keys its deferred resume-seek on.
pub trait MediaOutput: Send {
    /// Load a new stream URL, replacing whatever was loaded
    ///
    /// Resets position to zero and forgets the previous duration.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or restart playback of the loaded stream
    ///
    /// Fails when nothing is loaded or the platform refuses playback.
    fn play(&mut self) -> Result<()>;

    /// Stop playback, keeping the stream and position
    fn pause(&mut self);

    /// Jump to a position
    ///
    /// The position is passed through as given; clamping out-of-range
    /// values is the backend's business.
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration of the loaded stream, `None` until metadata is known
    fn duration(&self) -> Option<Duration>;

    /// Set the normalized gain (0.0 silent, 1.0 unity)
    fn set_gain(&mut self, gain: f32);

    /// Attach the level tap the backend should feed decoded samples into
    fn attach_tap(&mut self, tap: LevelTap) -> Result<()>;
}

/// Signals the backend delivers back to the controller
///
/// The analog of the media element's event stream, reduced to what the
/// controller acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSignal {
    /// Stream metadata became available
    MetadataLoaded {
        /// Total duration of the loaded stream
        duration: Duration,
    },

    /// Playback position advanced
    TimeUpdate {
        /// Current position
        position: Duration,
    },

    /// The stream played to its end
    Ended,
}

/// Fake media output for testing
///
/// Records every interaction in shared state so tests can inspect what
/// the controller did after handing the output over.
#[cfg(test)]
pub struct FakeOutput {
    state: std::sync::Arc<std::sync::Mutex<FakeOutputState>>,
}

/// Observable state of a `FakeOutput`
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeOutputState {
    /// URLs loaded, in order
    pub loaded: Vec<String>,
    /// Whether play was the last transport command
    pub playing: bool,
    /// Seek positions requested, in order
    pub seeks: Vec<Duration>,
    /// Current position
    pub position: Duration,
    /// Known duration, `None` until metadata "arrives"
    pub duration: Option<Duration>,
    /// Duration to report as soon as a load happens
    pub duration_on_load: Option<Duration>,
    /// Last gain applied
    pub gain: f32,
    /// Number of play() calls
    pub play_calls: usize,
    /// Make the next play() calls fail
    pub fail_play: bool,
    /// Whether a level tap was attached
    pub tap_attached: bool,
}

#[cfg(test)]
impl FakeOutput {
    /// Create a fake output plus a handle onto its recorded state
    pub fn new() -> (Self, std::sync::Arc<std::sync::Mutex<FakeOutputState>>) {
        let state = std::sync::Arc::new(std::sync::Mutex::new(FakeOutputState::default()));
        (
            Self {
                state: std::sync::Arc::clone(&state),
            },
            state,
        )
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeOutputState> {
        self.state.lock().expect("fake output state poisoned")
    }
}

#[cfg(test)]
impl MediaOutput for FakeOutput {
    fn load(&mut self, url: &str) -> Result<()> {
        let mut state = self.state();
        state.loaded.push(url.to_string());
        state.position = Duration::ZERO;
        state.duration = state.duration_on_load;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state();
        state.play_calls += 1;
        if state.fail_play {
            return Err(crate::error::PlaybackError::Output(
                "playback refused".to_string(),
            ));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state().playing = false;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let mut state = self.state();
        state.seeks.push(position);
        state.position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state().duration
    }

    fn set_gain(&mut self, gain: f32) {
        self.state().gain = gain;
    }

    fn attach_tap(&mut self, _tap: LevelTap) -> Result<()> {
        self.state().tap_attached = true;
        Ok(())
    }
}
