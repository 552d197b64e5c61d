//! Core types for playback control

use chorus_core::AudioQuality;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Track advancement policy.
///
/// A single mode axis: selecting one replaces the previous one. The mode
/// only decides which index `next_track`/`prev_track` move to; it never
/// reorders the queue itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Advance through the queue in order, wrapping at the ends
    #[default]
    Sequential,

    /// Jump to a uniformly random queue position
    Shuffle,

    /// Same traversal as sequential, kept distinct for display
    RepeatAll,

    /// Restart the current track, never changing position
    RepeatOne,
}

impl PlayMode {
    /// Human-readable name, used in mode-change notifications
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Shuffle => "shuffle",
            Self::RepeatAll => "repeat all",
            Self::RepeatOne => "repeat one",
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Configuration for the playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Volume used when no persisted volume exists (0-100, default: 50)
    pub default_volume: u8,

    /// Stream quality requested from the resolver (default: exhigh)
    pub quality: AudioQuality,

    /// Maximum recent-play entries kept locally (default: 200)
    pub recent_limit: usize,

    /// How often the level sampler publishes a reading (default: 16ms)
    pub sampler_period: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: 50,
            quality: AudioQuality::default(),
            recent_limit: 200,
            sampler_period: Duration::from_millis(16),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.default_volume, 50);
        assert_eq!(config.quality, AudioQuality::ExHigh);
        assert_eq!(config.recent_limit, 200);
        assert_eq!(config.sampler_period, Duration::from_millis(16));
    }

    #[test]
    fn mode_labels() {
        assert_eq!(PlayMode::Sequential.label(), "sequential");
        assert_eq!(PlayMode::Shuffle.label(), "shuffle");
        assert_eq!(PlayMode::RepeatAll.label(), "repeat all");
        assert_eq!(PlayMode::RepeatOne.label(), "repeat one");
    }

    #[test]
    fn default_mode_is_sequential() {
        assert_eq!(PlayMode::default(), PlayMode::Sequential);
    }
}
