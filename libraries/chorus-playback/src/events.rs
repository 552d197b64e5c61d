//! Playback Events
//!
//! Event-based communication for UI synchronization during playback.
//! The controller queues events as it works; the embedder polls them off
//! with `PlaybackManager::drain_events` and forwards them to whatever
//! surface renders them. Events are emitted at key points:
//! - Transport changes (play/pause)
//! - Track changes (skips, queue jumps, natural advancement)
//! - Position updates (per time tick from the output)
//! - Queue, mode and volume changes

use chorus_core::TrackId;
use serde::{Deserialize, Serialize};

use crate::types::PlayMode;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// Whether playback is intended to be running
        playing: bool,
    },

    /// The current track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position update (per time tick from the output)
    PositionUpdate {
        /// Current playback position in whole seconds
        position_secs: u64,
        /// Total track duration, when metadata is known
        duration_secs: Option<u64>,
    },

    /// Playback mode changed
    ModeChanged {
        /// The new playback mode
        mode: PlayMode,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Queue changed (tracks added/removed/replaced)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_variant_tag() {
        let event = PlaybackEvent::StateChanged { playing: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"StateChanged":{"playing":true}}"#);
    }

    #[test]
    fn test_track_changed_round_trips() {
        let event = PlaybackEvent::TrackChanged {
            track_id: TrackId::new("track-2"),
            previous_track_id: Some(TrackId::new("track-1")),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: PlaybackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_position_update_carries_optional_duration() {
        let event = PlaybackEvent::PositionUpdate {
            position_secs: 42,
            duration_secs: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""duration_secs":null"#));
    }
}
