//! Error types for playback operations

use thiserror::Error;

/// Errors that can occur during playback operations
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The queue is empty, nothing to play
    #[error("Queue is empty")]
    QueueEmpty,

    /// The media output rejected an operation
    #[error("Media output error: {0}")]
    Output(String),

    /// Preference storage failed
    #[error("Preference storage error: {0}")]
    Preferences(String),

    /// The remote service call failed
    #[error("Remote service error: {0}")]
    Remote(String),

    /// Queue index out of bounds
    #[error("Queue index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
