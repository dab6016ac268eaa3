//! Error types for playback control

use thiserror::Error;

/// Errors reported by a media output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Output refused to start, e.g. autoplay policy without a user gesture
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    /// Source could not be fetched or decoded
    #[error("Source failed to load: {0}")]
    Load(String),

    /// Anything else the host reports
    #[error("Media output error: {0}")]
    Other(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Media output refused or failed
    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
