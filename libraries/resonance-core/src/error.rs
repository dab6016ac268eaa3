/// Core error types for Resonance
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Resonance
#[derive(Error, Debug)]
pub enum CoreError {
    /// Track not found in the collection the caller addressed
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Invalid input, rejected before any mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TrackNotFound(_) | Self::PlaylistNotFound(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
