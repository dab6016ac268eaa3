/// ID types for Resonance entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Track identifier
///
/// Catalog ids are assigned by whoever publishes the catalog; only tracks
/// added by hand get generated ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID
    pub fn generate() -> Self {
        Self(format!("track-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a new playlist ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    ///
    /// Random rather than clock based: two playlists created within the
    /// same tick still get distinct ids.
    pub fn generate() -> Self {
        Self(format!("playlist-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Artist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(String);

impl ArtistId {
    /// Create a new artist ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random artist ID
    pub fn generate() -> Self {
        Self(format!("artist-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArtistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_id_generation_creates_unique_ids() {
        let ids: std::collections::HashSet<_> =
            (0..1000).map(|_| PlaylistId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_playlist_ids_are_prefixed() {
        let id = PlaylistId::generate();
        assert!(id.as_str().starts_with("playlist-"));
    }

    #[test]
    fn generated_track_and_artist_ids_are_prefixed() {
        assert!(TrackId::generate().as_str().starts_with("track-"));
        assert!(ArtistId::generate().as_str().starts_with("artist-"));
        assert_ne!(TrackId::generate(), TrackId::generate());
    }

    #[test]
    fn track_id_from_string() {
        let id = TrackId::new("track-123");
        assert_eq!(id.as_str(), "track-123");
        assert_eq!(TrackId::from("track-123"), id);
    }

    #[test]
    fn playlist_id_display() {
        let id = PlaylistId::new("playlist-456");
        assert_eq!(format!("{}", id), "playlist-456");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&TrackId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
