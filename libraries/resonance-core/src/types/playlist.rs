/// Playlist domain types
use super::ids::{PlaylistId, TrackId};
use super::track::Track;
use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist
///
/// Holds full track records in insertion order, deduplicated by track id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new empty playlist with a generated id
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_id(PlaylistId::generate(), name)
    }

    /// Create an empty playlist with a specific ID
    pub fn with_id(id: PlaylistId, name: impl Into<String>) -> Result<Self> {
        let name = validate_name(name.into())?;
        Ok(Self {
            id,
            name,
            description: None,
            created_at: Utc::now(),
            tracks: Vec::new(),
        })
    }

    /// Append a track unless one with the same id is already present
    ///
    /// Returns `true` if the track was appended.
    pub fn insert(&mut self, track: Track) -> bool {
        if self.contains(track.id()) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove a track by id, returning it if it was present
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t.id() == track_id)?;
        Some(self.tracks.remove(index))
    }

    /// Rename the playlist
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    /// Check whether a track id is in the playlist
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.tracks.iter().any(|t| t.id() == track_id)
    }

    /// Tracks in playlist order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of the nominal track durations in seconds
    pub fn total_duration_secs(&self) -> u64 {
        self.tracks
            .iter()
            .map(|t| u64::from(t.duration_secs()))
            .sum()
    }
}

fn validate_name(name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("playlist name must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreateTrack;

    fn track(id: &str, duration_secs: u32) -> Track {
        CreateTrack {
            id: id.to_string(),
            title: format!("Track {}", id),
            artist: "Test Artist".to_string(),
            audio_src: format!("/music/{}.mp3", id),
            duration_secs,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn new_playlist_is_empty() {
        let playlist = Playlist::new("Favorites").unwrap();
        assert!(playlist.is_empty());
        assert_eq!(playlist.name, "Favorites");
        assert!(playlist.id.as_str().starts_with("playlist-"));
    }

    #[test]
    fn insert_deduplicates_by_id() {
        let mut playlist = Playlist::new("Favorites").unwrap();
        assert!(playlist.insert(track("1", 100)));
        assert!(!playlist.insert(track("1", 100)));
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn remove_returns_track() {
        let mut playlist = Playlist::new("Mix").unwrap();
        playlist.insert(track("1", 100));
        playlist.insert(track("2", 100));

        let removed = playlist.remove(&TrackId::new("1")).unwrap();
        assert_eq!(removed.id().as_str(), "1");
        assert!(playlist.remove(&TrackId::new("1")).is_none());
        assert_eq!(playlist.tracks()[0].id().as_str(), "2");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(Playlist::new("   ").is_err());

        let mut playlist = Playlist::new("Road Trip").unwrap();
        assert!(playlist.rename("").is_err());
        assert_eq!(playlist.name, "Road Trip");

        playlist.rename("  Late Night  ").unwrap();
        assert_eq!(playlist.name, "Late Night");
    }

    #[test]
    fn total_duration_sums_tracks() {
        let mut playlist = Playlist::new("Mix").unwrap();
        playlist.insert(track("1", 261));
        playlist.insert(track("2", 320));
        assert_eq!(playlist.total_duration_secs(), 581);
    }
}
