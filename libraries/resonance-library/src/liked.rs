//! Liked songs

use resonance_core::{Track, TrackId};
use tracing::debug;

/// Liked tracks, in the order they were liked
///
/// Full records are kept so the liked-songs view can be rendered even for
/// tracks that are no longer in the queue or catalog.
#[derive(Debug, Clone, Default)]
pub struct LikedSet {
    tracks: Vec<Track>,
}

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of a track, returning whether it is now liked
    pub fn toggle(&mut self, track: &Track) -> bool {
        if self.unlike(track.id()) {
            false
        } else {
            self.like(track.clone());
            true
        }
    }

    /// Add a track; returns `false` if it was already liked
    pub fn like(&mut self, track: Track) -> bool {
        if self.is_liked(track.id()) {
            return false;
        }
        debug!(track_id = %track.id(), "Liked track");
        self.tracks.push(track);
        true
    }

    /// Remove a track; returns `false` if it was not liked
    pub fn unlike(&mut self, track_id: &TrackId) -> bool {
        let Some(index) = self.tracks.iter().position(|t| t.id() == track_id) else {
            return false;
        };
        self.tracks.remove(index);
        debug!(track_id = %track_id, "Unliked track");
        true
    }

    pub fn is_liked(&self, track_id: &TrackId) -> bool {
        self.tracks.iter().any(|t| t.id() == track_id)
    }

    /// Materialized liked-songs list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
