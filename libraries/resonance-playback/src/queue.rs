//! Play queue
//!
//! Ordered list of tracks that playback advances through. Entries are unique
//! by track id; navigation wraps around at both ends.

use resonance_core::{Track, TrackId};
use serde::Serialize;
use std::collections::HashSet;

/// Summary counts over the queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Queued tracks
    pub songs: usize,
    /// Distinct artist names
    pub artists: usize,
    /// Distinct album names
    pub albums: usize,
}

/// Ordered, id-deduplicated play queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Build a queue from tracks, keeping the first occurrence of each id
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut queue = Self::new();
        queue.replace(tracks);
        queue
    }

    /// Append a track unless its id is already queued
    ///
    /// Returns `true` if the track was appended.
    pub fn enqueue(&mut self, track: Track) -> bool {
        if self.contains(track.id()) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Replace the whole queue (catalog seeding)
    pub fn replace(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.clear();
        for track in tracks {
            self.enqueue(track);
        }
    }

    /// Remove track by id
    ///
    /// Returns the removed track if it was queued
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let index = self.position(track_id)?;
        Some(self.tracks.remove(index))
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Index of a track in the queue
    pub fn position(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id() == track_id)
    }

    /// Check whether a track id is queued
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.position(track_id).is_some()
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Look up a queued track by id
    pub fn find(&self, track_id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == track_id)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Count songs plus the distinct artists and albums among them
    ///
    /// Artists and albums are compared by display name, so two albums that
    /// share a title count once.
    pub fn stats(&self) -> QueueStats {
        let artists: HashSet<&str> = self.tracks.iter().map(|t| t.artist()).collect();
        let albums: HashSet<&str> = self.tracks.iter().map(|t| t.album()).collect();
        QueueStats {
            songs: self.tracks.len(),
            artists: artists.len(),
            albums: albums.len(),
        }
    }

    /// Track after `current`, wrapping to the start
    ///
    /// A `current` that is not queued is treated as sitting before the
    /// first entry, so the first track is returned.
    pub fn next_after(&self, current: &TrackId) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let index = match self.position(current) {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.tracks.get(index)
    }

    /// Track before `current`, wrapping to the end
    ///
    /// A `current` that is not queued yields the last track.
    pub fn previous_before(&self, current: &TrackId) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let index = match self.position(current) {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        self.tracks.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonance_core::CreateTrack;

    fn create_test_track(id: &str, title: &str) -> Track {
        CreateTrack {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            duration_secs: 180,
            audio_src: format!("/music/{}.mp3", id),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn three_track_queue() -> Queue {
        Queue::from_tracks(vec![
            create_test_track("1", "Track 1"),
            create_test_track("2", "Track 2"),
            create_test_track("3", "Track 3"),
        ])
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn enqueue_is_idempotent_by_id() {
        let mut queue = Queue::new();
        assert!(queue.enqueue(create_test_track("1", "Track 1")));
        assert!(!queue.enqueue(create_test_track("1", "Renamed")));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(0).unwrap().title(), "Track 1");
    }

    #[test]
    fn replace_deduplicates_keeping_first() {
        let mut queue = three_track_queue();
        queue.replace(vec![
            create_test_track("9", "A"),
            create_test_track("8", "B"),
            create_test_track("9", "C"),
        ]);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(0).unwrap().title(), "A");
        assert_eq!(queue.get(1).unwrap().id().as_str(), "8");
    }

    #[test]
    fn remove_from_queue() {
        let mut queue = three_track_queue();

        let removed = queue.remove(&TrackId::new("2")).unwrap();
        assert_eq!(removed.id().as_str(), "2");
        assert_eq!(queue.len(), 2);

        // Verify order maintained
        assert_eq!(queue.get(0).unwrap().id().as_str(), "1");
        assert_eq!(queue.get(1).unwrap().id().as_str(), "3");

        assert!(queue.remove(&TrackId::new("2")).is_none());
    }

    #[test]
    fn next_wraps_to_start() {
        let queue = three_track_queue();
        let next = queue.next_after(&TrackId::new("3")).unwrap();
        assert_eq!(next.id().as_str(), "1");

        let next = queue.next_after(&TrackId::new("1")).unwrap();
        assert_eq!(next.id().as_str(), "2");
    }

    #[test]
    fn previous_wraps_to_end() {
        let queue = three_track_queue();
        let prev = queue.previous_before(&TrackId::new("1")).unwrap();
        assert_eq!(prev.id().as_str(), "3");

        let prev = queue.previous_before(&TrackId::new("3")).unwrap();
        assert_eq!(prev.id().as_str(), "2");
    }

    #[test]
    fn navigation_from_unqueued_track() {
        let queue = three_track_queue();
        let stranger = TrackId::new("x");
        assert_eq!(queue.next_after(&stranger).unwrap().id().as_str(), "1");
        assert_eq!(queue.previous_before(&stranger).unwrap().id().as_str(), "3");
    }

    #[test]
    fn navigation_on_empty_queue() {
        let queue = Queue::new();
        assert!(queue.next_after(&TrackId::new("1")).is_none());
        assert!(queue.previous_before(&TrackId::new("1")).is_none());
    }

    #[test]
    fn single_track_wraps_to_itself() {
        let queue = Queue::from_tracks(vec![create_test_track("1", "Only")]);
        assert_eq!(queue.next_after(&TrackId::new("1")).unwrap().id().as_str(), "1");
        assert_eq!(
            queue.previous_before(&TrackId::new("1")).unwrap().id().as_str(),
            "1"
        );
    }

    #[test]
    fn stats_count_distinct_artists_and_albums() {
        let mut queue = three_track_queue();
        assert_eq!(
            queue.stats(),
            QueueStats {
                songs: 3,
                artists: 1,
                albums: 1
            }
        );

        queue.enqueue(
            CreateTrack {
                id: "4".to_string(),
                title: "Track 4".to_string(),
                artist: "Other Artist".to_string(),
                album: "Other Album".to_string(),
                audio_src: "/music/4.mp3".to_string(),
                ..Default::default()
            }
            .validate()
            .unwrap(),
        );
        let stats = queue.stats();
        assert_eq!((stats.songs, stats.artists, stats.albums), (4, 2, 2));

        assert_eq!(Queue::new().stats(), QueueStats::default());
    }

    #[test]
    fn clear_queue() {
        let mut queue = three_track_queue();
        queue.clear();
        assert!(queue.is_empty());
    }
}
