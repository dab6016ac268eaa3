//! Session state owner
//!
//! A [`Session`] is the single owner of everything the UI reads: the
//! catalog, the play queue, liked songs, playlists and the playback
//! controller. Mutations go through its methods; readers take the
//! [`PlaybackState`] snapshot or borrow a collection.

use crate::{catalog::Catalog, liked::LikedSet, playlists::PlaylistCollection};
use resonance_core::{CoreError, CreateTrack, PlaylistId, Result, Track, TrackId};
use resonance_playback::{
    MediaEvent, MediaOutput, PlaybackConfig, PlaybackController, PlaybackEvent, PlaybackState,
    Queue, QueueStats,
};
use tracing::{debug, info};

pub struct Session<M: MediaOutput> {
    catalog: Catalog,
    queue: Queue,
    liked: LikedSet,
    playlists: PlaylistCollection,
    player: PlaybackController<M>,
}

impl<M: MediaOutput> Session<M> {
    /// Start a session with an empty queue
    pub fn new(catalog: Catalog, media: M, config: PlaybackConfig) -> Self {
        info!(tracks = catalog.len(), "Starting session");
        Self {
            catalog,
            queue: Queue::new(),
            liked: LikedSet::new(),
            playlists: PlaylistCollection::new(),
            player: PlaybackController::new(media, config),
        }
    }

    // ===== Lookup =====

    /// Find a track record by id
    ///
    /// Searches the catalog, then the queue, liked songs and playlists, so
    /// any track the user can see can be played.
    pub fn find_track(&self, track_id: &TrackId) -> Option<&Track> {
        self.catalog
            .get(track_id)
            .or_else(|| self.queue.find(track_id))
            .or_else(|| self.liked.tracks().iter().find(|t| t.id() == track_id))
            .or_else(|| {
                self.playlists
                    .iter()
                    .flat_map(|p| p.tracks())
                    .find(|t| t.id() == track_id)
            })
    }

    /// Like [`find_track`](Self::find_track), but a miss is a `TrackNotFound` error
    pub fn try_find_track(&self, track_id: &TrackId) -> Result<Track> {
        self.find_track(track_id)
            .cloned()
            .ok_or_else(|| CoreError::TrackNotFound(track_id.clone()))
    }

    // ===== Playback =====

    pub fn play_track(&mut self, track: &Track) {
        self.player.play_track(track);
    }

    /// Play a known track by id
    pub fn play_track_by_id(&mut self, track_id: &TrackId) -> Result<()> {
        let track = self.try_find_track(track_id)?;
        self.player.play_track(&track);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn resume(&mut self) -> bool {
        self.player.resume()
    }

    /// Toggle between playing and paused
    ///
    /// Returns whether output is playing afterwards. Does nothing without a
    /// current track.
    pub fn toggle_play(&mut self) -> bool {
        if self.player.is_playing() {
            self.player.pause();
            false
        } else if self.player.current_track().is_some() {
            self.player.resume()
        } else {
            debug!("Toggle ignored: no current track");
            false
        }
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn next_track(&mut self) -> bool {
        self.player.next_track(&self.queue)
    }

    pub fn prev_track(&mut self) -> bool {
        self.player.prev_track(&self.queue)
    }

    pub fn seek_to(&mut self, secs: f64) {
        self.player.seek_to(secs);
    }

    pub fn set_volume(&mut self, level: f32) {
        self.player.set_volume(level);
    }

    pub fn toggle_mute(&mut self) {
        self.player.toggle_mute();
    }

    /// Route an asynchronous notification from the media output
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.player.handle_event(event, &self.queue);
    }

    // ===== Queue =====

    /// Append a track to the queue; returns `false` if already queued
    pub fn add_to_queue(&mut self, track: &Track) -> bool {
        let added = self.queue.enqueue(track.clone());
        if added {
            self.queue_changed();
        }
        added
    }

    pub fn add_to_queue_by_id(&mut self, track_id: &TrackId) -> Result<bool> {
        let track = self.try_find_track(track_id)?;
        Ok(self.add_to_queue(&track))
    }

    /// Build a track from the add-track form and append it to the queue
    ///
    /// Missing optional fields get the form defaults and blank ids are
    /// generated. A form without a title, artist or audio source is rejected
    /// and the queue is left untouched.
    pub fn add_new_track(&mut self, form: CreateTrack) -> Result<Track> {
        let track = form.with_form_defaults().validate()?;
        if self.find_track(track.id()).is_some() {
            return Err(CoreError::invalid_input(format!(
                "track id already in use: {}",
                track.id()
            )));
        }
        info!(track_id = %track.id(), title = track.title(), "Adding track");
        self.add_to_queue(&track);
        Ok(track)
    }

    /// Remove a track from the queue
    ///
    /// Removing the current track does not stop it; navigation from a track
    /// outside the queue starts at the queue's ends.
    pub fn remove_from_queue(&mut self, track_id: &TrackId) -> bool {
        let removed = self.queue.remove(track_id).is_some();
        if removed {
            self.queue_changed();
        }
        removed
    }

    /// Replace the queue contents
    pub fn replace_queue(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.queue.replace(tracks);
        self.queue_changed();
    }

    /// Replace the queue with the whole catalog
    pub fn seed_queue_from_catalog(&mut self) {
        let tracks = self.catalog.tracks().to_vec();
        self.replace_queue(tracks);
    }

    /// Replace the queue with a playlist's tracks
    pub fn queue_playlist(&mut self, playlist_id: &PlaylistId) -> Result<()> {
        let tracks = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound(playlist_id.clone()))?
            .tracks()
            .to_vec();
        self.replace_queue(tracks);
        Ok(())
    }

    pub fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.clear();
            self.queue_changed();
        }
    }

    /// Song, artist and album counts for the current queue
    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }

    fn queue_changed(&mut self) {
        debug!(length = self.queue.len(), "Queue changed");
        self.player.push_event(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    // ===== Liked Songs =====

    /// Flip the liked state of a track, returning the new state
    pub fn toggle_like(&mut self, track: &Track) -> bool {
        self.liked.toggle(track)
    }

    pub fn toggle_like_by_id(&mut self, track_id: &TrackId) -> Result<bool> {
        let track = self.try_find_track(track_id)?;
        Ok(self.liked.toggle(&track))
    }

    pub fn is_liked(&self, track_id: &TrackId) -> bool {
        self.liked.is_liked(track_id)
    }

    pub fn liked_tracks(&self) -> &[Track] {
        self.liked.tracks()
    }

    // ===== Playlists =====

    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId> {
        self.playlists.create(name)
    }

    /// Add a track to a playlist; unknown playlist ids are ignored
    pub fn add_to_playlist(&mut self, playlist_id: &PlaylistId, track: &Track) -> bool {
        self.playlists.add_track(playlist_id, track)
    }

    pub fn try_add_to_playlist(&mut self, playlist_id: &PlaylistId, track: &Track) -> Result<bool> {
        self.playlists.try_add_track(playlist_id, track)
    }

    pub fn playlists_mut(&mut self) -> &mut PlaylistCollection {
        &mut self.playlists
    }

    // ===== Readers =====

    /// Snapshot of the playback state for rendering
    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.player.drain_events()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn liked(&self) -> &LikedSet {
        &self.liked
    }

    pub fn playlists(&self) -> &PlaylistCollection {
        &self.playlists
    }

    pub fn player(&self) -> &PlaybackController<M> {
        &self.player
    }
}
