//! User playlist collection

use resonance_core::{CoreError, Playlist, PlaylistId, Result, Track, TrackId};
use tracing::{debug, info};

/// Ordered collection of user playlists
#[derive(Debug, Clone, Default)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
}

impl PlaylistCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist and return its generated id
    ///
    /// Names are trimmed; a blank name is rejected. Duplicate names are
    /// allowed since playlists are addressed by id.
    pub fn create(&mut self, name: &str) -> Result<PlaylistId> {
        self.create_with_description(name, None)
    }

    /// Create an empty playlist with an optional description
    pub fn create_with_description(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<PlaylistId> {
        let mut playlist = Playlist::new(name)?;
        playlist.description = description.filter(|d| !d.trim().is_empty());

        let id = playlist.id.clone();
        info!(playlist_id = %id, name = %playlist.name, "Created playlist");
        self.playlists.push(playlist);
        Ok(id)
    }

    /// Insert an existing playlist, e.g. one restored by the host
    ///
    /// Returns `false` if a playlist with that id already exists.
    pub fn insert(&mut self, playlist: Playlist) -> bool {
        if self.get(&playlist.id).is_some() {
            return false;
        }
        self.playlists.push(playlist);
        true
    }

    /// Add a track to a playlist, ignoring unknown playlist ids
    ///
    /// Returns `true` only if the track was appended.
    pub fn add_track(&mut self, playlist_id: &PlaylistId, track: &Track) -> bool {
        match self.try_add_track(playlist_id, track) {
            Ok(added) => added,
            Err(e) => {
                debug!(error = %e, "Ignoring add to playlist");
                false
            }
        }
    }

    /// Add a track to a playlist
    ///
    /// `Ok(false)` means the track was already present.
    pub fn try_add_track(&mut self, playlist_id: &PlaylistId, track: &Track) -> Result<bool> {
        let playlist = self.get_mut(playlist_id)?;
        let added = playlist.insert(track.clone());
        if added {
            debug!(playlist_id = %playlist_id, track_id = %track.id(), "Added track to playlist");
        }
        Ok(added)
    }

    /// Remove a track from a playlist
    pub fn remove_track(&mut self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<Track> {
        self.get_mut(playlist_id)?
            .remove(track_id)
            .ok_or_else(|| CoreError::TrackNotFound(track_id.clone()))
    }

    pub fn rename(&mut self, playlist_id: &PlaylistId, name: &str) -> Result<()> {
        self.get_mut(playlist_id)?.rename(name)
    }

    /// Delete a playlist, returning it
    pub fn delete(&mut self, playlist_id: &PlaylistId) -> Result<Playlist> {
        let index = self
            .playlists
            .iter()
            .position(|p| &p.id == playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound(playlist_id.clone()))?;
        info!(playlist_id = %playlist_id, "Deleted playlist");
        Ok(self.playlists.remove(index))
    }

    pub fn get(&self, playlist_id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == playlist_id)
    }

    /// Look up a playlist by exact name; the first match wins
    pub fn find_by_name(&self, name: &str) -> Option<&Playlist> {
        let name = name.trim();
        self.playlists.iter().find(|p| p.name == name)
    }

    fn get_mut(&mut self, playlist_id: &PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound(playlist_id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
