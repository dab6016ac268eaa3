//! Track catalog
//!
//! The set of tracks a session knows about. Loaded from a TOML or JSON file
//! with a top-level `tracks` array, or taken from the built-in sample set.

use resonance_core::{Artist, ArtistId, CoreError, CreateTrack, Result, Track, TrackId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Known tracks in catalog order, unique by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate track ids
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        let tracks: Vec<Track> = tracks.into_iter().collect();
        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id().clone()) {
                return Err(CoreError::invalid_input(format!(
                    "duplicate track id in catalog: {}",
                    track.id()
                )));
            }
        }
        Ok(Self { tracks })
    }

    /// The built-in three-track sample catalog
    pub fn sample() -> Self {
        let tracks = [
            ("1", "Tum Hi Ho", "Arijit Singh", "ar1", "Aashiqui 2", 261, "tum-hi-ho"),
            ("2", "Chaiyya Chaiyya", "Sukhwinder Singh", "ar2", "Dil Se", 320, "chaiyya-chaiyya"),
            ("3", "Amplifier", "Imran Khan", "ar3", "Unforgettable", 235, "amplifier"),
        ]
        .into_iter()
        .filter_map(|(id, title, artist, artist_id, album, duration_secs, slug)| {
            CreateTrack {
                id: id.to_string(),
                title: title.to_string(),
                artist: artist.to_string(),
                artist_id: artist_id.to_string(),
                album: album.to_string(),
                duration_secs,
                cover_art: format!("/assets/images/covers/{}.jpg", slug),
                audio_src: format!("/assets/audio/{}.mp3", slug),
            }
            .validate()
            .ok()
        })
        .collect();

        Self { tracks }
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(path = %path.display(), tracks = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Parse a TOML catalog (`[[tracks]]` tables)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CoreError::serialization(format!("invalid catalog: {}", e)))?;
        Self::new(file.tracks)
    }

    /// Parse a JSON catalog (`{"tracks": [...]}`)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.tracks)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, track_id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == track_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks credited to an artist, in catalog order
    pub fn by_artist(&self, artist_id: &ArtistId) -> Vec<&Track> {
        self.tracks
            .iter()
            .filter(|t| t.artist_id() == artist_id)
            .collect()
    }

    /// Artists referenced by the catalog, in order of first appearance
    ///
    /// Tracks without an artist id are not attributed to any artist.
    pub fn artists(&self) -> Vec<Artist> {
        let mut artists: Vec<Artist> = Vec::new();
        for track in &self.tracks {
            if track.artist_id().as_str().is_empty() {
                debug!(track_id = %track.id(), "Track has no artist id");
                continue;
            }
            match artists.iter_mut().find(|a| &a.id == track.artist_id()) {
                Some(artist) => artist.track_count += 1,
                None => artists.push(Artist {
                    id: track.artist_id().clone(),
                    name: track.artist().to_string(),
                    track_count: 1,
                }),
            }
        }
        artists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOML_CATALOG: &str = r#"
[[tracks]]
id = "a"
title = "First"
artist = "Someone"
artist_id = "ar9"
duration_secs = 100
audio_src = "/music/a.mp3"

[[tracks]]
id = "b"
title = "Second"
artist = "Someone"
artist_id = "ar9"
duration_secs = 200
audio_src = "/music/b.mp3"
"#;

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 3);

        let first = catalog.get(&TrackId::new("1")).unwrap();
        assert_eq!(first.title(), "Tum Hi Ho");
        assert_eq!(first.duration_secs(), 261);
        assert_eq!(first.audio_src(), "/assets/audio/tum-hi-ho.mp3");
        assert_eq!(first.cover_art(), "/assets/images/covers/tum-hi-ho.jpg");

        assert_eq!(catalog.artists().len(), 3);
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml_str(TOML_CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tracks()[1].id().as_str(), "b");

        let artists = catalog.artists();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].track_count, 2);
        assert_eq!(catalog.by_artist(&ArtistId::new("ar9")).len(), 2);
    }

    #[test]
    fn test_from_json_accepts_camel_case() {
        let json = r#"{"tracks": [
            {"id": "x", "title": "T", "artist": "A", "artistId": "ar1",
             "duration": 90, "coverArt": "/c.jpg", "audioSrc": "/x.mp3"}
        ]}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let track = catalog.get(&TrackId::new("x")).unwrap();
        assert_eq!(track.duration_secs(), 90);
        assert_eq!(track.audio_src(), "/x.mp3");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[tracks]]
id = "a"
title = "One"
artist = "A"
audio_src = "/a.mp3"

[[tracks]]
id = "a"
title = "Two"
artist = "B"
audio_src = "/b.mp3"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_invalid_track_rejected() {
        let toml = r#"
[[tracks]]
id = "a"
title = "No source"
artist = "A"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CoreError::Serialization(msg) if msg.contains("audio_src")));
    }

    #[test]
    fn test_load_by_extension() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        toml_file.write_all(TOML_CATALOG.as_bytes()).unwrap();
        assert_eq!(Catalog::load(toml_file.path()).unwrap().len(), 2);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file
            .write_all(br#"{"tracks": [{"id": "j", "title": "J", "artist": "A", "audio_src": "/j.mp3"}]}"#)
            .unwrap();
        assert_eq!(Catalog::load(json_file.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        drop(file);
        assert!(matches!(Catalog::load(&path), Err(CoreError::Io(_))));
    }
}
