//! Track domain type

use super::ids::{ArtistId, TrackId};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio track
///
/// Immutable once built. The only way to obtain one is
/// [`CreateTrack::validate`], so every `Track` in a collection has a
/// non-empty id, title, artist and audio source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreateTrack", into = "CreateTrack")]
pub struct Track {
    id: TrackId,
    title: String,
    artist: String,
    artist_id: ArtistId,
    album: String,
    duration_secs: u32,
    cover_art: String,
    audio_src: String,
}

impl Track {
    /// Unique track identifier
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    /// Track title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Artist display name
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Artist identifier
    pub fn artist_id(&self) -> &ArtistId {
        &self.artist_id
    }

    /// Album name (may be empty for singles)
    pub fn album(&self) -> &str {
        &self.album
    }

    /// Nominal duration in whole seconds, as published by the catalog
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Nominal duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Cover art URI
    pub fn cover_art(&self) -> &str {
        &self.cover_art
    }

    /// Audio source URI handed to the media output
    pub fn audio_src(&self) -> &str {
        &self.audio_src
    }
}

/// Data for creating a track
///
/// Field names follow the catalog file format; the camelCase spellings used
/// by web catalogs are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTrack {
    /// Track id; required
    pub id: String,
    /// Title; required
    pub title: String,
    /// Artist display name; required
    pub artist: String,
    /// Artist id
    #[serde(default, alias = "artistId")]
    pub artist_id: String,
    /// Album name
    #[serde(default)]
    pub album: String,
    /// Nominal duration in whole seconds
    #[serde(default, alias = "duration")]
    pub duration_secs: u32,
    /// Cover art URI
    #[serde(default, alias = "coverArt")]
    pub cover_art: String,
    /// Audio source URI; required
    #[serde(alias = "audioSrc")]
    pub audio_src: String,
}

/// Album given to user-added tracks that name none
pub const DEFAULT_ALBUM: &str = "Unknown Album";

/// Duration assumed for user-added tracks until the media reports one
pub const DEFAULT_DURATION_SECS: u32 = 180;

/// Cover shown for user-added tracks without artwork
pub const DEFAULT_COVER_ART: &str = "/assets/images/covers/default.jpg";

impl CreateTrack {
    /// Fill what the add-track form leaves out
    ///
    /// Blank ids are generated, as are blank artist ids, and the album,
    /// duration and cover fall back to the `DEFAULT_*` constants. Required
    /// fields are left alone so [`validate`](Self::validate) still rejects
    /// them.
    pub fn with_form_defaults(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = TrackId::generate().as_str().to_string();
        }
        if self.artist_id.trim().is_empty() {
            self.artist_id = ArtistId::generate().as_str().to_string();
        }
        if self.album.trim().is_empty() {
            self.album = DEFAULT_ALBUM.to_string();
        }
        if self.duration_secs == 0 {
            self.duration_secs = DEFAULT_DURATION_SECS;
        }
        if self.cover_art.trim().is_empty() {
            self.cover_art = DEFAULT_COVER_ART.to_string();
        }
        self
    }

    /// Check required fields and build the immutable [`Track`]
    pub fn validate(self) -> Result<Track> {
        require("id", &self.id)?;
        require("title", &self.title)?;
        require("artist", &self.artist)?;
        require("audio_src", &self.audio_src)?;

        Ok(Track {
            id: TrackId::new(self.id),
            title: self.title,
            artist: self.artist,
            artist_id: ArtistId::new(self.artist_id),
            album: self.album,
            duration_secs: self.duration_secs,
            cover_art: self.cover_art,
            audio_src: self.audio_src,
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid_input(format!(
            "track {} must not be empty",
            field
        )));
    }
    Ok(())
}

impl TryFrom<CreateTrack> for Track {
    type Error = CoreError;

    fn try_from(value: CreateTrack) -> Result<Self> {
        value.validate()
    }
}

impl From<Track> for CreateTrack {
    fn from(track: Track) -> Self {
        Self {
            id: track.id.as_str().to_string(),
            title: track.title,
            artist: track.artist,
            artist_id: track.artist_id.as_str().to_string(),
            album: track.album,
            duration_secs: track.duration_secs,
            cover_art: track.cover_art,
            audio_src: track.audio_src,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(id: &str) -> CreateTrack {
        CreateTrack {
            id: id.to_string(),
            title: "Chaiyya Chaiyya".to_string(),
            artist: "Sukhwinder Singh".to_string(),
            artist_id: "ar2".to_string(),
            album: "Dil Se".to_string(),
            duration_secs: 320,
            cover_art: "/assets/images/covers/chaiyya-chaiyya.jpg".to_string(),
            audio_src: "/assets/audio/chaiyya-chaiyya.mp3".to_string(),
        }
    }

    #[test]
    fn validate_builds_track() {
        let track = create("2").validate().unwrap();
        assert_eq!(track.id().as_str(), "2");
        assert_eq!(track.artist_id().as_str(), "ar2");
        assert_eq!(track.duration(), Duration::from_secs(320));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        for field in ["id", "title", "artist", "audio_src"] {
            let mut input = create("2");
            match field {
                "id" => input.id = String::new(),
                "title" => input.title = "   ".to_string(),
                "artist" => input.artist = String::new(),
                _ => input.audio_src = String::new(),
            }

            let err = input.validate().unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidInput(ref msg) if msg.contains(field)),
                "unexpected error for {}: {}",
                field,
                err
            );
        }
    }

    #[test]
    fn form_defaults_fill_optional_fields() {
        let track = CreateTrack {
            title: "Kesariya".to_string(),
            artist: "Arijit Singh".to_string(),
            audio_src: "/uploads/kesariya.mp3".to_string(),
            ..Default::default()
        }
        .with_form_defaults()
        .validate()
        .unwrap();

        assert!(track.id().as_str().starts_with("track-"));
        assert!(track.artist_id().as_str().starts_with("artist-"));
        assert_eq!(track.album(), DEFAULT_ALBUM);
        assert_eq!(track.duration_secs(), DEFAULT_DURATION_SECS);
        assert_eq!(track.cover_art(), DEFAULT_COVER_ART);
    }

    #[test]
    fn form_defaults_keep_given_values() {
        let track = create("2").with_form_defaults().validate().unwrap();
        assert_eq!(track, create("2").validate().unwrap());
    }

    #[test]
    fn form_defaults_do_not_fill_required_fields() {
        let err = CreateTrack {
            title: "Kesariya".to_string(),
            audio_src: "/uploads/kesariya.mp3".to_string(),
            ..Default::default()
        }
        .with_form_defaults()
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref msg) if msg.contains("artist")));
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let mut input = create("2");
        input.album = String::new();
        input.cover_art = String::new();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_catalog_entries() {
        let json = r#"{
            "id": "1",
            "title": "Tum Hi Ho",
            "artist": "Arijit Singh",
            "artistId": "ar1",
            "album": "Aashiqui 2",
            "duration": 261,
            "coverArt": "/assets/images/covers/tum-hi-ho.jpg",
            "audioSrc": "/assets/audio/tum-hi-ho.mp3"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.title(), "Tum Hi Ho");
        assert_eq!(track.duration_secs(), 261);
        assert_eq!(track.audio_src(), "/assets/audio/tum-hi-ho.mp3");
    }

    #[test]
    fn deserializing_invalid_track_fails() {
        let json = r#"{"id": "1", "title": "", "artist": "A", "audio_src": "a.mp3"}"#;
        assert!(serde_json::from_str::<Track>(json).is_err());
    }
}
