//! Domain types

mod artist;
mod ids;
mod playlist;
mod track;

pub use artist::Artist;
pub use ids::{ArtistId, PlaylistId, TrackId};
pub use playlist::Playlist;
pub use track::{CreateTrack, Track, DEFAULT_ALBUM, DEFAULT_COVER_ART, DEFAULT_DURATION_SECS};
