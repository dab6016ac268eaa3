//! Artist types

use super::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist, as referenced by catalog tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist identifier shared by the artist's tracks
    pub id: ArtistId,
    /// Display name, as credited on the first catalog track
    pub name: String,
    /// Number of catalog tracks credited to this artist
    pub track_count: usize,
}
