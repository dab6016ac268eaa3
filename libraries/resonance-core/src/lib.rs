//! Resonance Core
//!
//! Platform-agnostic domain types and error handling shared by every
//! Resonance crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `Artist`
//! - **Identifiers**: `TrackId`, `PlaylistId`, `ArtistId`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use resonance_core::types::{CreateTrack, Playlist};
//!
//! let track = CreateTrack {
//!     id: "1".into(),
//!     title: "Tum Hi Ho".into(),
//!     artist: "Arijit Singh".into(),
//!     artist_id: "ar1".into(),
//!     album: "Aashiqui 2".into(),
//!     duration_secs: 261,
//!     cover_art: "/assets/images/covers/tum-hi-ho.jpg".into(),
//!     audio_src: "/assets/audio/tum-hi-ho.mp3".into(),
//! }
//! .validate()
//! .unwrap();
//!
//! let mut playlist = Playlist::new("Favorites").unwrap();
//! assert!(playlist.insert(track.clone()));
//! assert!(!playlist.insert(track));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error types and the crate-wide `Result` alias
pub mod error;
/// Domain types and identifiers
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Artist, ArtistId, CreateTrack, Playlist, PlaylistId, Track, TrackId, DEFAULT_ALBUM,
    DEFAULT_COVER_ART, DEFAULT_DURATION_SECS,
};
