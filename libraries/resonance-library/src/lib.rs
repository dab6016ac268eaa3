//! Resonance Library
//!
//! In-memory collections and the session state owner.
//!
//! - [`Catalog`]: the tracks known to this session, from the built-in
//!   sample set or a TOML/JSON file
//! - [`LikedSet`]: liked songs, in the order they were liked
//! - [`PlaylistCollection`]: user playlists
//! - [`Session`]: owns all of the above plus the play queue and the
//!   playback controller; the UI holds a reference to it and nothing else
//!
//! Nothing here persists: a session starts from its catalog and is gone
//! when dropped.

pub mod catalog;
pub mod liked;
pub mod playlists;
pub mod session;

pub use catalog::Catalog;
pub use liked::LikedSet;
pub use playlists::PlaylistCollection;
pub use session::Session;
