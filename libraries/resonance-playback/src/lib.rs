//! Resonance - Playback Control
//!
//! Platform-agnostic playback control for Resonance.
//!
//! This crate provides:
//! - A play queue, deduplicated by track id, with wraparound navigation
//! - A playback controller state machine (idle, paused, playing)
//! - Volume control (linear 0.0-1.0, mute/unmute)
//! - Seek with clamping to the reported duration
//! - Stale-callback protection through per-binding load tokens
//! - Bounded reload of sources that fail to load
//!
//! # Architecture
//!
//! `resonance-playback` does not produce sound. Audio output is provided by
//! the host through the [`MediaOutput`] trait (an HTML audio element behind
//! wasm bindings, a native player, or a simulator), and the host reports its
//! asynchronous notifications back as [`MediaEvent`]s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use resonance_core::CreateTrack;
//! use resonance_playback::{NullOutput, PlaybackConfig, PlaybackController, PlayerStatus, Queue};
//!
//! let track = CreateTrack {
//!     id: "1".into(),
//!     title: "Tum Hi Ho".into(),
//!     artist: "Arijit Singh".into(),
//!     audio_src: "/assets/audio/tum-hi-ho.mp3".into(),
//!     ..Default::default()
//! }
//! .validate()
//! .unwrap();
//!
//! let queue = Queue::from_tracks(vec![track.clone()]);
//! let mut controller = PlaybackController::new(NullOutput::default(), PlaybackConfig::default());
//!
//! controller.set_volume(0.8);
//! controller.play_track(&track);
//! assert_eq!(controller.status(), PlayerStatus::Playing);
//!
//! controller.pause();
//! assert_eq!(controller.status(), PlayerStatus::Paused);
//!
//! // Single-track queue wraps to itself
//! assert!(controller.next_track(&queue));
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use resonance_playback::{LoadToken, MediaError, MediaOutput};
//!
//! struct HostAudio {
//!     // ... platform handle
//! }
//!
//! impl MediaOutput for HostAudio {
//!     fn load(&mut self, token: &LoadToken, uri: &str) {
//!         // Remember `token` and stamp every event for this source with it
//!     }
//!     fn clear(&mut self) {}
//!     fn play(&mut self) -> Result<(), MediaError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn set_volume(&mut self, level: f32) {}
//!     fn volume(&self) -> f32 {
//!         1.0
//!     }
//!     fn position(&self) -> f64 {
//!         0.0
//!     }
//!     fn set_position(&mut self, secs: f64) {}
//! }
//! ```

mod controller;
mod error;
mod events;
mod media;
mod queue;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{MediaError, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use media::{LoadToken, MediaEvent, MediaEventKind, MediaOutput, NullOutput};
pub use queue::{Queue, QueueStats};
pub use types::{PlaybackConfig, PlaybackState, PlayerStatus};
pub use volume::Volume;
