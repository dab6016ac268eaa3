//! Host media output abstraction
//!
//! The controller never decodes audio. It drives a host-provided output
//! (an HTML audio element, a native player, a simulator) through
//! [`MediaOutput`] and receives the host's asynchronous notifications as
//! [`MediaEvent`]s.

use crate::error::MediaError;
use resonance_core::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one source binding
///
/// A fresh token is issued every time the controller binds a source. The
/// output must stamp every event it reports for that source with the token,
/// which lets the controller drop notifications for sources it has since
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadToken {
    generation: u64,
    track_id: TrackId,
}

impl LoadToken {
    pub(crate) fn new(generation: u64, track_id: TrackId) -> Self {
        Self {
            generation,
            track_id,
        }
    }

    /// Monotonic binding counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Track the source was bound for
    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.track_id, self.generation)
    }
}

/// What the host reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Periodic progress while playing
    TimeUpdate { position_secs: f64 },

    /// Source metadata is available
    MetadataLoaded { duration_secs: f64 },

    /// Output reached the end of the source
    Ended,

    /// A play request was refused after `play()` had returned
    PlayRejected { reason: String },

    /// Source could not be loaded
    LoadFailed { reason: String },
}

/// Host notification tagged with the binding it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEvent {
    pub token: LoadToken,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(token: LoadToken, kind: MediaEventKind) -> Self {
        Self { token, kind }
    }
}

/// Platform media output
///
/// One instance per controller. Only the controller calls these methods.
pub trait MediaOutput {
    /// Bind a new source, replacing whatever was bound before
    ///
    /// Every event later reported for this source must carry `token`.
    fn load(&mut self, token: &LoadToken, uri: &str);

    /// Unbind the source and stop output
    fn clear(&mut self);

    /// Start or resume output from the current position
    ///
    /// Hosts that only learn about refusal later report it as
    /// [`MediaEventKind::PlayRejected`] instead.
    fn play(&mut self) -> Result<(), MediaError>;

    /// Suspend output, keeping the position
    fn pause(&mut self);

    /// Set output gain in [0, 1]
    fn set_volume(&mut self, level: f32);

    /// Current output gain
    fn volume(&self) -> f32;

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Move the position, in seconds
    fn set_position(&mut self, secs: f64);
}

/// Output that accepts every request and produces no sound
///
/// Useful for headless sessions and tests that only care about state.
#[derive(Debug, Default, Clone)]
pub struct NullOutput {
    volume: f32,
    position: f64,
}

impl MediaOutput for NullOutput {
    fn load(&mut self, _token: &LoadToken, _uri: &str) {
        self.position = 0.0;
    }

    fn clear(&mut self) {
        self.position = 0.0;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.position = secs;
    }
}
