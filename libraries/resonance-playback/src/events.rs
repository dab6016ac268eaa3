//! Playback Events
//!
//! Event-based communication for UI synchronization. The UI drains the
//! pending events after each interaction and re-renders what changed.

use crate::types::PlayerStatus;
use resonance_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Player status changed (idle, paused, playing)
    StateChanged {
        /// The new status
        status: PlayerStatus,
    },

    /// Current track changed, or the same track was restarted
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position or duration changed
    PositionChanged {
        /// Current playback position in seconds
        position_secs: f64,
        /// Track duration in seconds, 0 if not yet known
        duration_secs: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue changed (tracks added/removed/replaced)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Source failed to load and is being reloaded
    LoadRetry {
        /// Track being reloaded
        track_id: TrackId,
        /// Retry number, starting at 1
        attempt: u32,
    },

    /// Non-fatal error during playback
    Error {
        /// Error message
        message: String,
    },
}
