//! Core types for playback control

use resonance_core::TrackId;
use serde::{Deserialize, Serialize};

/// Coarse player status derived from [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// No track loaded
    Idle,

    /// Track loaded, output suspended
    Paused,

    /// Track loaded, output running
    Playing,
}

/// Snapshot of the controller state for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current track, if any
    pub current_track_id: Option<TrackId>,

    /// Whether output is running. Always `false` when no track is loaded.
    pub is_playing: bool,

    /// Volume level in [0, 1]
    pub volume: f32,

    /// Whether output is muted (level is preserved)
    pub muted: bool,

    /// Position reported by the media output, in seconds
    pub position_secs: f64,

    /// Duration reported by the media output; 0 until metadata loads
    pub duration_secs: f64,

    /// Reason the current source gave up loading, if it did
    pub load_error: Option<String>,
}

impl PlaybackState {
    /// Derive the coarse status
    pub fn status(&self) -> PlayerStatus {
        match (&self.current_track_id, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), false) => PlayerStatus::Paused,
            (Some(_), true) => PlayerStatus::Playing,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.5)
    pub volume: f32,

    /// Reload attempts after a source fails to load (default: 2)
    pub load_retries: u32,

    /// Advance to the next queued track when one ends (default: true)
    pub autoplay_next: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            load_retries: 2,
            autoplay_next: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 0.5);
        assert_eq!(config.load_retries, 2);
        assert!(config.autoplay_next);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"load_retries": 5}"#).unwrap();
        assert_eq!(config.load_retries, 5);
        assert_eq!(config.volume, 0.5);
    }

    #[test]
    fn status_derivation() {
        let mut state = PlaybackState {
            current_track_id: None,
            is_playing: false,
            volume: 0.5,
            muted: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            load_error: None,
        };
        assert_eq!(state.status(), PlayerStatus::Idle);

        state.current_track_id = Some(TrackId::new("1"));
        assert_eq!(state.status(), PlayerStatus::Paused);

        state.is_playing = true;
        assert_eq!(state.status(), PlayerStatus::Playing);
    }
}
