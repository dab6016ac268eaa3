//! Playback controller - core orchestration
//!
//! Owns the current-track pointer, the play/pause flag, volume and position,
//! and drives a [`MediaOutput`] accordingly.
//!
//! State machine:
//!
//! ```text
//!            play_track                  pause
//!   Idle ─────────────────▶ Playing ◀──────────▶ Paused
//!    ▲                        │        resume       │
//!    └──────── stop ──────────┴─────────────────────┘
//! ```
//!
//! Every source binding gets a fresh [`LoadToken`]. Media events carrying any
//! other token are discarded, so a late `Ended` for a replaced track can never
//! advance the queue from the wrong position.

use crate::{
    error::{MediaError, PlaybackError, Result},
    events::PlaybackEvent,
    media::{LoadToken, MediaEvent, MediaEventKind, MediaOutput},
    queue::Queue,
    types::{PlaybackConfig, PlaybackState, PlayerStatus},
    volume::Volume,
};
use resonance_core::Track;
use tracing::{debug, info, warn};

/// Central playback control
///
/// Holds exactly one media output for its whole lifetime. Dropping the
/// controller pauses the output and clears its source.
pub struct PlaybackController<M: MediaOutput> {
    media: M,
    config: PlaybackConfig,

    // State
    current_track: Option<Track>,
    is_playing: bool,
    position_secs: f64,
    duration_secs: f64,
    volume: Volume,

    // Source binding
    token: Option<LoadToken>,
    next_generation: u64,
    load_attempts: u32,
    load_error: Option<String>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaOutput> PlaybackController<M> {
    /// Create a controller that takes ownership of `media`
    pub fn new(mut media: M, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        media.set_volume(volume.gain());

        Self {
            media,
            config,
            current_track: None,
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume,
            token: None,
            next_generation: 0,
            load_attempts: 0,
            load_error: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Make `track` current and start output
    ///
    /// Playing the track that is already current does not rebind the source:
    /// a paused track resumes, a playing one is left alone.
    pub fn play_track(&mut self, track: &Track) {
        let is_current = self
            .current_track
            .as_ref()
            .is_some_and(|current| current.id() == track.id());

        if is_current && self.load_error.is_none() {
            if self.is_playing {
                debug!(track_id = %track.id(), "Track already playing");
            } else {
                self.resume();
            }
            return;
        }

        self.load_and_play(track.clone());
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        if !self.is_playing {
            debug!("Pause ignored: nothing playing");
            return;
        }

        self.media.pause();
        self.position_secs = sanitize(self.media.position());
        self.set_playing(false);
    }

    /// Resume a paused track
    ///
    /// Returns `true` if output is running afterwards. Refusals by the media
    /// output are logged and reported as an `Error` event, never propagated.
    pub fn resume(&mut self) -> bool {
        match self.try_resume() {
            Ok(()) => true,
            Err(PlaybackError::Media(_)) => false,
            Err(err) => {
                debug!(error = %err, "Resume ignored");
                false
            }
        }
    }

    /// Resume a paused track, reporting why it could not
    pub fn try_resume(&mut self) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.is_playing {
            return Ok(());
        }

        // A source that gave up loading gets a fresh binding on user request
        if self.load_error.take().is_some() {
            self.load_attempts = 0;
            self.bind_current();
        }

        self.start_output().map_err(PlaybackError::from)
    }

    /// Stop playback and unload the current track
    pub fn stop(&mut self) {
        let was_idle = self.current_track.is_none();
        self.release();
        if !was_idle {
            info!("Playback stopped");
            self.emit_state_changed();
        }
    }

    // ===== Navigation =====

    /// Play the track after the current one, wrapping to the start
    ///
    /// No-op returning `false` if the queue is empty or nothing is loaded.
    pub fn next_track(&mut self, queue: &Queue) -> bool {
        match self.try_next_track(queue) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "Next ignored");
                false
            }
        }
    }

    /// Play the track after the current one, reporting why it could not
    pub fn try_next_track(&mut self, queue: &Queue) -> Result<()> {
        if queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        let next = {
            let current = self
                .current_track
                .as_ref()
                .ok_or(PlaybackError::NoTrackLoaded)?;
            queue
                .next_after(current.id())
                .cloned()
                .ok_or(PlaybackError::QueueEmpty)?
        };

        self.load_and_play(next);
        Ok(())
    }

    /// Play the track before the current one, wrapping to the end
    ///
    /// No-op returning `false` if the queue is empty or nothing is loaded.
    pub fn prev_track(&mut self, queue: &Queue) -> bool {
        match self.try_prev_track(queue) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "Previous ignored");
                false
            }
        }
    }

    /// Play the track before the current one, reporting why it could not
    pub fn try_prev_track(&mut self, queue: &Queue) -> Result<()> {
        if queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        let prev = {
            let current = self
                .current_track
                .as_ref()
                .ok_or(PlaybackError::NoTrackLoaded)?;
            queue
                .previous_before(current.id())
                .cloned()
                .ok_or(PlaybackError::QueueEmpty)?
        };

        self.load_and_play(prev);
        Ok(())
    }

    // ===== Seek =====

    /// Seek within the current track; ignored when nothing is loaded
    pub fn seek_to(&mut self, secs: f64) {
        if let Err(err) = self.try_seek_to(secs) {
            debug!(error = %err, "Seek ignored");
        }
    }

    /// Seek within the current track
    ///
    /// The target is clamped to `[0, duration]`. Until the output reports a
    /// duration, the track's nominal duration is the upper bound; with
    /// neither, only the lower bound applies. Returns the position actually
    /// set.
    pub fn try_seek_to(&mut self, secs: f64) -> Result<f64> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let target = self.clamp_position(secs);
        self.media.set_position(target);
        self.position_secs = target;
        self.emit_position_changed();
        Ok(target)
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        let secs = if secs.is_nan() { 0.0 } else { secs.max(0.0) };
        let upper = if self.duration_secs > 0.0 {
            self.duration_secs
        } else {
            self.current_track
                .as_ref()
                .map_or(0.0, |t| f64::from(t.duration_secs()))
        };
        let secs = if upper > 0.0 { secs.min(upper) } else { secs };
        if secs.is_finite() {
            secs
        } else {
            0.0
        }
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Get current volume level (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    fn apply_volume(&mut self) {
        self.media.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Media Events =====

    /// Apply a notification from the media output
    ///
    /// Events tagged with anything but the current binding are dropped.
    pub fn handle_event(&mut self, event: MediaEvent, queue: &Queue) {
        if self.token.as_ref() != Some(&event.token) {
            debug!(token = %event.token, kind = ?event.kind, "Discarding event for stale source");
            return;
        }

        match event.kind {
            MediaEventKind::TimeUpdate { position_secs } => {
                self.position_secs = sanitize(position_secs);
                self.emit_position_changed();
            }
            MediaEventKind::MetadataLoaded { duration_secs } => {
                self.duration_secs = sanitize(duration_secs);
                self.emit_position_changed();
            }
            MediaEventKind::Ended => self.handle_ended(queue),
            MediaEventKind::PlayRejected { reason } => {
                warn!(token = %event.token, %reason, "Media output rejected playback");
                self.set_playing(false);
                self.emit_error(MediaError::NotAllowed(reason).to_string());
            }
            MediaEventKind::LoadFailed { reason } => self.handle_load_failed(reason),
        }
    }

    fn handle_ended(&mut self, queue: &Queue) {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id().clone()) else {
            return;
        };

        if self.duration_secs > 0.0 {
            self.position_secs = self.duration_secs;
        }

        // A pause processed before this event wins: stay put
        if !self.is_playing {
            debug!(%track_id, "Track ended while paused; not advancing");
            return;
        }

        self.pending_events
            .push(PlaybackEvent::TrackFinished { track_id });

        if self.config.autoplay_next && self.next_track(queue) {
            return;
        }

        self.set_playing(false);
    }

    fn handle_load_failed(&mut self, reason: String) {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id().clone()) else {
            return;
        };

        if self.load_attempts < self.config.load_retries {
            self.load_attempts += 1;
            let attempt = self.load_attempts;
            warn!(%track_id, attempt, %reason, "Source failed to load, retrying");
            self.pending_events
                .push(PlaybackEvent::LoadRetry { track_id, attempt });

            let resume = self.is_playing;
            self.bind_current();
            if resume {
                if let Err(err) = self.start_output() {
                    debug!(error = %err, "Reloaded source did not start");
                }
            }
            return;
        }

        warn!(%track_id, attempts = self.load_attempts, %reason, "Source failed to load, giving up");
        self.media.pause();
        self.set_playing(false);
        self.emit_error(MediaError::Load(format!("{}: {}", track_id, reason)).to_string());
        self.load_error = Some(reason);
    }

    // ===== State Queries =====

    /// Get current status
    pub fn status(&self) -> PlayerStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), false) => PlayerStatus::Paused,
            (Some(_), true) => PlayerStatus::Playing,
        }
    }

    /// Snapshot of the full playback state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track_id: self.current_track.as_ref().map(|t| t.id().clone()),
            is_playing: self.is_playing,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
            load_error: self.load_error.clone(),
        }
    }

    /// Get currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether output is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Last reported position in seconds
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Reported duration in seconds (0 until metadata loads)
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Token of the current source binding
    pub fn load_token(&self) -> Option<&LoadToken> {
        self.token.as_ref()
    }

    /// Read access to the media output
    pub fn media(&self) -> &M {
        &self.media
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Add an event raised outside the controller (e.g. queue edits) to the
    /// same ordered stream
    pub fn push_event(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    // ===== Internals =====

    fn load_and_play(&mut self, track: Track) {
        let previous_track_id = self.current_track.as_ref().map(|t| t.id().clone());
        let track_id = track.id().clone();
        info!(%track_id, title = track.title(), artist = track.artist(), "Loading track");

        self.current_track = Some(track);
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.load_attempts = 0;
        self.load_error = None;
        self.bind_current();

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });

        if let Err(err) = self.start_output() {
            debug!(error = %err, "Track loaded but not started");
        }
    }

    fn bind_current(&mut self) {
        let Some(track) = self.current_track.as_ref() else {
            return;
        };

        let token = LoadToken::new(self.next_generation, track.id().clone());
        self.next_generation += 1;
        self.media.load(&token, track.audio_src());
        self.media.set_volume(self.volume.gain());
        debug!(%token, uri = track.audio_src(), "Bound source");
        self.token = Some(token);
    }

    fn start_output(&mut self) -> std::result::Result<(), MediaError> {
        match self.media.play() {
            Ok(()) => {
                self.set_playing(true);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Media output refused to play");
                self.set_playing(false);
                self.emit_error(err.to_string());
                Err(err)
            }
        }
    }

    fn release(&mut self) {
        self.media.pause();
        self.media.clear();
        self.current_track = None;
        self.token = None;
        self.is_playing = false;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.load_attempts = 0;
        self.load_error = None;
    }

    fn set_playing(&mut self, playing: bool) {
        let playing = playing && self.current_track.is_some();
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit_state_changed();
        }
    }

    /// Emit a state changed event
    fn emit_state_changed(&mut self) {
        let status = self.status();
        self.pending_events
            .push(PlaybackEvent::StateChanged { status });
    }

    /// Emit a position changed event
    fn emit_position_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionChanged {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });
    }

    /// Emit an error event
    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}

impl<M: MediaOutput> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.release();
    }
}

fn sanitize(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}
