//! Simulated media output
//!
//! Behaves like a browser audio element driven by a virtual clock: nothing
//! happens until [`SimulatedOutput::tick`] is called, which reports the
//! notifications a real element would have fired in that time.

use resonance_core::Track;
use resonance_playback::{LoadToken, MediaError, MediaEvent, MediaEventKind, MediaOutput};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct SimState {
    sources: HashMap<String, f64>,
    token: Option<LoadToken>,
    uri: Option<String>,
    playing: bool,
    position: f64,
    volume: f32,
    refuse_play: bool,
    metadata_sent: bool,
    failure_sent: bool,
}

/// Media output with a virtual clock
///
/// Clones share state: the session owns one clone, the shell keeps another
/// to advance the clock and flip the autoplay policy.
#[derive(Debug, Clone, Default)]
pub struct SimulatedOutput {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedOutput {
    /// Output that knows the durations of the given tracks' sources
    ///
    /// Loading any other URI fails on the next tick, like a 404.
    pub fn new<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Self {
        let output = Self::default();
        for track in tracks {
            output.add_source(track.audio_src(), f64::from(track.duration_secs()));
        }
        output
    }

    pub fn add_source(&self, uri: &str, duration_secs: f64) {
        self.state
            .borrow_mut()
            .sources
            .insert(uri.to_string(), duration_secs);
    }

    /// Refuse (or allow) `play()` calls, as an autoplay policy would
    pub fn set_refuse_play(&self, refuse: bool) {
        self.state.borrow_mut().refuse_play = refuse;
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn current_uri(&self) -> Option<String> {
        self.state.borrow().uri.clone()
    }

    /// Advance the clock by `secs`, returning the events fired meanwhile
    ///
    /// Playback stops at the end of the source; time past the end is not
    /// carried into whatever gets loaded next.
    pub fn tick(&self, secs: f64) -> Vec<MediaEvent> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(token) = state.token.clone() else {
            return Vec::new();
        };
        let mut events = Vec::new();

        let duration = state
            .uri
            .as_ref()
            .and_then(|uri| state.sources.get(uri).copied());
        let Some(duration) = duration else {
            if !state.failure_sent {
                state.failure_sent = true;
                state.playing = false;
                let reason = format!(
                    "source not found: {}",
                    state.uri.as_deref().unwrap_or_default()
                );
                events.push(MediaEvent::new(token, MediaEventKind::LoadFailed { reason }));
            }
            return events;
        };

        if !state.metadata_sent {
            state.metadata_sent = true;
            events.push(MediaEvent::new(
                token.clone(),
                MediaEventKind::MetadataLoaded {
                    duration_secs: duration,
                },
            ));
        }

        if state.playing && secs > 0.0 {
            state.position = (state.position + secs).min(duration);
            events.push(MediaEvent::new(
                token.clone(),
                MediaEventKind::TimeUpdate {
                    position_secs: state.position,
                },
            ));
            if state.position >= duration {
                state.playing = false;
                events.push(MediaEvent::new(token, MediaEventKind::Ended));
            }
        }

        trace!(events = events.len(), position = state.position, "Simulated tick");
        events
    }
}

impl MediaOutput for SimulatedOutput {
    fn load(&mut self, token: &LoadToken, uri: &str) {
        let mut state = self.state.borrow_mut();
        debug!(%token, uri, "Simulated load");
        state.token = Some(token.clone());
        state.uri = Some(uri.to_string());
        state.playing = false;
        state.position = 0.0;
        state.metadata_sent = false;
        state.failure_sent = false;
    }

    fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        state.token = None;
        state.uri = None;
        state.playing = false;
        state.position = 0.0;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_play {
            return Err(MediaError::NotAllowed(
                "autoplay blocked until the user interacts".to_string(),
            ));
        }
        if state.uri.is_none() {
            return Err(MediaError::Other("no source loaded".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn set_volume(&mut self, level: f32) {
        self.state.borrow_mut().volume = level;
    }

    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_position(&mut self, secs: f64) {
        self.state.borrow_mut().position = secs;
    }
}
