//! Command shell
//!
//! Parses one command per line and applies it to the session, printing
//! whatever the UI would re-render: command output first, then the
//! playback events the command produced.

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::sim::SimulatedOutput;
use resonance_core::{CoreError, CreateTrack, PlaylistId, Track, TrackId};
use resonance_library::{Catalog, Session};
use resonance_playback::{PlaybackConfig, PlaybackEvent, PlayerStatus};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info};

pub const HELP: &str = "\
Playback:
  play <track>              play a track by id
  pause | resume | stop
  next | prev
  seek <secs>
  volume <0-1> | mute | unmute
  tick <secs>               advance the simulated clock
  refuse <on|off>           simulate an autoplay policy
Queue:
  queue | enqueue <track> | dequeue <track> | stats
  add <title> | <artist> | <src> [| <album> [| <secs>]]
Library:
  catalog | artists
  like <track> | liked
  playlists
  playlist new <name>
  playlist add <playlist> <track>
  playlist remove <playlist> <track>
  playlist delete <playlist>
  playlist show <playlist>
  playlist play <playlist>
Other:
  status | help | quit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(TrackId),
    Pause,
    Resume,
    Stop,
    Next,
    Prev,
    Seek(f64),
    Volume(f32),
    Mute,
    Unmute,
    Tick(f64),
    Refuse(bool),
    Queue,
    Enqueue(TrackId),
    Dequeue(TrackId),
    Add(CreateTrack),
    Stats,
    Catalog,
    Artists,
    Like(TrackId),
    Liked,
    Playlists,
    PlaylistNew(String),
    PlaylistAdd(PlaylistId, TrackId),
    PlaylistRemove(PlaylistId, TrackId),
    PlaylistDelete(PlaylistId),
    PlaylistShow(PlaylistId),
    PlaylistPlay(PlaylistId),
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::UnknownCommand(String::new()));
        };
        if name == "add" {
            let form = line.trim_start()[name.len()..].trim();
            return parse_add_form(form).map(Self::Add);
        }
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("play", [id]) => Self::Play(TrackId::new(*id)),
            ("pause", []) => Self::Pause,
            ("resume", []) => Self::Resume,
            ("stop", []) => Self::Stop,
            ("next", []) => Self::Next,
            ("prev", []) => Self::Prev,
            ("seek", [secs]) => Self::Seek(parse_number("seek", secs)?),
            ("volume", [level]) => Self::Volume(parse_number("volume", level)?),
            ("mute", []) => Self::Mute,
            ("unmute", []) => Self::Unmute,
            ("tick", [secs]) => {
                let secs: f64 = parse_number("tick", secs)?;
                if secs < 0.0 {
                    return Err(CliError::invalid("tick", "time cannot run backwards"));
                }
                Self::Tick(secs)
            }
            ("refuse", ["on"]) => Self::Refuse(true),
            ("refuse", ["off"]) => Self::Refuse(false),
            ("queue", []) => Self::Queue,
            ("enqueue", [id]) => Self::Enqueue(TrackId::new(*id)),
            ("dequeue", [id]) => Self::Dequeue(TrackId::new(*id)),
            ("stats", []) => Self::Stats,
            ("catalog", []) => Self::Catalog,
            ("artists", []) => Self::Artists,
            ("like", [id]) => Self::Like(TrackId::new(*id)),
            ("liked", []) => Self::Liked,
            ("playlists", []) => Self::Playlists,
            ("playlist", ["new", name @ ..]) if !name.is_empty() => {
                Self::PlaylistNew(name.join(" "))
            }
            ("playlist", ["add", pid, tid]) => {
                Self::PlaylistAdd(PlaylistId::new(*pid), TrackId::new(*tid))
            }
            ("playlist", ["remove", pid, tid]) => {
                Self::PlaylistRemove(PlaylistId::new(*pid), TrackId::new(*tid))
            }
            ("playlist", ["delete", pid]) => Self::PlaylistDelete(PlaylistId::new(*pid)),
            ("playlist", ["show", pid]) => Self::PlaylistShow(PlaylistId::new(*pid)),
            ("playlist", ["play", pid]) => Self::PlaylistPlay(PlaylistId::new(*pid)),
            ("status", []) => Self::Status,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (name, _) => {
                return Err(match COMMAND_NAMES.iter().copied().find(|known| *known == name) {
                    Some(known) => CliError::invalid(known, "see `help` for usage"),
                    None => CliError::UnknownCommand(name.to_string()),
                })
            }
        };
        Ok(command)
    }
}

const COMMAND_NAMES: &[&str] = &[
    "play", "pause", "resume", "stop", "next", "prev", "seek", "volume", "mute", "unmute",
    "tick", "refuse", "queue", "enqueue", "dequeue", "stats", "catalog", "artists", "like", "liked",
    "playlists", "playlist", "status", "help", "quit", "exit",
];

/// `<title> | <artist> | <src> [| <album> [| <secs>]]`
///
/// Only the field count and the duration are checked here; blank required
/// fields are left for the session to reject.
fn parse_add_form(form: &str) -> Result<CreateTrack> {
    let fields: Vec<&str> = form.split('|').map(str::trim).collect();
    if !(3..=5).contains(&fields.len()) {
        return Err(CliError::invalid(
            "add",
            "expected <title> | <artist> | <src> [| <album> [| <secs>]]",
        ));
    }
    let duration_secs = match fields.get(4) {
        Some(secs) if !secs.is_empty() => parse_number("add", secs)?,
        _ => 0,
    };
    Ok(CreateTrack {
        title: fields[0].to_string(),
        artist: fields[1].to_string(),
        audio_src: fields[2].to_string(),
        album: fields.get(3).map(|s| s.to_string()).unwrap_or_default(),
        duration_secs,
        ..Default::default()
    })
}

fn parse_number<T: FromStr>(command: &'static str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::invalid(command, format!("not a number: {}", value)))
}

/// Whether the shell should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Shell over a session with a simulated output
pub struct Shell {
    session: Session<SimulatedOutput>,
    output: SimulatedOutput,
}

impl Shell {
    /// Build a shell from configuration, loading the catalog it names
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::sample(),
        };
        Ok(Self::new(
            catalog,
            config.playback.clone(),
            config.catalog.seed_queue,
        ))
    }

    pub fn new(catalog: Catalog, playback: PlaybackConfig, seed_queue: bool) -> Self {
        let output = SimulatedOutput::new(catalog.tracks());
        let mut session = Session::new(catalog, output.clone(), playback);
        if seed_queue {
            session.seed_queue_from_catalog();
        }
        // Startup events are not the user's doing
        session.drain_events();

        Self { session, output }
    }

    pub fn session(&self) -> &Session<SimulatedOutput> {
        &self.session
    }

    pub fn output(&self) -> &SimulatedOutput {
        &self.output
    }

    /// Read commands until input ends or `quit`
    ///
    /// Command errors are printed and do not stop the shell.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<()> {
        info!("Shell started");
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line, out) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue) => {}
                Err(CliError::Io(e)) => return Err(CliError::Io(e)),
                Err(e) => writeln!(out, "error: {}", e)?,
            }
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }

        info!("Shell finished");
        Ok(())
    }

    /// Execute one line; blank lines and `#` comments are skipped
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Outcome::Continue);
        }
        let command: Command = line.parse()?;
        self.execute(command, out)
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome> {
        debug!(?command, "Executing");
        let result = self.apply(command, out);
        // Events are printed even when the command failed part way
        self.print_events(out)?;
        result
    }

    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome> {
        match command {
            Command::Play(id) => self.session.play_track_by_id(&id)?,
            Command::Pause => self.session.pause(),
            Command::Resume => {
                if !self.session.resume() {
                    writeln!(out, "nothing to resume")?;
                }
            }
            Command::Stop => self.session.stop(),
            Command::Next => {
                if !self.session.next_track() {
                    writeln!(out, "nothing to skip to")?;
                }
            }
            Command::Prev => {
                if !self.session.prev_track() {
                    writeln!(out, "nothing to go back to")?;
                }
            }
            Command::Seek(secs) => self.session.seek_to(secs),
            Command::Volume(level) => self.session.set_volume(level),
            Command::Mute => {
                if !self.session.player().is_muted() {
                    self.session.toggle_mute();
                }
            }
            Command::Unmute => {
                if self.session.player().is_muted() {
                    self.session.toggle_mute();
                }
            }
            Command::Tick(secs) => {
                for event in self.output.tick(secs) {
                    self.session.handle_media_event(event);
                }
            }
            Command::Refuse(refuse) => {
                self.output.set_refuse_play(refuse);
                writeln!(out, "autoplay policy: {}", if refuse { "blocking" } else { "allowing" })?;
            }
            Command::Queue => self.print_queue(out)?,
            Command::Enqueue(id) => {
                if !self.session.add_to_queue_by_id(&id)? {
                    writeln!(out, "already queued: {}", id)?;
                }
            }
            Command::Dequeue(id) => {
                if !self.session.remove_from_queue(&id) {
                    writeln!(out, "not in queue: {}", id)?;
                }
            }
            Command::Add(form) => {
                let track = self.session.add_new_track(form)?;
                // Hand-added sources are playable for their nominal length
                self.output
                    .add_source(track.audio_src(), f64::from(track.duration_secs()));
                writeln!(out, "added {}", track.id())?;
            }
            Command::Stats => {
                let stats = self.session.queue_stats();
                writeln!(
                    out,
                    "{} songs, {} artists, {} albums",
                    stats.songs, stats.artists, stats.albums
                )?;
            }
            Command::Catalog => {
                for track in self.session.catalog().tracks() {
                    writeln!(out, "{}", format_track(track))?;
                }
            }
            Command::Artists => {
                for artist in self.session.catalog().artists() {
                    writeln!(out, "{}  {} ({} tracks)", artist.id, artist.name, artist.track_count)?;
                }
            }
            Command::Like(id) => {
                let liked = self.session.toggle_like_by_id(&id)?;
                writeln!(out, "{} {}", if liked { "liked" } else { "unliked" }, id)?;
            }
            Command::Liked => {
                for track in self.session.liked_tracks() {
                    writeln!(out, "{}", format_track(track))?;
                }
            }
            Command::Playlists => {
                for playlist in self.session.playlists().iter() {
                    writeln!(out, "{}  {} ({} tracks)", playlist.id, playlist.name, playlist.len())?;
                }
            }
            Command::PlaylistNew(name) => {
                let id = self.session.create_playlist(&name)?;
                writeln!(out, "created {}", id)?;
            }
            Command::PlaylistAdd(pid, tid) => {
                let track = self.session.try_find_track(&tid)?;
                if !self.session.try_add_to_playlist(&pid, &track)? {
                    writeln!(out, "already in playlist: {}", tid)?;
                }
            }
            Command::PlaylistRemove(pid, tid) => {
                self.session.playlists_mut().remove_track(&pid, &tid)?;
            }
            Command::PlaylistDelete(pid) => {
                let playlist = self.session.playlists_mut().delete(&pid)?;
                writeln!(out, "deleted {}", playlist.name)?;
            }
            Command::PlaylistShow(pid) => {
                let playlist = self
                    .session
                    .playlists()
                    .get(&pid)
                    .ok_or_else(|| CoreError::PlaylistNotFound(pid.clone()))?;
                writeln!(out, "{} ({})", playlist.name, format_duration(playlist.total_duration_secs() as f64))?;
                if let Some(description) = &playlist.description {
                    writeln!(out, "{}", description)?;
                }
                for track in playlist.tracks() {
                    writeln!(out, "{}", format_track(track))?;
                }
            }
            Command::PlaylistPlay(pid) => {
                self.session.queue_playlist(&pid)?;
                match self.session.queue().get(0).cloned() {
                    Some(first) => self.session.play_track(&first),
                    None => writeln!(out, "playlist is empty")?,
                }
            }
            Command::Status => self.print_status(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    fn print_queue<W: Write>(&self, out: &mut W) -> Result<()> {
        let current = self.session.state().current_track_id;
        if self.session.queue().is_empty() {
            writeln!(out, "queue is empty")?;
        }
        for track in self.session.queue().tracks() {
            let marker = if current.as_ref() == Some(track.id()) { "*" } else { " " };
            writeln!(out, "{} {}", marker, format_track(track))?;
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let state = self.session.state();
        let status = match state.status() {
            PlayerStatus::Idle => "idle",
            PlayerStatus::Paused => "paused",
            PlayerStatus::Playing => "playing",
        };
        match state
            .current_track_id
            .as_ref()
            .and_then(|id| self.session.find_track(id))
        {
            Some(track) => writeln!(
                out,
                "{}: {} - {} [{} / {}]",
                status,
                track.artist(),
                track.title(),
                format_duration(state.position_secs),
                format_duration(state.duration_secs),
            )?,
            None => writeln!(out, "{}", status)?,
        }
        writeln!(
            out,
            "volume {:.0}%{}",
            state.volume * 100.0,
            if state.muted { " (muted)" } else { "" }
        )?;
        if let Some(reason) = &state.load_error {
            writeln!(out, "load failed: {}", reason)?;
        }
        Ok(())
    }

    fn print_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for event in self.session.drain_events() {
            writeln!(out, "  {}", describe_event(&event))?;
        }
        Ok(())
    }
}

/// One-line rendering of a playback event
pub fn describe_event(event: &PlaybackEvent) -> String {
    match event {
        PlaybackEvent::StateChanged { status } => format!("state: {:?}", status).to_lowercase(),
        PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id: Some(previous),
        } => format!("track: {} -> {}", previous, track_id),
        PlaybackEvent::TrackChanged { track_id, .. } => format!("track: {}", track_id),
        PlaybackEvent::TrackFinished { track_id } => format!("finished: {}", track_id),
        PlaybackEvent::PositionChanged {
            position_secs,
            duration_secs,
        } => format!(
            "position: {} / {}",
            format_duration(*position_secs),
            format_duration(*duration_secs)
        ),
        PlaybackEvent::VolumeChanged { level, is_muted } => format!(
            "volume: {:.0}%{}",
            level * 100.0,
            if *is_muted { " (muted)" } else { "" }
        ),
        PlaybackEvent::QueueChanged { length } => format!("queue: {} tracks", length),
        PlaybackEvent::LoadRetry { track_id, attempt } => {
            format!("reloading {} (attempt {})", track_id, attempt)
        }
        PlaybackEvent::Error { message } => format!("error: {}", message),
    }
}

/// `m:ss`
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_track(track: &Track) -> String {
    format!(
        "{:>4}  {} - {} ({}) {}",
        track.id(),
        track.artist(),
        track.title(),
        track.album(),
        format_duration(f64::from(track.duration_secs())),
    )
}
