//! Playback manager - core orchestration
//!
//! Owns the current track pointer, the lifecycle state and the decoder, and
//! turns navigation resolutions into decode sessions.
//!
//! State machine:
//!
//! ```text
//!   Idle ──make_current──> Initialized ──set_source ok──> Preparing
//!                               │                             │ Prepared(ticket)
//!                        set_source err                       v
//!                               v                  Prepared ──autoplay──> Started <──> Paused
//!                             Error <──── Failed(ticket) ─────────────────────┘
//!   any ──stop / make_current(None)──> Stopped
//! ```

use crate::{
    catalog::TrackCatalog,
    command::Command,
    config::PlaybackConfig,
    error::PlaybackError,
    events::{PlaybackEvent, SessionSink, StatusObserver},
    history::History,
    navigation::{Navigation, NavigationEngine},
    playlist::Playlist,
    source::{Decoder, DecoderEvent, PrepareTicket},
    types::{FocusChange, PlayerState, Track, TrackId},
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Central playback management
///
/// All mutation goes through `&mut self`; hosts that receive commands and
/// decoder callbacks from several threads wrap the manager in
/// [`crate::PlaybackService`], which serializes both onto one task.
pub struct PlaybackManager {
    // State
    state: PlayerState,
    current: Option<TrackId>,

    // Catalog, playlist and history
    navigation: NavigationEngine,

    // Decoder and the prepare request it is working on
    decoder: Box<dyn Decoder>,
    ticket: Option<PrepareTicket>,
    generation: u64,

    config: PlaybackConfig,

    // Outward notification
    session_sinks: Vec<Box<dyn SessionSink>>,
    observers: Vec<Box<dyn StatusObserver>>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager
    pub fn new(config: PlaybackConfig, decoder: Box<dyn Decoder>) -> Self {
        Self {
            state: PlayerState::Idle,
            current: None,
            navigation: NavigationEngine::new(config.history_size),
            decoder,
            ticket: None,
            generation: 0,
            config,
            session_sinks: Vec::new(),
            observers: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Register a presentation sink
    pub fn add_session_sink(&mut self, sink: Box<dyn SessionSink>) {
        self.session_sinks.push(sink);
    }

    /// Register a host observer
    pub fn add_observer(&mut self, observer: Box<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    // ===== Entry points =====

    /// Process one command
    pub fn handle_command(&mut self, command: Command) {
        debug!(?command, state = %self.state, "Handling command");

        match command {
            Command::PlayTrack(track) => self.play_track(track),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Forward => self.forward(),
            Command::Backward => self.backward(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::Seek(position) => self.seek_to(position),
            Command::SetPlaylist(tracks) => self.set_playlist(tracks),
            Command::AddTrack(track) => self.add_track(track),
            Command::FocusChanged(change) => self.focus_changed(change),
            Command::BecomingNoisy => self.becoming_noisy(),
        }
    }

    /// Process one decoder notification
    ///
    /// Events whose ticket is not the live prepare request are stale and
    /// discarded.
    pub fn handle_decoder_event(&mut self, event: DecoderEvent) {
        let ticket = event.ticket();
        if self.ticket != Some(ticket) {
            let stale = PlaybackError::StaleCompletion {
                track: ticket.track,
                generation: ticket.generation,
            };
            debug!(live = ?self.ticket, "{}", stale);
            return;
        }

        match event {
            DecoderEvent::Prepared { .. } => self.on_prepared(),
            DecoderEvent::Completed { .. } => self.on_completed(),
            DecoderEvent::Failed { code, detail, .. } => {
                self.ticket = None;
                self.transition(PlayerState::Error, Duration::ZERO);
                self.report_error(PlaybackError::DecoderFault {
                    track: ticket.track,
                    code,
                    detail,
                });
            }
        }
    }

    // ===== Navigation =====

    /// Skip to next playlist entry
    pub fn next(&mut self) {
        self.navigate(Navigation::Next);
    }

    /// Go to previous playlist entry
    pub fn previous(&mut self) {
        self.navigate(Navigation::Previous);
    }

    /// Redo through history, falling back to next
    pub fn forward(&mut self) {
        self.navigate(Navigation::Forward);
    }

    /// Step back through history
    pub fn backward(&mut self) {
        self.navigate(Navigation::Backward);
    }

    /// Switch to a specific track
    pub fn play_track(&mut self, track: Track) {
        let id = track.id;
        self.navigation.register(track);
        self.navigate(Navigation::Jump(id));
    }

    /// Replace the playlist
    ///
    /// Clears history and prunes the catalog. The current track and the
    /// lifecycle state are left alone.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        let evicted = self.navigation.install_playlist(tracks, self.current);
        let length = self.navigation.playlist().len();

        info!(length, evicted, "Playlist installed");
        self.pending_events.push(PlaybackEvent::PlaylistChanged { length });
    }

    /// Append a track to the playlist
    pub fn add_track(&mut self, track: Track) {
        self.navigation.add_track(track, self.current);
        let length = self.navigation.playlist().len();
        self.pending_events.push(PlaybackEvent::PlaylistChanged { length });
    }

    fn navigate(&mut self, navigation: Navigation) {
        match self.navigation.resolve(navigation, self.current) {
            Some(resolution) => self.make_current(Some(resolution.target)),
            None => debug!(?navigation, "Nothing to navigate to"),
        }
    }

    // ===== State machine =====

    /// Make a track current
    ///
    /// Any loaded decode session is torn down first, whatever the target.
    /// `None`, or an ID missing from the catalog, stops playback. Otherwise the
    /// pointer moves to the track immediately and a prepare request is issued;
    /// the outcome arrives later as a [`DecoderEvent`].
    pub fn make_current(&mut self, target: Option<TrackId>) {
        let previous = self.current;

        if self.state != PlayerState::Idle {
            self.decoder.stop();
            self.decoder.reset();
        }

        // Invalidates any in-flight prepare request
        self.ticket = None;
        self.generation = self.generation.wrapping_add(1);

        let track = target.and_then(|id| self.navigation.track(id).cloned());
        let Some(track) = track else {
            if let Some(id) = target {
                warn!(track = %id, "Track not in catalog, stopping");
            }
            self.current = None;
            if previous.is_some() {
                self.emit_track_changed(None, previous);
            }
            self.transition(PlayerState::Stopped, Duration::ZERO);
            return;
        };

        self.transition(PlayerState::Initialized, Duration::ZERO);

        self.current = Some(track.id);
        self.navigation.sync_playlist(track.id);
        if previous != Some(track.id) {
            self.emit_track_changed(Some(&track), previous);
        }

        if let Err(e) = self.decoder.set_source(&track.url) {
            self.transition(PlayerState::Error, Duration::ZERO);
            self.report_error(PlaybackError::SourceUnreadable {
                track: track.id,
                reason: e.reason,
            });
            return;
        }

        let ticket = PrepareTicket {
            track: track.id,
            generation: self.generation,
        };
        self.ticket = Some(ticket);
        self.decoder.prepare_async(ticket);

        info!(track = %track.id, name = %track.name, "Preparing track");
        self.transition(PlayerState::Preparing, Duration::ZERO);
    }

    fn on_prepared(&mut self) {
        if self.state != PlayerState::Preparing {
            debug!(state = %self.state, "Ignoring duplicate prepared notification");
            return;
        }

        self.transition(PlayerState::Prepared, Duration::ZERO);

        if self.config.autoplay {
            self.decoder.start();
            self.transition(PlayerState::Started, Duration::ZERO);
        }
    }

    fn on_completed(&mut self) {
        info!(track = ?self.current, "Track completed");

        match self.navigation.resolve(Navigation::Next, self.current) {
            Some(resolution) => self.make_current(Some(resolution.target)),
            None => {
                // End of playlist: the session is over but the pointer stays
                self.ticket = None;
                self.decoder.stop();
                self.transition(PlayerState::Stopped, Duration::ZERO);
            }
        }
    }

    // ===== Transport =====

    /// Pause playback (only while started)
    pub fn pause(&mut self) {
        if self.state != PlayerState::Started {
            debug!(state = %self.state, "Pause ignored");
            return;
        }

        self.decoder.pause();
        let position = self.decoder.position();
        self.transition(PlayerState::Paused, position);
    }

    /// Resume playback
    ///
    /// From `Paused` or `Prepared` the existing session continues. While
    /// already started, the track restarts from zero.
    pub fn resume(&mut self) {
        match self.state {
            PlayerState::Started => {
                self.decoder.seek_to(Duration::ZERO);
                self.transition(PlayerState::Started, Duration::ZERO);
            }
            PlayerState::Paused | PlayerState::Prepared => {
                self.decoder.start();
                let position = self.decoder.position();
                self.transition(PlayerState::Started, position);
            }
            state => debug!(%state, "Resume ignored"),
        }
    }

    /// Stop playback and clear the current track
    pub fn stop(&mut self) {
        self.make_current(None);
    }

    /// Seek within the current track (only when prepared)
    pub fn seek_to(&mut self, position: Duration) {
        if !self.state.is_prepared() {
            debug!(state = %self.state, ?position, "Seek ignored");
            return;
        }

        self.decoder.seek_to(position);
    }

    // ===== Audio focus =====

    /// React to an audio focus change
    pub fn focus_changed(&mut self, change: FocusChange) {
        debug!(?change, "Audio focus changed");

        match change {
            FocusChange::Loss => {
                if self.decoder.is_playing() {
                    self.stop();
                }
            }
            FocusChange::LossTransient => self.pause(),
            FocusChange::LossTransientCanDuck => {
                self.decoder.set_volume(self.config.duck_volume);
            }
            FocusChange::Gain => {
                if !self.decoder.is_playing() {
                    self.resume();
                }
                self.decoder.set_volume(1.0);
            }
        }
    }

    /// Pause when output is about to become noisy
    pub fn becoming_noisy(&mut self) {
        if self.decoder.is_playing() {
            self.pause();
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_track_id(&self) -> Option<TrackId> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|id| self.navigation.track(id))
    }

    /// Playlist index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.navigation.playlist().current_index()
    }

    pub fn has_next(&self) -> bool {
        self.navigation.playlist().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.navigation.playlist().has_previous()
    }

    /// Decoder position (zero unless prepared)
    pub fn position(&self) -> Duration {
        if self.state.is_prepared() {
            self.decoder.position()
        } else {
            Duration::ZERO
        }
    }

    /// Decoder duration of the current track (only when prepared)
    pub fn duration(&self) -> Option<Duration> {
        if self.state.is_prepared() {
            self.decoder.duration()
        } else {
            None
        }
    }

    pub fn playlist(&self) -> &Playlist {
        self.navigation.playlist()
    }

    pub fn history(&self) -> &History {
        self.navigation.history()
    }

    pub fn catalog(&self) -> &TrackCatalog {
        self.navigation.catalog()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Events =====

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Commit a lifecycle transition, then notify
    ///
    /// Session sinks hear about every transition (a restart re-announces
    /// `Started` at zero); observers only about actual state changes.
    fn transition(&mut self, state: PlayerState, position: Duration) {
        let changed = state != self.state;
        self.state = state;

        debug!(%state, position_ms = position.as_millis() as u64, "State transition");

        for sink in &mut self.session_sinks {
            sink.playback_state(state, position);
        }
        if changed {
            for observer in &mut self.observers {
                observer.on_status_changed(state);
            }
        }

        self.pending_events.push(PlaybackEvent::StateChanged {
            state,
            position_ms: position.as_millis() as u64,
        });
    }

    fn emit_track_changed(&mut self, track: Option<&Track>, previous: Option<TrackId>) {
        if let Some(track) = track {
            for sink in &mut self.session_sinks {
                sink.metadata(track);
            }
        }
        for observer in &mut self.observers {
            observer.on_current_track_changed(track);
        }

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track: track.cloned(),
            previous_track_id: previous,
        });
    }

    fn report_error(&mut self, error: PlaybackError) {
        warn!(%error, "Playback error");

        for observer in &mut self.observers {
            observer.on_error(&error);
        }

        self.pending_events.push(PlaybackEvent::Error {
            track_id: error.track(),
            message: error.to_string(),
        });
    }
}
