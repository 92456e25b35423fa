//! Cadence - Playback Control
//!
//! Platform-agnostic control core for a streaming audio player.
//!
//! This crate provides:
//! - Track catalog (metadata by ID)
//! - Ordered playlist with a current-position cursor
//! - Bounded playback history with a replay cursor (back/forward)
//! - Navigation (next, previous, forward, backward, jump)
//! - Decoder lifecycle state machine with stale-callback rejection
//! - Audio focus and "becoming noisy" handling
//! - Presentation sinks and status observers
//!
//! # Architecture
//!
//! `cadence-playback` never touches audio itself:
//! - Decoding and output are behind the [`Decoder`] trait
//! - Lock screen / notification updates go through [`SessionSink`]
//! - Host UIs observe through [`StatusObserver`] or [`PlaybackEvent`]s
//!
//! # Example: Navigation
//!
//! ```rust
//! use cadence_playback::{
//!     Decoder, PlaybackConfig, PlaybackManager, PlayerState, PrepareTicket, SourceError, Track,
//! };
//! use std::time::Duration;
//!
//! struct Silent;
//!
//! impl Decoder for Silent {
//!     fn set_source(&mut self, _url: &str) -> Result<(), SourceError> {
//!         Ok(())
//!     }
//!     fn prepare_async(&mut self, _ticket: PrepareTicket) {}
//!     fn start(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn reset(&mut self) {}
//!     fn seek_to(&mut self, _position: Duration) {}
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn is_playing(&self) -> bool {
//!         false
//!     }
//!     fn set_volume(&mut self, _volume: f32) {}
//! }
//!
//! let mut manager = PlaybackManager::new(PlaybackConfig::default(), Box::new(Silent));
//! manager.set_playlist(vec![
//!     Track::new(1, "One", "Artist", Duration::from_secs(200), "http://music/1.mp3"),
//!     Track::new(2, "Two", "Artist", Duration::from_secs(180), "http://music/2.mp3"),
//! ]);
//!
//! manager.next();
//! manager.next();
//! manager.backward();
//!
//! assert_eq!(manager.current_track().map(|t| t.name.as_str()), Some("One"));
//! assert_eq!(manager.state(), PlayerState::Preparing);
//! ```

mod catalog;
mod command;
mod config;
mod error;
mod events;
mod history;
mod manager;
mod navigation;
mod playlist;
mod service;
mod source;
pub mod types;

// Public exports
pub use catalog::TrackCatalog;
pub use command::Command;
pub use config::PlaybackConfig;
pub use error::{PlaybackError, Result, SourceError};
pub use events::{PlaybackEvent, SessionSink, StatusObserver};
pub use history::{History, DEFAULT_HISTORY_SIZE};
pub use manager::PlaybackManager;
pub use navigation::{MoveKind, Navigation, NavigationEngine, Resolution};
pub use playlist::Playlist;
pub use service::{channel, DecoderEvents, PendingService, PlaybackHandle, PlaybackService};
pub use source::{Decoder, DecoderEvent, PrepareTicket};
pub use types::{FocusChange, PlayerState, Track, TrackId};
