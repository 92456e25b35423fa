//! Playback Events
//!
//! Notifications emitted after every committed transition:
//! - Lifecycle state changes (with the position at that moment)
//! - Current track changes
//! - Playlist changes
//! - Errors (source unreadable, decoder fault)
//!
//! Hosts either register [`SessionSink`]/[`StatusObserver`] implementations,
//! which are called synchronously, or consume [`PlaybackEvent`]s from the
//! manager's event queue / the service's event channel.

use crate::error::PlaybackError;
use crate::types::{PlayerState, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Lifecycle state changed
    StateChanged {
        /// The new state
        state: PlayerState,
        /// Decoder position when the transition was committed
        position_ms: u64,
    },

    /// Current track changed
    TrackChanged {
        /// The new current track (`None` after stop)
        track: Option<Track>,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Playlist replaced or extended
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Error reported outward
    Error {
        /// Track the error refers to
        track_id: Option<TrackId>,
        /// Error message
        message: String,
    },
}

/// Presentation sink (notifications, lock screen, media session)
///
/// Both methods default to no-ops.
pub trait SessionSink: Send {
    /// Called on every lifecycle transition
    fn playback_state(&mut self, _state: PlayerState, _position: Duration) {}

    /// Called whenever a new track becomes current
    fn metadata(&mut self, _track: &Track) {}
}

/// Host application observer
///
/// All methods default to no-ops.
pub trait StatusObserver: Send {
    /// Called on every lifecycle state change
    fn on_status_changed(&mut self, _state: PlayerState) {}

    /// Called on every current track change
    fn on_current_track_changed(&mut self, _track: Option<&Track>) {}

    /// Called when a source or decoder error moves the player to `Error`
    fn on_error(&mut self, _error: &PlaybackError) {}
}
