//! Transport and navigation commands
//!
//! The origin (hardware buttons, UI, remote control) is irrelevant; every
//! command enters the manager through [`crate::PlaybackManager::handle_command`].

use crate::types::{FocusChange, Track};
use std::time::Duration;

/// Commands accepted by the playback manager
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch to a specific track (registered in the catalog if new)
    PlayTrack(Track),

    /// Next playlist entry
    Next,

    /// Previous playlist entry
    Previous,

    /// Redo through history, else Next
    Forward,

    /// Step back through history
    Backward,

    /// Pause playback
    Pause,

    /// Resume playback (restarts the track if already playing)
    Resume,

    /// Stop playback and clear the current track
    Stop,

    /// Seek within the current track
    Seek(Duration),

    /// Replace the playlist
    SetPlaylist(Vec<Track>),

    /// Append a track to the playlist
    AddTrack(Track),

    /// Audio focus changed
    FocusChanged(FocusChange),

    /// Audio output is about to become noisy (headphones unplugged)
    BecomingNoisy,
}
