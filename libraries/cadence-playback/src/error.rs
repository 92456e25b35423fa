//! Error types for playback control

use crate::types::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The decoder could not open the track's source
    #[error("Source unreadable for track {track}: {reason}")]
    SourceUnreadable { track: TrackId, reason: String },

    /// The decoder reported an asynchronous error
    #[error("Decoder fault on track {track} (code {code}): {detail}")]
    DecoderFault {
        track: TrackId,
        code: i32,
        detail: String,
    },

    /// Command not valid in the current state
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Decoder event for a superseded prepare request
    #[error("Stale completion for track {track} (generation {generation})")]
    StaleCompletion { track: TrackId, generation: u64 },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// The playback service task is no longer running
    #[error("Playback service closed")]
    ServiceClosed,
}

impl PlaybackError {
    /// Track the error refers to, if any
    pub fn track(&self) -> Option<TrackId> {
        match self {
            PlaybackError::SourceUnreadable { track, .. }
            | PlaybackError::DecoderFault { track, .. }
            | PlaybackError::StaleCompletion { track, .. } => Some(*track),
            _ => None,
        }
    }
}


/// Why a decoder refused a source
///
/// Returned by [`crate::Decoder::set_source`]; the manager attaches the track
/// and reports it as [`PlaybackError::SourceUnreadable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SourceError {
    pub reason: String,
}

impl SourceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
