//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Track identifier
///
/// The sole cross-reference key between catalog, playlist and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u64);

impl TrackId {
    /// Create a new track ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Track metadata
///
/// Immutable once created. The catalog owns one copy per ID; everything else
/// refers to tracks by [`TrackId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Track duration as reported by the host
    #[serde(with = "duration_ms")]
    pub duration: Duration,

    /// Media URL handed to the decoder
    pub url: String,

    /// Artwork URL, passed through to the session sink untouched
    #[serde(default)]
    pub artwork_url: Option<String>,
}

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        name: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            duration,
            url: url.into(),
            artwork_url: None,
        }
    }

    /// Attach an artwork URL
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }
}

/// Player lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing has been loaded yet
    Idle,

    /// Source set on the decoder, preparation not yet requested
    Initialized,

    /// Waiting for the decoder to finish preparing
    Preparing,

    /// Decoder prepared, not playing
    Prepared,

    /// Playing
    Started,

    /// Paused mid-track
    Paused,

    /// Decode session torn down
    Stopped,

    /// Source unreadable or decoder fault
    Error,
}

impl PlayerState {
    /// Stable numeric status code for hosts that consume integers
    ///
    /// Code 7 (playback completed) and 9 (end) are never produced.
    pub fn code(self) -> i32 {
        match self {
            PlayerState::Idle => 0,
            PlayerState::Initialized => 1,
            PlayerState::Preparing => 2,
            PlayerState::Prepared => 3,
            PlayerState::Started => 4,
            PlayerState::Stopped => 5,
            PlayerState::Paused => 6,
            PlayerState::Error => 8,
        }
    }

    /// Whether the decoder holds a prepared session (seek/resume allowed)
    pub fn is_prepared(self) -> bool {
        matches!(
            self,
            PlayerState::Prepared | PlayerState::Started | PlayerState::Paused
        )
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Audio focus change reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusChange {
    /// Focus regained
    Gain,

    /// Focus lost for an unbounded time
    Loss,

    /// Focus lost briefly
    LossTransient,

    /// Focus lost briefly, lowering volume is acceptable
    LossTransientCanDuck,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
