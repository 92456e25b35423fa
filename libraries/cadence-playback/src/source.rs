//! Platform decoder boundary
//!
//! Abstracts the decoder/renderer the manager drives (a platform media player,
//! a Symphonia pipeline, a test double). Its asynchronous callbacks come back
//! as [`DecoderEvent`]s tagged with the [`PrepareTicket`] they answer.

use crate::error::SourceError;
use crate::types::TrackId;
use std::time::Duration;

/// Tag attached to every prepare request
///
/// The generation is bumped on every track change, so a completion for a
/// superseded request never matches the live ticket, even when the same track
/// has been selected again since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrepareTicket {
    /// Track the request was issued for
    pub track: TrackId,

    /// Request generation
    pub generation: u64,
}

/// Asynchronous notification from the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderEvent {
    /// Preparation finished, playback can start
    Prepared { ticket: PrepareTicket },

    /// Playback reached the end of the track
    Completed { ticket: PrepareTicket },

    /// The decoder failed
    Failed {
        ticket: PrepareTicket,
        code: i32,
        detail: String,
    },
}

impl DecoderEvent {
    /// Ticket this event answers
    pub fn ticket(&self) -> PrepareTicket {
        match self {
            DecoderEvent::Prepared { ticket }
            | DecoderEvent::Completed { ticket }
            | DecoderEvent::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Platform decoder/renderer
///
/// Exclusively owned by the playback manager. Methods must not block:
/// [`Decoder::prepare_async`] only issues the request, and the outcome arrives
/// later as a [`DecoderEvent`] carrying the same ticket.
#[cfg_attr(test, mockall::automock)]
pub trait Decoder: Send {
    /// Point the decoder at a media URL
    ///
    /// # Returns
    /// * `Ok(())` - Source accepted
    /// * `Err(_)` - Source unreadable, with the reason
    fn set_source(&mut self, url: &str) -> Result<(), SourceError>;

    /// Start preparing the current source
    fn prepare_async(&mut self, ticket: PrepareTicket);

    /// Start or resume output
    fn start(&mut self);

    /// Pause output
    fn pause(&mut self);

    /// Stop output
    fn stop(&mut self);

    /// Release the current source
    fn reset(&mut self);

    /// Seek within the current source
    fn seek_to(&mut self, position: Duration);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration of the prepared source, if known
    fn duration(&self) -> Option<Duration>;

    /// Whether output is running
    fn is_playing(&self) -> bool;

    /// Output volume in [0.0, 1.0]
    fn set_volume(&mut self, volume: f32);
}
