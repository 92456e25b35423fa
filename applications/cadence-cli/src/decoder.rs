//! Simulated decoder
//!
//! Stands in for a platform media player: preparation takes a fixed delay,
//! playback runs on a wall clock and reports completion when the track's
//! length has elapsed. Callbacks go back through [`DecoderEvents`].

use cadence_playback::{Decoder, DecoderEvent, DecoderEvents, PrepareTicket, SourceError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

pub struct SimulatedDecoder {
    events: DecoderEvents,
    prepare_delay: Duration,
    track_length: Duration,

    ticket: Option<PrepareTicket>,
    offset: Duration,
    started_at: Option<Instant>,
    volume: f32,

    // Pending prepare/completion callback
    timer: Option<JoinHandle<()>>,
}

impl SimulatedDecoder {
    pub fn new(events: DecoderEvents, prepare_delay: Duration, track_length: Duration) -> Self {
        Self {
            events,
            prepare_delay,
            track_length,
            ticket: None,
            offset: Duration::ZERO,
            started_at: None,
            volume: 1.0,
            timer: None,
        }
    }

    fn schedule(&mut self, delay: Duration, event: DecoderEvent) {
        self.cancel_timer();

        let events = self.events.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            events.send(event);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn schedule_completion(&mut self) {
        if let Some(ticket) = self.ticket {
            let remaining = self.track_length.saturating_sub(self.offset);
            self.schedule(remaining, DecoderEvent::Completed { ticket });
        }
    }
}

impl Decoder for SimulatedDecoder {
    fn set_source(&mut self, url: &str) -> Result<(), SourceError> {
        url::Url::parse(url)
            .map(|_| ())
            .map_err(|e| SourceError::new(format!("cannot open '{}': {}", url, e)))
    }

    fn prepare_async(&mut self, ticket: PrepareTicket) {
        self.ticket = Some(ticket);
        self.offset = Duration::ZERO;
        // Prepare callbacks are never aborted; superseded ones arrive stale
        let events = self.events.clone();
        let delay = self.prepare_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            events.send(DecoderEvent::Prepared { ticket });
        });
    }

    fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.schedule_completion();
    }

    fn pause(&mut self) {
        self.offset = self.position();
        self.started_at = None;
        self.cancel_timer();
    }

    fn stop(&mut self) {
        self.started_at = None;
        self.cancel_timer();
    }

    fn reset(&mut self) {
        self.ticket = None;
        self.offset = Duration::ZERO;
    }

    fn seek_to(&mut self, position: Duration) {
        self.offset = position.min(self.track_length);
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
            self.schedule_completion();
        }
    }

    fn position(&self) -> Duration {
        let elapsed = self.started_at.map_or(Duration::ZERO, |t| t.elapsed());
        (self.offset + elapsed).min(self.track_length)
    }

    fn duration(&self) -> Option<Duration> {
        self.ticket.map(|_| self.track_length)
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    fn set_volume(&mut self, volume: f32) {
        debug!(from = self.volume, to = volume, "Volume changed");
        self.volume = volume;
    }
}

impl Drop for SimulatedDecoder {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
