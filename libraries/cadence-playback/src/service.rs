//! Playback service
//!
//! Runs a [`PlaybackManager`] on its own tokio task. Commands (from any
//! number of [`PlaybackHandle`] clones) and decoder callbacks (from
//! [`DecoderEvents`]) share one queue, so the manager handles exactly one
//! input at a time and never sees interleaved mutations.

use crate::command::Command;
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::manager::PlaybackManager;
use crate::source::DecoderEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Input processed by the service task
#[derive(Debug)]
enum Input {
    Command(Command),
    Decoder(DecoderEvent),
    Shutdown,
}

/// Handle for sending commands to the service
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    input_tx: mpsc::UnboundedSender<Input>,
}

impl PlaybackHandle {
    /// Queue a command
    pub fn send(&self, command: Command) -> Result<()> {
        self.input_tx
            .send(Input::Command(command))
            .map_err(|_| PlaybackError::ServiceClosed)
    }

    /// Ask the service task to finish once queued inputs are handled
    pub fn shutdown(&self) -> Result<()> {
        self.input_tx
            .send(Input::Shutdown)
            .map_err(|_| PlaybackError::ServiceClosed)
    }

    /// Sender for decoder implementations
    pub fn decoder_events(&self) -> DecoderEvents {
        DecoderEvents {
            input_tx: self.input_tx.clone(),
        }
    }
}

/// Sender the decoder uses to report asynchronous outcomes
#[derive(Debug, Clone)]
pub struct DecoderEvents {
    input_tx: mpsc::UnboundedSender<Input>,
}

impl DecoderEvents {
    /// Report a decoder event (dropped silently once the service is gone)
    pub fn send(&self, event: DecoderEvent) {
        if self.input_tx.send(Input::Decoder(event)).is_err() {
            debug!("Playback service closed, decoder event dropped");
        }
    }
}

/// Create the input channel ahead of the manager
///
/// Decoders usually need their [`DecoderEvents`] sender at construction
/// time, before the manager that owns them exists.
pub fn channel() -> (PlaybackHandle, PendingService) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    (PlaybackHandle { input_tx }, PendingService { input_rx })
}

/// Receiving half of [`channel`], waiting for its manager
pub struct PendingService {
    input_rx: mpsc::UnboundedReceiver<Input>,
}

impl PendingService {
    /// Start the service task
    ///
    /// Returns the event stream and the task handle, which yields the manager
    /// back once the service shuts down.
    pub fn spawn(
        self,
        manager: PlaybackManager,
    ) -> (
        mpsc::UnboundedReceiver<PlaybackEvent>,
        JoinHandle<PlaybackManager>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(manager, self.input_rx, event_tx));
        (event_rx, task)
    }
}

/// Playback service entry point
pub struct PlaybackService;

impl PlaybackService {
    /// Spawn a manager whose decoder does not need a callback sender
    pub fn spawn(
        manager: PlaybackManager,
    ) -> (
        PlaybackHandle,
        mpsc::UnboundedReceiver<PlaybackEvent>,
        JoinHandle<PlaybackManager>,
    ) {
        let (handle, pending) = channel();
        let (events, task) = pending.spawn(manager);
        (handle, events, task)
    }
}

async fn run(
    mut manager: PlaybackManager,
    mut input_rx: mpsc::UnboundedReceiver<Input>,
    event_tx: mpsc::UnboundedSender<PlaybackEvent>,
) -> PlaybackManager {
    info!("Playback service started");

    while let Some(input) = input_rx.recv().await {
        match input {
            Input::Command(command) => manager.handle_command(command),
            Input::Decoder(event) => manager.handle_decoder_event(event),
            Input::Shutdown => break,
        }

        for event in manager.drain_events() {
            // Nobody listening is fine
            let _ = event_tx.send(event);
        }
    }

    info!(state = %manager.state(), "Playback service stopped");
    manager
}
