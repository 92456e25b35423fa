//! Cadence - scripted playback host
//!
//! Loads a playlist file, runs the playback service against a simulated
//! decoder and prints every emitted event as one JSON line.

mod decoder;
mod script;

use anyhow::Context;
use cadence_playback::{channel, Command, PlaybackConfig, PlaybackManager, Track};
use clap::Parser;
use decoder::SimulatedDecoder;
use script::Step;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Drive the Cadence playback core from a command script", long_about = None)]
struct Cli {
    /// Playlist file (JSON: {"tracks": [...]})
    #[arg(short, long)]
    playlist: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Simulated prepare latency in milliseconds
    #[arg(long, default_value_t = 50)]
    prepare_ms: u64,

    /// Simulated track length in milliseconds
    #[arg(long, default_value_t = 2_000)]
    track_ms: u64,

    /// Steps to run, e.g. `next wait:500 pause resume back stop`
    #[arg(required = true)]
    steps: Vec<String>,
}

#[derive(Deserialize)]
struct PlaylistFile {
    tracks: Vec<Track>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_playback=info,cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlaybackConfig::load(cli.config.as_deref())?;

    let raw = std::fs::read_to_string(&cli.playlist)
        .with_context(|| format!("reading {}", cli.playlist.display()))?;
    let playlist: PlaylistFile = serde_json::from_str(&raw).context("parsing playlist file")?;

    let steps = cli
        .steps
        .iter()
        .map(|s| s.parse::<Step>().and_then(|step| script::resolve(step, &playlist.tracks)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        tracks = playlist.tracks.len(),
        steps = steps.len(),
        history_size = config.history_size,
        "Starting playback session"
    );

    let (handle, pending) = channel();
    let decoder = SimulatedDecoder::new(
        handle.decoder_events(),
        Duration::from_millis(cli.prepare_ms),
        Duration::from_millis(cli.track_ms),
    );
    let manager = PlaybackManager::new(config, Box::new(decoder));
    let (mut events, task) = pending.spawn(manager);

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode event: {}", e),
            }
        }
    });

    handle.send(Command::SetPlaylist(playlist.tracks))?;
    for step in steps {
        match step {
            Step::Send(command) => handle.send(command)?,
            Step::Wait(duration) => tokio::time::sleep(duration).await,
            Step::Play(id) => anyhow::bail!("unresolved track {}", id),
        }
    }

    handle.shutdown()?;
    let manager = task.await.context("playback service panicked")?;
    printer.await.context("event printer panicked")?;

    tracing::info!(
        state = %manager.state(),
        track = ?manager.current_track_id(),
        history = manager.history().len(),
        "Session finished"
    );

    Ok(())
}
