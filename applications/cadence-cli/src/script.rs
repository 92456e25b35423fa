//! Command script parsing
//!
//! A script is a list of whitespace-separated steps such as
//! `next wait:500 pause resume seek:30 back forward stop`.

use anyhow::{anyhow, bail, Context};
use cadence_playback::{Command, FocusChange, Track, TrackId};
use std::str::FromStr;
use std::time::Duration;

/// One script step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Send a command to the service
    Send(Command),

    /// Jump to a track from the loaded playlist file
    Play(TrackId),

    /// Let the simulated decoder run
    Wait(Duration),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (s, None),
        };

        let step = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("next", None) => Step::Send(Command::Next),
            ("prev" | "previous", None) => Step::Send(Command::Previous),
            ("forward" | "fwd", None) => Step::Send(Command::Forward),
            ("back" | "backward", None) => Step::Send(Command::Backward),
            ("pause", None) => Step::Send(Command::Pause),
            ("resume" | "play", None) => Step::Send(Command::Resume),
            ("stop", None) => Step::Send(Command::Stop),
            ("noisy", None) => Step::Send(Command::BecomingNoisy),
            ("seek", Some(secs)) => {
                let secs: f64 = secs.parse().context("seek takes seconds")?;
                let position = Duration::try_from_secs_f64(secs)
                    .context("seek position must be a non-negative number of seconds")?;
                Step::Send(Command::Seek(position))
            }
            ("wait", Some(ms)) => {
                Step::Wait(Duration::from_millis(ms.parse().context("wait takes milliseconds")?))
            }
            ("play", Some(id)) => {
                Step::Play(TrackId::new(id.parse().context("play takes a track id")?))
            }
            ("focus", Some(change)) => Step::Send(Command::FocusChanged(parse_focus(change)?)),
            _ => bail!("unknown step '{}'", s),
        };

        Ok(step)
    }
}

fn parse_focus(s: &str) -> anyhow::Result<FocusChange> {
    match s {
        "gain" => Ok(FocusChange::Gain),
        "loss" => Ok(FocusChange::Loss),
        "transient" => Ok(FocusChange::LossTransient),
        "duck" => Ok(FocusChange::LossTransientCanDuck),
        other => Err(anyhow!("unknown focus change '{}'", other)),
    }
}

/// Resolve a step against the loaded playlist
pub fn resolve(step: Step, tracks: &[Track]) -> anyhow::Result<Step> {
    match step {
        Step::Play(id) => {
            let track = tracks
                .iter()
                .find(|t| t.id == id)
                .with_context(|| format!("track {} is not in the playlist file", id))?;
            Ok(Step::Send(Command::PlayTrack(track.clone())))
        }
        other => Ok(other),
    }
}
