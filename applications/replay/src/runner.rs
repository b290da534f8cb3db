//! Script runner
//!
//! Executes script steps through the action surface and writes what the
//! store and the engine would have observed, one JSON document per line.
//! Within a step the dispatched event always precedes any side effect, so
//! draining both recorders after each step keeps the output in call order.

use crate::config::OutputSettings;
use crate::error::{ReplayError, Result};
use crate::script::{Command, ScriptStep};
use serde::Serialize;
use std::io::Write;
use tone_actions::{ActionEvent, Actions, ActionsConfig, AudioCall};

/// Counters for a finished replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub events: usize,
    pub side_effects: usize,
}

#[derive(Serialize)]
struct SideEffectLine<'a> {
    #[serde(rename = "sideEffect")]
    side_effect: &'a AudioCall,
}

/// Replays steps and writes the observed output to `out`
pub struct Replay<W> {
    actions: Actions<Vec<ActionEvent>, Vec<AudioCall>>,
    output: OutputSettings,
    out: W,
    summary: ReplaySummary,
}

impl<W: Write> Replay<W> {
    pub fn new(actions: ActionsConfig, output: OutputSettings, out: W) -> Self {
        Self {
            actions: Actions::with_config(Vec::new(), Vec::new(), actions),
            output,
            out,
            summary: ReplaySummary::default(),
        }
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(&mut self, steps: &[ScriptStep]) -> Result<ReplaySummary> {
        for (index, step) in steps.iter().enumerate() {
            self.step(index, step.clone())?;
        }

        self.out.flush()?;
        Ok(self.summary)
    }

    /// Run a single step and write its output
    pub fn step(&mut self, index: usize, step: ScriptStep) -> Result<()> {
        tracing::debug!(index, "Running step");

        let outcome = match step {
            ScriptStep::Command(command) => self.execute(command),
            ScriptStep::Signal(signal) => self.actions.bridge().forward(signal),
        };
        outcome.map_err(|source| ReplayError::Step { index, source })?;

        let events = std::mem::take(self.actions.dispatcher_mut());
        let calls = std::mem::take(self.actions.audio_mut());

        for event in &events {
            self.write_line(event)?;
        }
        if self.output.include_side_effects {
            for call in &calls {
                self.write_line(&SideEffectLine { side_effect: call })?;
            }
        }

        self.summary.steps += 1;
        self.summary.events += events.len();
        self.summary.side_effects += calls.len();
        Ok(())
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn execute(&mut self, command: Command) -> tone_actions::Result<()> {
        match command {
            Command::CreatePlayer { player } => self.actions.player().create(player),
            Command::DestroyPlayer { player_id } => self.actions.player().destroy(player_id),
            Command::NextTrack { player_id } => self.actions.player().next_track(player_id),
            Command::PreviousTrack { player_id } => {
                self.actions.player().previous_track(player_id)
            }
            Command::SetRepeat { repeat } => self.actions.player().set_repeat(repeat),
            Command::SetVolume { level } => self.actions.player().set_volume(level),
            Command::UpdatePlayer { player_id, params } => {
                self.actions.player().update(player_id, params)
            }
            Command::QueueTrack { track, index } => self.actions.queue().queue_track(&track, index),
            Command::SetDefaultTracks { tracks } => {
                self.actions.queue().set_default_tracks(&tracks)
            }
            Command::UnqueueIndex { index } => self.actions.queue().unqueue_index(index),
            Command::SeekTo { track, position } => self.actions.track().seek_to(&track, position),
            Command::Select { track } => self.actions.track().select(&track),
            Command::TogglePause { track, paused } => {
                self.actions.track().toggle_pause(&track, paused)
            }
        }
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.output.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}
