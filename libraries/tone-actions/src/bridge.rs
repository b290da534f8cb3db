//! Audio Interface Bridge
//!
//! The audio engine reports what happened through [`EngineSignal`]s. The
//! bridge forwards each signal to the matching audio interface operation,
//! so the engine never needs to know about the dispatcher or the
//! normalizer.
//!
//! Signals can be forwarded one at a time with [`AudioInterfaceBridge::forward`],
//! or drained from a channel with [`AudioInterfaceBridge::pump`] when the
//! engine runs on its own thread.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::Receiver;
use tone_core::{EntityId, Track};

use crate::actions::Actions;
use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::error::Result;

/// A signal raised by the audio engine
///
/// Serializes as `{"signal": "trackFinish", "trackID": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "camelCase")]
pub enum EngineSignal {
    TrackError {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        error: Value,
    },
    TrackFinish {
        #[serde(rename = "trackID")]
        track_id: EntityId,
    },
    TrackLoadAmountChange {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        #[serde(rename = "bytesLoaded")]
        bytes_loaded: u64,
    },
    TrackPlayingChange {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
    TrackPlayPositionChange {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        position: f64,
    },
    TrackPlayStart {
        #[serde(rename = "trackID")]
        track_id: EntityId,
    },
    TrackReady {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        sound: Value,
    },
    /// Resolution of `track_id` finished
    TrackResolved {
        #[serde(rename = "trackID")]
        track_id: EntityId,
        tracks: Vec<Track>,
    },
    /// A sound was attached to `track`
    TrackSoundAdded { track: Track },
}

impl EngineSignal {
    /// The track the signal is about
    pub fn track_id(&self) -> &EntityId {
        match self {
            Self::TrackError { track_id, .. }
            | Self::TrackFinish { track_id }
            | Self::TrackLoadAmountChange { track_id, .. }
            | Self::TrackPlayingChange { track_id, .. }
            | Self::TrackPlayPositionChange { track_id, .. }
            | Self::TrackPlayStart { track_id }
            | Self::TrackReady { track_id, .. }
            | Self::TrackResolved { track_id, .. } => track_id,
            Self::TrackSoundAdded { track } => &track.id,
        }
    }
}

/// Forwards engine signals into [`Actions::audio_interface`]
pub struct AudioInterfaceBridge<'a, D, A> {
    actions: &'a mut Actions<D, A>,
}

impl<'a, D: Dispatcher, A: AudioInterface> AudioInterfaceBridge<'a, D, A> {
    pub fn new(actions: &'a mut Actions<D, A>) -> Self {
        Self { actions }
    }

    /// Forward a single signal
    pub fn forward(&mut self, signal: EngineSignal) -> Result<()> {
        tracing::trace!(track_id = %signal.track_id(), "Forwarding engine signal");

        let mut callbacks = self.actions.audio_interface();
        match signal {
            EngineSignal::TrackError { track_id, error } => {
                callbacks.on_track_error(track_id, error)
            }
            EngineSignal::TrackFinish { track_id } => callbacks.on_track_finish(track_id),
            EngineSignal::TrackLoadAmountChange {
                track_id,
                bytes_loaded,
            } => callbacks.on_track_load_amount_change(track_id, bytes_loaded),
            EngineSignal::TrackPlayingChange {
                track_id,
                is_playing,
            } => callbacks.on_track_playing_change(track_id, is_playing),
            EngineSignal::TrackPlayPositionChange { track_id, position } => {
                callbacks.on_track_play_position_change(track_id, position)
            }
            EngineSignal::TrackPlayStart { track_id } => callbacks.on_track_play_start(track_id),
            EngineSignal::TrackReady { track_id, sound } => {
                callbacks.on_track_ready(track_id, sound)
            }
            EngineSignal::TrackResolved { track_id, tracks } => {
                callbacks.on_track_resolved(track_id, &tracks)
            }
            EngineSignal::TrackSoundAdded { track } => callbacks.on_track_sound_added(track),
        }
    }

    /// Forward every signal currently waiting on `signals` without blocking
    ///
    /// Stops at the first signal that fails to forward; signals after it
    /// stay queued. Returns how many were forwarded.
    pub fn pump(&mut self, signals: &Receiver<EngineSignal>) -> Result<usize> {
        let mut forwarded = 0;
        for signal in signals.try_iter() {
            self.forward(signal)?;
            forwarded += 1;
        }

        if forwarded > 0 {
            tracing::debug!(forwarded, "Drained engine signals");
        }
        Ok(forwarded)
    }
}
