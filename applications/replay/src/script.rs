//! Replay scripts
//!
//! A script is a JSON array of steps. Each step is either a UI command,
//! tagged by `op`, or an engine signal, tagged by `signal`:
//!
//! ```json
//! [
//!   { "op": "player.create", "player": { "id": "p1", "tracks": [{ "id": "t1" }] } },
//!   { "signal": "trackPlayStart", "trackID": "t1" }
//! ]
//! ```

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tone_actions::EngineSignal;
use tone_core::{EntityId, Player, PlayerUpdate, Track};

/// A UI command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Command {
    #[serde(rename = "player.create")]
    CreatePlayer { player: Player },

    #[serde(rename = "player.destroy")]
    DestroyPlayer {
        #[serde(rename = "playerID")]
        player_id: EntityId,
    },

    #[serde(rename = "player.nextTrack")]
    NextTrack {
        #[serde(rename = "playerID")]
        player_id: EntityId,
    },

    #[serde(rename = "player.previousTrack")]
    PreviousTrack {
        #[serde(rename = "playerID")]
        player_id: EntityId,
    },

    #[serde(rename = "player.setRepeat")]
    SetRepeat {
        #[serde(default)]
        repeat: Option<bool>,
    },

    #[serde(rename = "player.setVolume")]
    SetVolume { level: f64 },

    #[serde(rename = "player.update")]
    UpdatePlayer {
        #[serde(rename = "playerID")]
        player_id: EntityId,
        #[serde(default)]
        params: PlayerUpdate,
    },

    #[serde(rename = "queue.queueTrack")]
    QueueTrack { track: Track, index: usize },

    #[serde(rename = "queue.setDefaultTracks")]
    SetDefaultTracks { tracks: Vec<Track> },

    #[serde(rename = "queue.unqueueIndex")]
    UnqueueIndex { index: usize },

    #[serde(rename = "track.seekTo")]
    SeekTo { track: Track, position: f64 },

    #[serde(rename = "track.select")]
    Select { track: Track },

    #[serde(rename = "track.togglePause")]
    TogglePause { track: Track, paused: bool },
}

/// One step of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "Value")]
pub enum ScriptStep {
    Command(Command),
    Signal(EngineSignal),
}

impl TryFrom<Value> for ScriptStep {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let Some(object) = value.as_object() else {
            return Err("step must be an object".to_string());
        };

        if object.contains_key("op") {
            serde_json::from_value(value)
                .map(ScriptStep::Command)
                .map_err(|e| format!("bad command: {}", e))
        } else if object.contains_key("signal") {
            serde_json::from_value(value)
                .map(ScriptStep::Signal)
                .map_err(|e| format!("bad engine signal: {}", e))
        } else {
            Err("step needs an `op` or a `signal` field".to_string())
        }
    }
}

/// Parse a script from JSON text
pub fn parse(text: &str) -> Result<Vec<ScriptStep>> {
    let steps: Vec<Value> = serde_json::from_str(text)?;

    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            ScriptStep::try_from(step)
                .map_err(|reason| ReplayError::Script(format!("step {}: {}", index, reason)))
        })
        .collect()
}

/// Read and parse a script file
pub fn load(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}
