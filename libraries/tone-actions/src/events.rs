//! Action Events
//!
//! The event taxonomy consumed by the store, and the typed events the
//! action surface dispatches. Every operation dispatches at most one
//! event, so a store can apply each one as an atomic partial update keyed
//! by ID.
//!
//! Identifiers are grouped by namespace:
//! - `player.*`: player lifecycle and configuration
//! - `player.queue.*`: queue edits
//! - `player.track.*`: UI track selection
//! - `player.audioInterface.*`: audio engine callbacks

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tone_core::{EntityId, Normalized, PlayerConfig};

/// Player lifecycle events
pub mod player {
    pub const CREATE: &str = "player.CREATE";
    pub const DESTROY: &str = "player.DESTROY";
    pub const NEXT_TRACK: &str = "player.NEXT_TRACK";
    pub const PREVIOUS_TRACK: &str = "player.PREVIOUS_TRACK";
    pub const CONFIG_UPDATED: &str = "player.CONFIG_UPDATED";
    pub const UPDATE: &str = "player.UPDATE";

    /// Queue events
    pub mod queue {
        pub const QUEUE_TRACK: &str = "player.queue.QUEUE_TRACK";
        pub const SET_DEFAULTS: &str = "player.queue.SET_DEFAULTS";
        pub const UNQUEUE_INDEX: &str = "player.queue.UNQUEUE_INDEX";
    }

    /// Track selection events
    pub mod track {
        pub const SELECTED: &str = "player.track.SELECTED";
    }

    /// Audio engine callback events
    pub mod audio_interface {
        pub const TRACK_ERROR: &str = "player.audioInterface.TRACK_ERROR";
        pub const TRACK_FINISHED: &str = "player.audioInterface.TRACK_FINISHED";
        pub const TRACK_LOAD_AMOUNT_CHANGED: &str =
            "player.audioInterface.TRACK_LOAD_AMOUNT_CHANGED";
        pub const TRACK_PLAYING_CHANGED: &str = "player.audioInterface.TRACK_PLAYING_CHANGED";
        pub const TRACK_PLAY_POSITION_CHANGED: &str =
            "player.audioInterface.TRACK_PLAY_POSITION_CHANGED";
        pub const TRACK_PLAY_START: &str = "player.audioInterface.TRACK_PLAY_START";
        pub const TRACK_READY: &str = "player.audioInterface.TRACK_READY";
        pub const TRACK_RESOLVED: &str = "player.audioInterface.TRACK_RESOLVED";
        pub const TRACK_UPDATED: &str = "player.audioInterface.TRACK_UPDATED";
    }
}

/// Every event identifier, grouped by namespace
pub const ALL: [&str; 19] = [
    player::CREATE,
    player::DESTROY,
    player::NEXT_TRACK,
    player::PREVIOUS_TRACK,
    player::CONFIG_UPDATED,
    player::UPDATE,
    player::queue::QUEUE_TRACK,
    player::queue::SET_DEFAULTS,
    player::queue::UNQUEUE_INDEX,
    player::track::SELECTED,
    player::audio_interface::TRACK_ERROR,
    player::audio_interface::TRACK_FINISHED,
    player::audio_interface::TRACK_LOAD_AMOUNT_CHANGED,
    player::audio_interface::TRACK_PLAYING_CHANGED,
    player::audio_interface::TRACK_PLAY_POSITION_CHANGED,
    player::audio_interface::TRACK_PLAY_START,
    player::audio_interface::TRACK_READY,
    player::audio_interface::TRACK_RESOLVED,
    player::audio_interface::TRACK_UPDATED,
];

/// `{playerID}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(rename = "playerID")]
    pub player_id: EntityId,
}

/// `{trackID}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{config}` payload carrying only the changed setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub config: PlayerConfig,
}

/// `{index, trackID}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTrack {
    pub index: usize,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{index}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueIndex {
    pub index: usize,
}

/// `{error, trackID}` payload; the error is opaque engine data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFailure {
    pub error: Value,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{bytesLoaded, trackID}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadAmount {
    #[serde(rename = "bytesLoaded")]
    pub bytes_loaded: u64,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{isPlaying, trackID}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayingChange {
    #[serde(rename = "isPlaying")]
    pub is_playing: bool,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{position, trackID}` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayPosition {
    pub position: f64,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// `{sound, trackID}` payload; the sound is an opaque engine handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundReady {
    pub sound: Value,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// Normalized track list plus the track that was resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTracks {
    #[serde(flatten)]
    pub normalized: Normalized,
    #[serde(rename = "trackID")]
    pub track_id: EntityId,
}

/// Events dispatched by the action surface
///
/// Serializes as `{"type": <identifier>, "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ActionEvent {
    /// A player was created; normalized player with its tracks
    #[serde(rename = "player.CREATE")]
    PlayerCreated(Normalized),

    /// A player was destroyed
    #[serde(rename = "player.DESTROY")]
    PlayerDestroyed(PlayerRef),

    /// Advance to the next track
    #[serde(rename = "player.NEXT_TRACK")]
    NextTrack(PlayerRef),

    /// Go back to the previous track
    #[serde(rename = "player.PREVIOUS_TRACK")]
    PreviousTrack(PlayerRef),

    /// Repeat or volume changed
    #[serde(rename = "player.CONFIG_UPDATED")]
    ConfigUpdated(ConfigUpdate),

    /// Partial player update, normalized
    #[serde(rename = "player.UPDATE")]
    PlayerUpdated(Normalized),

    /// Track inserted into the queue
    #[serde(rename = "player.queue.QUEUE_TRACK")]
    TrackQueued(QueuedTrack),

    /// Default tracks replaced, normalized
    #[serde(rename = "player.queue.SET_DEFAULTS")]
    DefaultsSet(Normalized),

    /// Queue entry removed
    #[serde(rename = "player.queue.UNQUEUE_INDEX")]
    IndexUnqueued(QueueIndex),

    /// Track selected for playback, normalized
    #[serde(rename = "player.track.SELECTED")]
    TrackSelected(Normalized),

    /// Audio engine reported a failure
    #[serde(rename = "player.audioInterface.TRACK_ERROR")]
    TrackError(TrackFailure),

    /// Track reached its end
    #[serde(rename = "player.audioInterface.TRACK_FINISHED")]
    TrackFinished(TrackRef),

    /// More bytes of the track arrived
    #[serde(rename = "player.audioInterface.TRACK_LOAD_AMOUNT_CHANGED")]
    TrackLoadAmountChanged(LoadAmount),

    /// Track started or stopped playing
    #[serde(rename = "player.audioInterface.TRACK_PLAYING_CHANGED")]
    TrackPlayingChanged(PlayingChange),

    /// Play position moved
    #[serde(rename = "player.audioInterface.TRACK_PLAY_POSITION_CHANGED")]
    TrackPlayPositionChanged(PlayPosition),

    /// Playback of the track began
    #[serde(rename = "player.audioInterface.TRACK_PLAY_START")]
    TrackPlayStart(TrackRef),

    /// Engine resource attached and ready
    #[serde(rename = "player.audioInterface.TRACK_READY")]
    TrackReady(SoundReady),

    /// Track expanded into a list of playable tracks
    #[serde(rename = "player.audioInterface.TRACK_RESOLVED")]
    TrackResolved(ResolvedTracks),

    /// Transport fields of a track changed, normalized
    #[serde(rename = "player.audioInterface.TRACK_UPDATED")]
    TrackUpdated(Normalized),
}

impl ActionEvent {
    /// Event identifier
    pub fn name(&self) -> &'static str {
        use player::{audio_interface, queue, track};

        match self {
            ActionEvent::PlayerCreated(_) => player::CREATE,
            ActionEvent::PlayerDestroyed(_) => player::DESTROY,
            ActionEvent::NextTrack(_) => player::NEXT_TRACK,
            ActionEvent::PreviousTrack(_) => player::PREVIOUS_TRACK,
            ActionEvent::ConfigUpdated(_) => player::CONFIG_UPDATED,
            ActionEvent::PlayerUpdated(_) => player::UPDATE,
            ActionEvent::TrackQueued(_) => queue::QUEUE_TRACK,
            ActionEvent::DefaultsSet(_) => queue::SET_DEFAULTS,
            ActionEvent::IndexUnqueued(_) => queue::UNQUEUE_INDEX,
            ActionEvent::TrackSelected(_) => track::SELECTED,
            ActionEvent::TrackError(_) => audio_interface::TRACK_ERROR,
            ActionEvent::TrackFinished(_) => audio_interface::TRACK_FINISHED,
            ActionEvent::TrackLoadAmountChanged(_) => audio_interface::TRACK_LOAD_AMOUNT_CHANGED,
            ActionEvent::TrackPlayingChanged(_) => audio_interface::TRACK_PLAYING_CHANGED,
            ActionEvent::TrackPlayPositionChanged(_) => {
                audio_interface::TRACK_PLAY_POSITION_CHANGED
            }
            ActionEvent::TrackPlayStart(_) => audio_interface::TRACK_PLAY_START,
            ActionEvent::TrackReady(_) => audio_interface::TRACK_READY,
            ActionEvent::TrackResolved(_) => audio_interface::TRACK_RESOLVED,
            ActionEvent::TrackUpdated(_) => audio_interface::TRACK_UPDATED,
        }
    }

    /// Payload as a JSON value, without the event identifier
    pub fn payload(&self) -> serde_json::Result<Value> {
        match self {
            ActionEvent::PlayerCreated(p)
            | ActionEvent::PlayerUpdated(p)
            | ActionEvent::DefaultsSet(p)
            | ActionEvent::TrackSelected(p)
            | ActionEvent::TrackUpdated(p) => serde_json::to_value(p),
            ActionEvent::PlayerDestroyed(p)
            | ActionEvent::NextTrack(p)
            | ActionEvent::PreviousTrack(p) => serde_json::to_value(p),
            ActionEvent::ConfigUpdated(p) => serde_json::to_value(p),
            ActionEvent::TrackQueued(p) => serde_json::to_value(p),
            ActionEvent::IndexUnqueued(p) => serde_json::to_value(p),
            ActionEvent::TrackError(p) => serde_json::to_value(p),
            ActionEvent::TrackFinished(p) | ActionEvent::TrackPlayStart(p) => {
                serde_json::to_value(p)
            }
            ActionEvent::TrackLoadAmountChanged(p) => serde_json::to_value(p),
            ActionEvent::TrackPlayingChanged(p) => serde_json::to_value(p),
            ActionEvent::TrackPlayPositionChanged(p) => serde_json::to_value(p),
            ActionEvent::TrackReady(p) => serde_json::to_value(p),
            ActionEvent::TrackResolved(p) => serde_json::to_value(p),
        }
    }

    /// Track the event is about, when it names one directly
    pub fn track_id(&self) -> Option<&EntityId> {
        match self {
            ActionEvent::TrackQueued(p) => Some(&p.track_id),
            ActionEvent::TrackError(p) => Some(&p.track_id),
            ActionEvent::TrackFinished(p) | ActionEvent::TrackPlayStart(p) => Some(&p.track_id),
            ActionEvent::TrackLoadAmountChanged(p) => Some(&p.track_id),
            ActionEvent::TrackPlayingChanged(p) => Some(&p.track_id),
            ActionEvent::TrackPlayPositionChanged(p) => Some(&p.track_id),
            ActionEvent::TrackReady(p) => Some(&p.track_id),
            ActionEvent::TrackResolved(p) => Some(&p.track_id),
            ActionEvent::TrackSelected(p) | ActionEvent::TrackUpdated(p) => p.result.as_one(),
            _ => None,
        }
    }

    /// Player the event is about, when it names one directly
    pub fn player_id(&self) -> Option<&EntityId> {
        match self {
            ActionEvent::PlayerDestroyed(p)
            | ActionEvent::NextTrack(p)
            | ActionEvent::PreviousTrack(p) => Some(&p.player_id),
            ActionEvent::PlayerCreated(p) | ActionEvent::PlayerUpdated(p) => p.result.as_one(),
            _ => None,
        }
    }

    /// Normalized body, for events that carry one
    pub fn normalized(&self) -> Option<&Normalized> {
        match self {
            ActionEvent::PlayerCreated(p)
            | ActionEvent::PlayerUpdated(p)
            | ActionEvent::DefaultsSet(p)
            | ActionEvent::TrackSelected(p)
            | ActionEvent::TrackUpdated(p) => Some(p),
            ActionEvent::TrackResolved(p) => Some(&p.normalized),
            _ => None,
        }
    }
}
