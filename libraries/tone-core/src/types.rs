//! Core record types
//!
//! Raw (nested) shapes of the two entity kinds as they arrive from the UI
//! or the audio engine. Field names follow the camelCase wire format, and
//! provider-defined fields are carried in `extra` so nothing is dropped on
//! the way through.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::EntityId;

/// A playable track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: EntityId,

    /// Audio engine resource, once one has been attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<Sound>,

    /// Whether the track is still loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,

    /// Play state; owned by the store, never set by transport updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playing: Option<bool>,

    /// Provider-defined fields (title, stream URL, `loaded`, `position`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    /// Create a bare track with only an ID
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            sound: None,
            loading: None,
            playing: None,
            extra: Map::new(),
        }
    }

    /// Set a provider-defined field
    ///
    /// `id`, `sound`, `loading` and `playing` land in their typed fields.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self.absorb_reserved_fields();
        self
    }

    /// Move typed keys found in `extra` into their fields
    ///
    /// Flattened extras serialize after the typed fields and would shadow
    /// them. A value of the wrong shape is dropped.
    pub fn absorb_reserved_fields(&mut self) {
        if let Some(value) = self.extra.remove("id") {
            match EntityId::from_value(&value) {
                Some(id) => self.id = id,
                None => tracing::warn!(track_id = %self.id, %value, "Dropping malformed track id"),
            }
        }
        if let Some(value) = self.extra.remove("sound") {
            self.sound = reserved(value, "sound", &self.id);
        }
        if let Some(value) = self.extra.remove("loading") {
            self.loading = reserved(value, "loading", &self.id);
        }
        if let Some(value) = self.extra.remove("playing") {
            self.playing = reserved(value, "playing", &self.id);
        }
    }

    /// Whether the attached sound reports itself fully loaded
    ///
    /// A track without a sound is not loaded.
    pub fn sound_loaded(&self) -> bool {
        self.sound
            .as_ref()
            .and_then(|sound| sound.loaded)
            .unwrap_or(false)
    }
}

fn reserved<T: DeserializeOwned>(value: Value, field: &str, track_id: &EntityId) -> Option<T> {
    serde_json::from_value::<Option<T>>(value).unwrap_or_else(|err| {
        tracing::warn!(%track_id, field, error = %err, "Dropping malformed track field");
        None
    })
}

/// Opaque handle to an audio engine resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sound {
    /// Whether the engine has finished loading the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded: Option<bool>,

    /// Engine-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A track given either as a full record or as a reference to one
///
/// The store keeps player relations as IDs, so a player read back from it
/// carries `nowPlaying: "t1"` rather than a nested track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    Record(Track),
    Id(EntityId),
}

impl TrackEntry {
    /// ID of the referenced track
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Record(track) => &track.id,
            Self::Id(id) => id,
        }
    }

    /// The full record, when one was given
    pub fn record(&self) -> Option<&Track> {
        match self {
            Self::Record(track) => Some(track),
            Self::Id(_) => None,
        }
    }
}

impl From<Track> for TrackEntry {
    fn from(track: Track) -> Self {
        Self::Record(track)
    }
}

/// Player configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Loop the track list when it ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,

    /// Output volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// A player instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique player identifier
    pub id: EntityId,

    /// Track currently selected for playback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<TrackEntry>,

    /// Ordered track list
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Player configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PlayerConfig>,

    /// Whether the player is still loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,

    /// How many tracks to resolve per artist when a track expands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks_per_artist: Option<u32>,

    /// Embedder-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Player {
    /// Create a player over `tracks`
    pub fn new(id: impl Into<EntityId>, tracks: Vec<Track>) -> Self {
        Self {
            id: id.into(),
            now_playing: None,
            tracks,
            config: None,
            loading: None,
            tracks_per_artist: None,
            extra: Map::new(),
        }
    }
}

/// Partial player update
///
/// Every field is optional; the ID comes from the update call itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    /// Set by the update operation, never by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    /// Set to the first track whenever `tracks` is supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<TrackEntry>,

    /// Replacement track list; entries given as IDs refer to tracks the
    /// store already holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackEntry>>,

    /// Replacement configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PlayerConfig>,

    /// Loading flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,

    /// Tracks to resolve per artist for the supplied tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks_per_artist: Option<u32>,

    /// Embedder-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerUpdate {
    /// Update replacing the track list
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Some(tracks.into_iter().map(TrackEntry::Record).collect()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_round_trips_provider_fields() {
        let raw = json!({
            "id": "t1",
            "title": "Song",
            "streamUrl": "https://example.com/t1",
            "position": 12.5,
            "sound": { "loaded": true, "duration": 180 }
        });

        let track: Track = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(track.id.as_str(), "t1");
        assert!(track.sound_loaded());
        assert_eq!(track.extra["streamUrl"], json!("https://example.com/t1"));
        assert_eq!(track.sound.as_ref().unwrap().extra["duration"], json!(180));

        assert_eq!(serde_json::to_value(&track).unwrap(), raw);
    }

    #[test]
    fn track_without_sound_is_not_loaded() {
        assert!(!Track::new("t1").sound_loaded());

        let mut track = Track::new("t1");
        track.sound = Some(Sound::default());
        assert!(!track.sound_loaded());
    }

    #[test]
    fn typed_keys_never_land_in_extra() {
        let track = Track::new("t1")
            .with_field("title", "Song")
            .with_field("loading", false)
            .with_field("playing", "yes")
            .with_field("sound", json!({ "loaded": true }));

        assert_eq!(track.loading, Some(false));
        assert_eq!(track.playing, None);
        assert!(track.sound_loaded());
        assert_eq!(track.extra.len(), 1);

        let mut renamed = Track::new("t1").with_field("id", 7);
        assert_eq!(renamed.id.as_str(), "7");
        renamed.extra.insert("loading".into(), json!(true));
        renamed.absorb_reserved_fields();
        assert_eq!(renamed.loading, Some(true));
        assert!(renamed.extra.is_empty());
    }

    #[test]
    fn player_uses_camel_case_fields() {
        let raw = json!({
            "id": "p1",
            "tracks": [{ "id": "t1" }],
            "tracksPerArtist": 3,
            "config": { "repeat": true }
        });

        let player: Player = serde_json::from_value(raw).unwrap();
        assert_eq!(player.tracks_per_artist, Some(3));
        assert_eq!(player.config.unwrap().repeat, Some(true));
        assert!(player.now_playing.is_none());
    }

    #[test]
    fn player_update_serializes_only_supplied_fields() {
        let update = PlayerUpdate {
            loading: Some(false),
            ..PlayerUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "loading": false }));
    }

    #[test]
    fn player_accepts_now_playing_as_an_id() {
        let raw = json!({ "id": "p1", "nowPlaying": "t0", "tracks": [{ "id": "t1" }] });

        let player: Player = serde_json::from_value(raw).unwrap();
        assert_eq!(player.now_playing, Some(TrackEntry::Id("t0".into())));
        assert_eq!(player.tracks, vec![Track::new("t1")]);

        let numeric: Player =
            serde_json::from_value(json!({ "id": "p1", "nowPlaying": 7, "tracks": [] })).unwrap();
        assert_eq!(numeric.now_playing.unwrap().id().as_str(), "7");
    }

    #[test]
    fn player_update_mixes_records_and_ids() {
        let update: PlayerUpdate =
            serde_json::from_value(json!({ "tracks": ["t1", { "id": "t2", "title": "Two" }] }))
                .unwrap();

        let tracks = update.tracks.unwrap();
        assert_eq!(tracks[0], TrackEntry::Id("t1".into()));
        assert!(tracks[0].record().is_none());
        assert_eq!(tracks[1].record().unwrap().extra["title"], json!("Two"));
        assert!(serde_json::from_value::<PlayerUpdate>(json!({ "tracks": [null] })).is_err());
    }

    #[test]
    fn track_requires_an_id_to_deserialize() {
        assert!(serde_json::from_value::<Track>(json!({ "title": "anonymous" })).is_err());
    }
}
