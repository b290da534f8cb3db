//! WASM-compatible action surface wrapper

use js_sys::Function;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::host::{JsAudioInterface, JsDispatcher};
use crate::actions::Actions;
use crate::bridge::EngineSignal;
use crate::config::ActionsConfig;
use crate::error::ActionError;
use tone_core::{EntityId, Player, PlayerUpdate, Track};

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn handle_error(error: ActionError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// WASM-compatible action surface
///
/// IDs may be passed as strings or numbers; records and payloads as plain
/// objects.
#[wasm_bindgen]
pub struct WasmActions {
    inner: Actions<JsDispatcher, JsAudioInterface>,
}

#[wasm_bindgen]
impl WasmActions {
    /// Create an action surface
    ///
    /// `dispatch` is called as `dispatch(eventName, payload)`. `config` is
    /// an optional `ActionsConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        dispatch: Function,
        audio_interface: JsValue,
        config: JsValue,
    ) -> Result<WasmActions, JsValue> {
        console_error_panic_hook::set_once();

        let config: ActionsConfig = if config.is_undefined() || config.is_null() {
            ActionsConfig::default()
        } else {
            from_js(config, "config")?
        };

        Ok(Self {
            inner: Actions::with_config(
                JsDispatcher::new(dispatch),
                JsAudioInterface::new(audio_interface),
                config,
            ),
        })
    }

    // ===== Player =====

    #[wasm_bindgen(js_name = create)]
    pub fn create_player(&mut self, player: JsValue) -> Result<(), JsValue> {
        let player: Player = from_js(player, "player")?;
        self.inner.player().create(player).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = destroy)]
    pub fn destroy_player(&mut self, player_id: JsValue) -> Result<(), JsValue> {
        let player_id: EntityId = from_js(player_id, "player ID")?;
        self.inner.player().destroy(player_id).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = nextTrack)]
    pub fn next_track(&mut self, player_id: JsValue) -> Result<(), JsValue> {
        let player_id: EntityId = from_js(player_id, "player ID")?;
        self.inner.player().next_track(player_id).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = previousTrack)]
    pub fn previous_track(&mut self, player_id: JsValue) -> Result<(), JsValue> {
        let player_id: EntityId = from_js(player_id, "player ID")?;
        self.inner
            .player()
            .previous_track(player_id)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, repeat: Option<bool>) -> Result<(), JsValue> {
        self.inner.player().set_repeat(repeat).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f64) -> Result<(), JsValue> {
        self.inner.player().set_volume(level).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = update)]
    pub fn update_player(&mut self, player_id: JsValue, params: JsValue) -> Result<(), JsValue> {
        let player_id: EntityId = from_js(player_id, "player ID")?;
        let params: PlayerUpdate = from_js(params, "player params")?;
        self.inner
            .player()
            .update(player_id, params)
            .map_err(handle_error)
    }

    // ===== Queue =====

    #[wasm_bindgen(js_name = queueTrack)]
    pub fn queue_track(&mut self, track: JsValue, index: usize) -> Result<(), JsValue> {
        let track: Track = from_js(track, "track")?;
        self.inner
            .queue()
            .queue_track(&track, index)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = setDefaultTracks)]
    pub fn set_default_tracks(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = from_js(tracks, "tracks")?;
        self.inner
            .queue()
            .set_default_tracks(&tracks)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = unqueueIndex)]
    pub fn unqueue_index(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.queue().unqueue_index(index).map_err(handle_error)
    }

    // ===== Track =====

    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, track: JsValue, position: f64) -> Result<(), JsValue> {
        let track: Track = from_js(track, "track")?;
        self.inner
            .track()
            .seek_to(&track, position)
            .map_err(handle_error)
    }

    pub fn select(&mut self, track: JsValue) -> Result<(), JsValue> {
        let track: Track = from_js(track, "track")?;
        self.inner.track().select(&track).map_err(handle_error)
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self, track: JsValue, paused: bool) -> Result<(), JsValue> {
        let track: Track = from_js(track, "track")?;
        self.inner
            .track()
            .toggle_pause(&track, paused)
            .map_err(handle_error)
    }

    // ===== Audio Interface Callbacks =====

    #[wasm_bindgen(js_name = onTrackError)]
    pub fn on_track_error(&mut self, track_id: JsValue, error: JsValue) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        let error: Value = if error.is_undefined() {
            Value::Null
        } else {
            from_js(error, "error")?
        };
        self.inner
            .audio_interface()
            .on_track_error(track_id, error)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackFinish)]
    pub fn on_track_finish(&mut self, track_id: JsValue) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        self.inner
            .audio_interface()
            .on_track_finish(track_id)
            .map_err(handle_error)
    }

    /// `bytesLoaded` arrives as a JS number
    #[wasm_bindgen(js_name = onTrackLoadAmountChange)]
    pub fn on_track_load_amount_change(
        &mut self,
        track_id: JsValue,
        bytes_loaded: f64,
    ) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bytes_loaded = bytes_loaded.max(0.0) as u64;
        self.inner
            .audio_interface()
            .on_track_load_amount_change(track_id, bytes_loaded)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackPlayingChange)]
    pub fn on_track_playing_change(
        &mut self,
        track_id: JsValue,
        is_playing: bool,
    ) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        self.inner
            .audio_interface()
            .on_track_playing_change(track_id, is_playing)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackPlayPositionChange)]
    pub fn on_track_play_position_change(
        &mut self,
        track_id: JsValue,
        position: f64,
    ) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        self.inner
            .audio_interface()
            .on_track_play_position_change(track_id, position)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackPlayStart)]
    pub fn on_track_play_start(&mut self, track_id: JsValue) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        self.inner
            .audio_interface()
            .on_track_play_start(track_id)
            .map_err(handle_error)
    }

    /// Only the serializable part of `sound` reaches the payload
    #[wasm_bindgen(js_name = onTrackReady)]
    pub fn on_track_ready(&mut self, track_id: JsValue, sound: JsValue) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        let sound: Value = from_js(sound, "sound")?;
        self.inner
            .audio_interface()
            .on_track_ready(track_id, sound)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackResolved)]
    pub fn on_track_resolved(&mut self, track_id: JsValue, tracks: JsValue) -> Result<(), JsValue> {
        let track_id: EntityId = from_js(track_id, "track ID")?;
        let tracks: Vec<Track> = from_js(tracks, "tracks")?;
        self.inner
            .audio_interface()
            .on_track_resolved(track_id, &tracks)
            .map_err(handle_error)
    }

    #[wasm_bindgen(js_name = onTrackSoundAdded)]
    pub fn on_track_sound_added(&mut self, track: JsValue) -> Result<(), JsValue> {
        let track: Track = from_js(track, "track")?;
        self.inner
            .audio_interface()
            .on_track_sound_added(track)
            .map_err(handle_error)
    }

    /// Forward an engine signal object such as `{signal: "trackFinish", trackID}`
    pub fn forward(&mut self, signal: JsValue) -> Result<(), JsValue> {
        let signal: EngineSignal = from_js(signal, "engine signal")?;
        self.inner.bridge().forward(signal).map_err(handle_error)
    }
}
