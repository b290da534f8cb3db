//! JavaScript-backed capabilities

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::events::ActionEvent;
use tone_core::Track;

/// Convert to a plain JS object (maps become objects, not `Map`s)
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Dispatcher calling `dispatch(eventName, payload)`
#[derive(Debug, Clone)]
pub struct JsDispatcher {
    dispatch: Function,
}

impl JsDispatcher {
    pub fn new(dispatch: Function) -> Self {
        Self { dispatch }
    }
}

impl Dispatcher for JsDispatcher {
    fn dispatch(&mut self, event: ActionEvent) {
        let name = event.name();
        let payload = event
            .payload()
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|payload| to_js(&payload));

        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(event = name, error = ?err, "Failed to convert payload");
                return;
            }
        };

        if let Err(err) = self
            .dispatch
            .call2(&JsValue::NULL, &JsValue::from_str(name), &payload)
        {
            tracing::warn!(event = name, error = ?err, "Dispatch function threw");
        }
    }
}

/// Audio interface calling methods on a JS object
///
/// The object may implement any subset of `resolveTrack`, `loadTrack`,
/// `seekTrack`, `togglePause` and `setVolume`; missing methods are skipped.
#[derive(Debug, Clone)]
pub struct JsAudioInterface {
    target: JsValue,
}

impl JsAudioInterface {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn method(&self, name: &str) -> Option<Function> {
        let method = Reflect::get(&self.target, &JsValue::from_str(name)).ok()?;
        match method.dyn_into::<Function>() {
            Ok(function) => Some(function),
            Err(_) => {
                tracing::trace!(method = name, "Audio interface method not provided");
                None
            }
        }
    }

    fn call(&self, name: &str, args: &[JsValue]) {
        let Some(function) = self.method(name) else {
            return;
        };

        let args: js_sys::Array = args.iter().collect();
        if let Err(err) = function.apply(&self.target, &args) {
            tracing::warn!(method = name, error = ?err, "Audio interface method threw");
        }
    }

    fn call_with_track(&self, name: &str, track: &Track, rest: &[JsValue]) {
        match to_js(track) {
            Ok(track) => {
                let mut args = vec![track];
                args.extend_from_slice(rest);
                self.call(name, &args);
            }
            Err(err) => {
                tracing::error!(method = name, error = ?err, "Failed to convert track");
            }
        }
    }
}

impl AudioInterface for JsAudioInterface {
    fn resolve_track(&mut self, track: &Track, tracks_per_artist: Option<u32>) {
        let tracks_per_artist = tracks_per_artist.map_or(JsValue::UNDEFINED, JsValue::from);
        self.call_with_track("resolveTrack", track, &[tracks_per_artist]);
    }

    fn load_track(&mut self, track: &Track, autoplay: bool) {
        self.call_with_track("loadTrack", track, &[JsValue::from_bool(autoplay)]);
    }

    fn seek_track(&mut self, track: &Track, position: f64) {
        self.call_with_track("seekTrack", track, &[JsValue::from_f64(position)]);
    }

    fn toggle_pause(&mut self, track: &Track, paused: bool) {
        self.call_with_track("togglePause", track, &[JsValue::from_bool(paused)]);
    }

    fn set_volume(&mut self, level: f64) {
        self.call("setVolume", &[JsValue::from_f64(level)]);
    }
}
