//! WASM bindings for tone-actions
//!
//! This module exposes the action surface to JavaScript. The host passes a
//! dispatch function and an audio interface object; every operation is a
//! camelCase method on [`WasmActions`].

pub mod actions;
pub mod host;

pub use actions::WasmActions;
pub use host::{JsAudioInterface, JsDispatcher};
