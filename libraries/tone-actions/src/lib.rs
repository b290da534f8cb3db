//! Tone Player - Actions
//!
//! The action dispatch surface of Tone Player: the single place where UI
//! commands and audio engine callbacks become store events.
//!
//! This crate provides:
//! - Player lifecycle and configuration (create, update, destroy, repeat, volume)
//! - Queue edits (queue, unqueue, default tracks)
//! - UI track operations (select, seek, pause)
//! - Audio engine callbacks, and a bridge forwarding engine signals to them
//!
//! # Architecture
//!
//! `tone-actions` owns no state. An [`Actions`] value is built from two
//! capabilities supplied by the host:
//! - a [`Dispatcher`] receiving one [`ActionEvent`] per dispatching operation
//! - an [`AudioInterface`] receiving fire-and-forget engine commands
//!
//! Enable the `wasm` feature to drive the surface from JavaScript.
//!
//! # Example
//!
//! ```rust
//! use tone_actions::{Actions, ActionEvent, AudioCall};
//! use tone_core::{Player, Track};
//!
//! let mut actions: Actions<Vec<ActionEvent>, Vec<AudioCall>> =
//!     Actions::new(Vec::new(), Vec::new());
//!
//! let player = Player::new("p1", vec![Track::new("t1"), Track::new("t2")]);
//! actions.player().create(player).unwrap();
//!
//! // One event for the store, one resolution request per track
//! assert_eq!(actions.dispatcher().len(), 1);
//! assert_eq!(actions.audio().len(), 2);
//! ```

pub mod actions;
pub mod audio;
pub mod bridge;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use actions::{Actions, AudioInterfaceActions, PlayerActions, QueueActions, TrackActions};
pub use audio::{AudioCall, AudioInterface, NoopAudioInterface};
pub use bridge::{AudioInterfaceBridge, EngineSignal};
pub use config::ActionsConfig;
pub use dispatcher::{Dispatcher, FnDispatcher, PayloadDispatcher};
pub use error::{ActionError, Result};
pub use events::ActionEvent;
