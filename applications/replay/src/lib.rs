//! Tone Replay
//!
//! Drives the Tone Player action surface from a JSON script of UI commands
//! and engine signals, writing every dispatched event as a JSON line.

pub mod config;
pub mod error;
pub mod runner;
pub mod script;

pub use config::{OutputSettings, ReplayConfig};
pub use error::{ReplayError, Result};
pub use runner::{Replay, ReplaySummary};
pub use script::{Command, ScriptStep};
