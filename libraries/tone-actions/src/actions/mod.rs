//! Action dispatch surface
//!
//! Named operations grouped by domain, each of which shapes its input,
//! optionally normalizes it, dispatches exactly one event (or none, for
//! pure transport pass-throughs) and then triggers its side effects on the
//! audio interface.
//!
//! ```text
//! UI command / engine callback
//!     │
//!     ▼
//! Actions::{player, queue, track, audio_interface}()
//!     │  shape ─► normalize ─► dispatch (once) ─► side effects
//!     ▼
//! Dispatcher (store)          AudioInterface (engine)
//! ```
//!
//! A failing shape or normalization step returns an error before anything
//! is dispatched or sent to the engine.

mod audio_interface;
mod player;
mod queue;
mod track;

pub use audio_interface::AudioInterfaceActions;
pub use player::PlayerActions;
pub use queue::QueueActions;
pub use track::TrackActions;

use serde::Serialize;
use tone_core::{EntityKind, Normalized, Normalizer, Track};

use crate::audio::AudioInterface;
use crate::bridge::AudioInterfaceBridge;
use crate::config::ActionsConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::events::ActionEvent;

/// The action surface
///
/// Owns the dispatch and audio interface capabilities it was built with;
/// nothing is global.
#[derive(Debug)]
pub struct Actions<D, A> {
    dispatcher: D,
    audio: A,
    config: ActionsConfig,
    normalizer: Normalizer,
}

impl<D: Dispatcher, A: AudioInterface> Actions<D, A> {
    /// Create an action surface with default configuration
    pub fn new(dispatcher: D, audio: A) -> Self {
        Self::with_config(dispatcher, audio, ActionsConfig::default())
    }

    /// Create an action surface with `config`
    pub fn with_config(dispatcher: D, audio: A, config: ActionsConfig) -> Self {
        Self {
            dispatcher,
            audio,
            config,
            normalizer: Normalizer::default(),
        }
    }

    /// Replace the normalizer, e.g. one built over an extended registry
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Player lifecycle and configuration operations
    pub fn player(&mut self) -> PlayerActions<'_, D, A> {
        PlayerActions::new(self)
    }

    /// Queue operations
    pub fn queue(&mut self) -> QueueActions<'_, D, A> {
        QueueActions::new(self)
    }

    /// UI track operations
    pub fn track(&mut self) -> TrackActions<'_, D, A> {
        TrackActions::new(self)
    }

    /// Audio engine callback operations
    pub fn audio_interface(&mut self) -> AudioInterfaceActions<'_, D, A> {
        AudioInterfaceActions::new(self)
    }

    /// Bridge translating engine signals into audio interface operations
    pub fn bridge(&mut self) -> AudioInterfaceBridge<'_, D, A> {
        AudioInterfaceBridge::new(self)
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn normalize_entity<T: Serialize>(&self, value: &T, kind: EntityKind) -> Result<Normalized> {
        self.normalizer
            .normalize_entity(value, kind)
            .map_err(|err| {
                tracing::warn!(kind = %kind, error = %err, "Rejecting input that failed to normalize");
                err.into()
            })
    }

    fn normalize_tracks(&self, tracks: &[Track]) -> Result<Normalized> {
        self.normalizer
            .normalize_collection(tracks, EntityKind::Track)
            .map_err(|err| {
                tracing::warn!(error = %err, "Rejecting track list that failed to normalize");
                err.into()
            })
    }

    fn emit(&mut self, event: ActionEvent) {
        tracing::debug!(
            event = event.name(),
            player_id = event.player_id().map(|id| id.as_str()),
            track_id = event.track_id().map(|id| id.as_str()),
            "Dispatching"
        );
        self.dispatcher.dispatch(event);
    }

    fn resolve_tracks<'t>(
        &mut self,
        tracks: impl IntoIterator<Item = &'t Track>,
        tracks_per_artist: Option<u32>,
    ) {
        let tracks_per_artist = self.config.tracks_per_artist(tracks_per_artist);
        for track in tracks {
            tracing::trace!(track_id = %track.id, ?tracks_per_artist, "Resolving track");
            self.audio.resolve_track(track, tracks_per_artist);
        }
    }
}
