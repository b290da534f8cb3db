//! Audio engine callback operations
//!
//! Each callback turns one primitive engine signal into one event. Only
//! `on_track_resolved` and `on_track_sound_added` normalize; the rest pass
//! their arguments straight through.

use serde_json::Value;
use tone_core::{EntityId, EntityKind, Track};

use super::Actions;
use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::events::{
    ActionEvent, LoadAmount, PlayPosition, PlayingChange, ResolvedTracks, SoundReady,
    TrackFailure, TrackRef,
};

/// Audio engine callbacks, borrowed from [`Actions::audio_interface`]
pub struct AudioInterfaceActions<'a, D, A> {
    actions: &'a mut Actions<D, A>,
}

impl<'a, D: Dispatcher, A: AudioInterface> AudioInterfaceActions<'a, D, A> {
    pub(crate) fn new(actions: &'a mut Actions<D, A>) -> Self {
        Self { actions }
    }

    /// The engine failed on a track; the error travels as payload
    pub fn on_track_error(&mut self, track_id: impl Into<EntityId>, error: Value) -> Result<()> {
        self.actions.emit(ActionEvent::TrackError(TrackFailure {
            error,
            track_id: track_id.into(),
        }));
        Ok(())
    }

    pub fn on_track_finish(&mut self, track_id: impl Into<EntityId>) -> Result<()> {
        self.actions.emit(ActionEvent::TrackFinished(TrackRef {
            track_id: track_id.into(),
        }));
        Ok(())
    }

    pub fn on_track_load_amount_change(
        &mut self,
        track_id: impl Into<EntityId>,
        bytes_loaded: u64,
    ) -> Result<()> {
        self.actions
            .emit(ActionEvent::TrackLoadAmountChanged(LoadAmount {
                bytes_loaded,
                track_id: track_id.into(),
            }));
        Ok(())
    }

    pub fn on_track_playing_change(
        &mut self,
        track_id: impl Into<EntityId>,
        is_playing: bool,
    ) -> Result<()> {
        self.actions
            .emit(ActionEvent::TrackPlayingChanged(PlayingChange {
                is_playing,
                track_id: track_id.into(),
            }));
        Ok(())
    }

    pub fn on_track_play_position_change(
        &mut self,
        track_id: impl Into<EntityId>,
        position: f64,
    ) -> Result<()> {
        self.actions
            .emit(ActionEvent::TrackPlayPositionChanged(PlayPosition {
                position,
                track_id: track_id.into(),
            }));
        Ok(())
    }

    pub fn on_track_play_start(&mut self, track_id: impl Into<EntityId>) -> Result<()> {
        self.actions.emit(ActionEvent::TrackPlayStart(TrackRef {
            track_id: track_id.into(),
        }));
        Ok(())
    }

    pub fn on_track_ready(&mut self, track_id: impl Into<EntityId>, sound: Value) -> Result<()> {
        self.actions.emit(ActionEvent::TrackReady(SoundReady {
            sound,
            track_id: track_id.into(),
        }));
        Ok(())
    }

    /// Resolution of `track_id` produced `tracks`
    pub fn on_track_resolved(
        &mut self,
        track_id: impl Into<EntityId>,
        tracks: &[Track],
    ) -> Result<()> {
        let normalized = self.actions.normalize_tracks(tracks)?;
        self.actions.emit(ActionEvent::TrackResolved(ResolvedTracks {
            normalized,
            track_id: track_id.into(),
        }));
        Ok(())
    }

    /// The engine attached a sound to `track`
    ///
    /// The play state is dropped from the payload since the store owns it,
    /// and `loading` is derived from the sound's `loaded` flag.
    pub fn on_track_sound_added(&mut self, mut track: Track) -> Result<()> {
        track.absorb_reserved_fields();
        track.playing = None;
        track.loading = Some(!track.sound_loaded());

        let payload = self.actions.normalize_entity(&track, EntityKind::Track)?;
        self.actions.emit(ActionEvent::TrackUpdated(payload));
        Ok(())
    }
}
