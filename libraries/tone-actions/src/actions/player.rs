//! Player lifecycle and configuration operations

use tone_core::{EntityId, EntityKind, Player, PlayerConfig, PlayerUpdate, TrackEntry};

use super::Actions;
use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::error::{ActionError, Result};
use crate::events::{self, ActionEvent, ConfigUpdate, PlayerRef};

/// Player operations, borrowed from [`Actions::player`]
pub struct PlayerActions<'a, D, A> {
    actions: &'a mut Actions<D, A>,
}

impl<'a, D: Dispatcher, A: AudioInterface> PlayerActions<'a, D, A> {
    pub(crate) fn new(actions: &'a mut Actions<D, A>) -> Self {
        Self { actions }
    }

    /// Create a player
    ///
    /// `nowPlaying` is always reset to the first track, whatever the caller
    /// set. Every track is sent for resolution after the dispatch.
    pub fn create(&mut self, mut player: Player) -> Result<()> {
        let first = player
            .tracks
            .first()
            .cloned()
            .ok_or(ActionError::EmptyTrackList {
                operation: events::player::CREATE,
            })?;
        player.now_playing = Some(TrackEntry::Record(first));

        let payload = self.actions.normalize_entity(&player, EntityKind::Player)?;
        self.actions.emit(ActionEvent::PlayerCreated(payload));

        self.actions
            .resolve_tracks(&player.tracks, player.tracks_per_artist);
        Ok(())
    }

    /// Destroy a player; its tracks stay in the store
    pub fn destroy(&mut self, player_id: impl Into<EntityId>) -> Result<()> {
        self.actions.emit(ActionEvent::PlayerDestroyed(PlayerRef {
            player_id: player_id.into(),
        }));
        Ok(())
    }

    /// Ask the store to advance the player
    pub fn next_track(&mut self, player_id: impl Into<EntityId>) -> Result<()> {
        self.actions.emit(ActionEvent::NextTrack(PlayerRef {
            player_id: player_id.into(),
        }));
        Ok(())
    }

    /// Ask the store to step the player back
    pub fn previous_track(&mut self, player_id: impl Into<EntityId>) -> Result<()> {
        self.actions.emit(ActionEvent::PreviousTrack(PlayerRef {
            player_id: player_id.into(),
        }));
        Ok(())
    }

    /// Turn repeat on or off; no value means off
    pub fn set_repeat(&mut self, repeat: Option<bool>) -> Result<()> {
        self.actions.emit(ActionEvent::ConfigUpdated(ConfigUpdate {
            config: PlayerConfig {
                repeat: Some(repeat.unwrap_or(false)),
                volume: None,
            },
        }));
        Ok(())
    }

    /// Set the output volume, in the store and on the engine
    pub fn set_volume(&mut self, level: f64) -> Result<()> {
        self.actions.emit(ActionEvent::ConfigUpdated(ConfigUpdate {
            config: PlayerConfig {
                repeat: None,
                volume: Some(level),
            },
        }));

        tracing::trace!(level, "Setting volume");
        self.actions.audio.set_volume(level);
        Ok(())
    }

    /// Apply a partial update to a player
    ///
    /// When `params.tracks` is supplied, `nowPlaying` is reset to its first
    /// entry and every supplied track record is sent for resolution after
    /// the dispatch. Entries given as bare IDs stay references and are not
    /// resolved again.
    pub fn update(&mut self, player_id: impl Into<EntityId>, mut params: PlayerUpdate) -> Result<()> {
        params.id = Some(player_id.into());

        if let Some(tracks) = &params.tracks {
            let first = tracks.first().cloned().ok_or(ActionError::EmptyTrackList {
                operation: events::player::UPDATE,
            })?;
            params.now_playing = Some(first);
        }

        let payload = self.actions.normalize_entity(&params, EntityKind::Player)?;
        self.actions.emit(ActionEvent::PlayerUpdated(payload));

        if let Some(tracks) = &params.tracks {
            let records = tracks.iter().filter_map(|entry| {
                if entry.record().is_none() {
                    tracing::trace!(track_id = %entry.id(), "Keeping track reference unresolved");
                }
                entry.record()
            });
            self.actions.resolve_tracks(records, params.tracks_per_artist);
        }
        Ok(())
    }
}
