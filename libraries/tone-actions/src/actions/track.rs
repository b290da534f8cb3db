//! UI track operations

use tone_core::{EntityKind, Track};

use super::Actions;
use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::events::ActionEvent;

/// Track operations, borrowed from [`Actions::track`]
pub struct TrackActions<'a, D, A> {
    actions: &'a mut Actions<D, A>,
}

impl<'a, D: Dispatcher, A: AudioInterface> TrackActions<'a, D, A> {
    pub(crate) fn new(actions: &'a mut Actions<D, A>) -> Self {
        Self { actions }
    }

    /// Seek `track` on the engine; nothing is dispatched, the new position
    /// comes back through `on_track_play_position_change`
    pub fn seek_to(&mut self, track: &Track, position: f64) -> Result<()> {
        tracing::trace!(track_id = %track.id, position, "Seeking");
        self.actions.audio.seek_track(track, position);
        Ok(())
    }

    /// Select `track` for playback and load it on the engine
    pub fn select(&mut self, track: &Track) -> Result<()> {
        let payload = self.actions.normalize_entity(track, EntityKind::Track)?;
        self.actions.emit(ActionEvent::TrackSelected(payload));

        let autoplay = self.actions.config.autoplay_on_select;
        tracing::trace!(track_id = %track.id, autoplay, "Loading track");
        self.actions.audio.load_track(track, autoplay);
        Ok(())
    }

    /// Pause or resume `track` on the engine; nothing is dispatched, the
    /// play state comes back through `on_track_playing_change`
    pub fn toggle_pause(&mut self, track: &Track, paused: bool) -> Result<()> {
        tracing::trace!(track_id = %track.id, paused, "Toggling pause");
        self.actions.audio.toggle_pause(track, paused);
        Ok(())
    }
}
