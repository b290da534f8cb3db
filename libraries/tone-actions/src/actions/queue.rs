//! Queue operations

use tone_core::Track;

use super::Actions;
use crate::audio::AudioInterface;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::events::{ActionEvent, QueueIndex, QueuedTrack};

/// Queue operations, borrowed from [`Actions::queue`]
pub struct QueueActions<'a, D, A> {
    actions: &'a mut Actions<D, A>,
}

impl<'a, D: Dispatcher, A: AudioInterface> QueueActions<'a, D, A> {
    pub(crate) fn new(actions: &'a mut Actions<D, A>) -> Self {
        Self { actions }
    }

    /// Insert `track` into the queue at `index`
    ///
    /// Only the ID is dispatched; the full track goes to resolution. Queue
    /// operations carry no `tracksPerArtist` of their own, so resolution
    /// gets `ActionsConfig::default_tracks_per_artist`, which is unset
    /// unless configured.
    pub fn queue_track(&mut self, track: &Track, index: usize) -> Result<()> {
        self.actions.emit(ActionEvent::TrackQueued(QueuedTrack {
            index,
            track_id: track.id.clone(),
        }));

        self.actions.resolve_tracks(std::slice::from_ref(track), None);
        Ok(())
    }

    /// Replace the default track list
    ///
    /// Resolution uses the configured default `tracksPerArtist`, as in
    /// [`queue_track`](Self::queue_track).
    pub fn set_default_tracks(&mut self, tracks: &[Track]) -> Result<()> {
        let payload = self.actions.normalize_tracks(tracks)?;
        self.actions.emit(ActionEvent::DefaultsSet(payload));

        self.actions.resolve_tracks(tracks, None);
        Ok(())
    }

    /// Remove the queue entry at `index`
    pub fn unqueue_index(&mut self, index: usize) -> Result<()> {
        self.actions
            .emit(ActionEvent::IndexUnqueued(QueueIndex { index }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCall;
    use crate::config::ActionsConfig;
    use serde_json::json;
    use tone_core::{EntityKind, NormalizedResult};

    #[test]
    fn set_default_tracks_normalizes_and_resolves_each() {
        let config = ActionsConfig {
            default_tracks_per_artist: Some(4),
            ..ActionsConfig::default()
        };
        let mut actions: Actions<Vec<ActionEvent>, Vec<AudioCall>> =
            Actions::with_config(Vec::new(), Vec::new(), config);
        let tracks = vec![Track::new("a"), Track::new("b")];

        actions.queue().set_default_tracks(&tracks).unwrap();

        let [ActionEvent::DefaultsSet(payload)] = actions.dispatcher().as_slice() else {
            panic!("expected a single SET_DEFAULTS event");
        };
        assert_eq!(
            payload.result,
            NormalizedResult::Many(vec!["a".into(), "b".into()])
        );
        assert_eq!(payload.entities.len(EntityKind::Track), 2);

        let resolved: Vec<_> = actions
            .audio()
            .iter()
            .map(|call| match call {
                AudioCall::ResolveTrack {
                    track,
                    tracks_per_artist,
                } => (track.id.as_str(), *tracks_per_artist),
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(resolved, vec![("a", Some(4)), ("b", Some(4))]);
    }

    #[test]
    fn queue_track_resolves_without_tracks_per_artist_by_default() {
        let mut actions: Actions<Vec<ActionEvent>, Vec<AudioCall>> =
            Actions::new(Vec::new(), Vec::new());
        actions.queue().queue_track(&Track::new("t9"), 0).unwrap();

        assert_eq!(
            actions.audio().as_slice(),
            [AudioCall::ResolveTrack {
                track: Track::new("t9"),
                tracks_per_artist: None
            }]
        );
    }

    #[test]
    fn set_default_tracks_accepts_empty_list() {
        let mut actions: Actions<Vec<ActionEvent>, Vec<AudioCall>> =
            Actions::new(Vec::new(), Vec::new());
        actions.queue().set_default_tracks(&[]).unwrap();

        assert_eq!(
            actions.dispatcher()[0].payload().unwrap(),
            json!({ "entities": {}, "result": [] })
        );
        assert!(actions.audio().is_empty());
    }

    #[test]
    fn unqueue_index_dispatches_index_only() {
        let mut actions: Actions<Vec<ActionEvent>, Vec<AudioCall>> =
            Actions::new(Vec::new(), Vec::new());
        actions.queue().unqueue_index(3).unwrap();

        assert_eq!(
            actions.dispatcher().as_slice(),
            [ActionEvent::IndexUnqueued(QueueIndex { index: 3 })]
        );
    }
}
