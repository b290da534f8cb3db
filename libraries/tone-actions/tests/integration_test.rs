//! Integration tests for the action surface
//!
//! These tests drive the public surface the way a UI and an audio engine
//! would, and check what the store and the engine observe.
//! No shallow tests - every test verifies meaningful behavior.

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use tone_actions::events;
use tone_actions::{
    ActionError, ActionEvent, Actions, ActionsConfig, AudioCall, AudioInterface, EngineSignal,
    FnDispatcher, PayloadDispatcher,
};
use tone_core::{
    EntityKind, Normalizer, Player, PlayerUpdate, SchemaRegistry, Sound, ToneError, Track,
};

// ===== Test Helpers =====

type Journal = Rc<RefCell<Vec<String>>>;

/// Audio interface writing into the same journal as the dispatcher
struct JournalAudio(Journal);

impl AudioInterface for JournalAudio {
    fn resolve_track(&mut self, track: &Track, _tracks_per_artist: Option<u32>) {
        self.0.borrow_mut().push(format!("resolve:{}", track.id));
    }

    fn load_track(&mut self, track: &Track, autoplay: bool) {
        self.0
            .borrow_mut()
            .push(format!("load:{}:{autoplay}", track.id));
    }

    fn seek_track(&mut self, track: &Track, position: f64) {
        self.0
            .borrow_mut()
            .push(format!("seek:{}:{position}", track.id));
    }

    fn toggle_pause(&mut self, track: &Track, paused: bool) {
        self.0
            .borrow_mut()
            .push(format!("pause:{}:{paused}", track.id));
    }

    fn set_volume(&mut self, level: f64) {
        self.0.borrow_mut().push(format!("volume:{level}"));
    }
}

fn journaled() -> (
    Actions<FnDispatcher<impl FnMut(ActionEvent)>, JournalAudio>,
    Journal,
) {
    let journal: Journal = Rc::default();
    let sink = Rc::clone(&journal);
    let dispatcher = FnDispatcher(move |event: ActionEvent| {
        sink.borrow_mut().push(format!("dispatch:{}", event.name()));
    });
    (
        Actions::new(dispatcher, JournalAudio(Rc::clone(&journal))),
        journal,
    )
}

fn recording() -> Actions<Vec<ActionEvent>, Vec<AudioCall>> {
    Actions::new(Vec::new(), Vec::new())
}

fn resolved_ids(calls: &[AudioCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|call| match call {
            AudioCall::ResolveTrack { track, .. } => Some(track.id.as_str()),
            _ => None,
        })
        .collect()
}

// ===== Player Operations =====

#[test]
fn test_create_dispatches_before_resolving() {
    let (mut actions, journal) = journaled();
    let player = Player::new("p1", vec![Track::new("t1"), Track::new("t2")]);

    actions.player().create(player).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec!["dispatch:player.CREATE", "resolve:t1", "resolve:t2"]
    );
}

#[test]
fn test_create_passes_tracks_per_artist_to_resolution() {
    let mut actions = recording();
    let mut player = Player::new("p1", vec![Track::new("t1")]);
    player.tracks_per_artist = Some(3);

    actions.player().create(player).unwrap();

    assert!(matches!(
        actions.audio().as_slice(),
        [AudioCall::ResolveTrack {
            tracks_per_artist: Some(3),
            ..
        }]
    ));
}

#[test]
fn test_create_payload_is_flat() {
    let mut actions = recording();
    let mut player = Player::new(
        "p1",
        vec![
            Track::new("t1").with_field("title", "One"),
            Track::new("t2").with_field("title", "Two"),
        ],
    );
    player.now_playing = Some(Track::new("t2").into());

    actions.player().create(player).unwrap();

    assert_eq!(
        actions.dispatcher()[0].payload().unwrap(),
        json!({
            "entities": {
                "players": {
                    "p1": { "id": "p1", "nowPlaying": "t1", "tracks": ["t1", "t2"] }
                },
                "tracks": {
                    "t1": { "id": "t1", "title": "One" },
                    "t2": { "id": "t2", "title": "Two" }
                }
            },
            "result": "p1"
        })
    );
}

#[test]
fn test_update_with_tracks_sets_id_and_now_playing() {
    let mut actions = recording();

    actions
        .player()
        .update(
            "p1",
            PlayerUpdate::with_tracks(vec![Track::new("t1"), Track::new("t2")]),
        )
        .unwrap();

    let [ActionEvent::PlayerUpdated(payload)] = actions.dispatcher().as_slice() else {
        panic!("expected a single UPDATE event");
    };
    let record = payload.entities.get(EntityKind::Player, "p1").unwrap();
    assert_eq!(record["id"], json!("p1"));
    assert_eq!(record["nowPlaying"], json!("t1"));
    assert_eq!(resolved_ids(actions.audio()), vec!["t1", "t2"]);
}

#[test]
fn test_update_overrides_id_in_params() {
    let mut actions = recording();
    let params = PlayerUpdate {
        id: Some("other".into()),
        loading: Some(true),
        ..PlayerUpdate::default()
    };

    actions.player().update("p1", params).unwrap();

    let normalized = actions.dispatcher()[0].normalized().unwrap();
    assert!(normalized.entities.get(EntityKind::Player, "p1").is_some());
    assert!(normalized.entities.get(EntityKind::Player, "other").is_none());
}

#[test]
fn test_set_repeat_defaults_to_false() {
    let mut actions = recording();
    actions.player().set_repeat(None).unwrap();
    actions.player().set_repeat(Some(true)).unwrap();

    let payloads: Vec<_> = actions
        .dispatcher()
        .iter()
        .map(|event| event.payload().unwrap())
        .collect();
    assert_eq!(
        payloads,
        vec![
            json!({ "config": { "repeat": false } }),
            json!({ "config": { "repeat": true } }),
        ]
    );
}

#[test]
fn test_set_volume_dispatches_before_engine_call() {
    let (mut actions, journal) = journaled();
    actions.player().set_volume(0.5).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec!["dispatch:player.CONFIG_UPDATED", "volume:0.5"]
    );
}

#[test]
fn test_player_id_payloads() {
    let mut actions = recording();
    actions.player().destroy("p1").unwrap();
    actions.player().next_track("p1").unwrap();
    actions.player().previous_track("p1").unwrap();

    for event in actions.dispatcher() {
        assert_eq!(event.payload().unwrap(), json!({ "playerID": "p1" }));
    }
    assert_eq!(
        actions
            .dispatcher()
            .iter()
            .map(ActionEvent::name)
            .collect::<Vec<_>>(),
        vec![
            events::player::DESTROY,
            events::player::NEXT_TRACK,
            events::player::PREVIOUS_TRACK
        ]
    );
    assert!(actions.audio().is_empty());
}

// ===== Queue Operations =====

#[test]
fn test_queue_track_dispatches_id_and_resolves_track() {
    let mut actions = recording();
    let track = Track::new("t9");

    actions.queue().queue_track(&track, 2).unwrap();

    let event = &actions.dispatcher()[0];
    assert_eq!(event.name(), "player.queue.QUEUE_TRACK");
    assert_eq!(event.payload().unwrap(), json!({ "index": 2, "trackID": "t9" }));
    assert_eq!(
        actions.audio().as_slice(),
        [AudioCall::ResolveTrack {
            track,
            tracks_per_artist: None
        }]
    );
}

#[test]
fn test_default_tracks_then_unqueue() {
    let (mut actions, journal) = journaled();
    let tracks = vec![Track::new("a"), Track::new("b")];

    actions.queue().set_default_tracks(&tracks).unwrap();
    actions.queue().unqueue_index(0).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec![
            "dispatch:player.queue.SET_DEFAULTS",
            "resolve:a",
            "resolve:b",
            "dispatch:player.queue.UNQUEUE_INDEX",
        ]
    );
}

// ===== Track Operations =====

#[test]
fn test_select_dispatches_then_loads_with_autoplay() {
    let (mut actions, journal) = journaled();
    actions.track().select(&Track::new("t1")).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec!["dispatch:player.track.SELECTED", "load:t1:true"]
    );
}

#[test]
fn test_seek_and_pause_never_dispatch() {
    let (mut actions, journal) = journaled();
    let track = Track::new("t1");

    actions.track().seek_to(&track, 12.5).unwrap();
    actions.track().toggle_pause(&track, false).unwrap();

    assert_eq!(*journal.borrow(), vec!["seek:t1:12.5", "pause:t1:false"]);
}

// ===== Audio Interface Callbacks =====

#[test]
fn test_callbacks_dispatch_exactly_once_each() {
    let mut actions = recording();
    {
        let mut callbacks = actions.audio_interface();
        callbacks.on_track_error("t1", json!("decode failed")).unwrap();
        callbacks.on_track_finish("t1").unwrap();
        callbacks.on_track_load_amount_change("t1", 2048).unwrap();
        callbacks.on_track_playing_change("t1", false).unwrap();
        callbacks.on_track_play_position_change("t1", 30.0).unwrap();
        callbacks.on_track_play_start("t1").unwrap();
        callbacks.on_track_ready("t1", json!({ "id": 5 })).unwrap();
        callbacks.on_track_resolved("t1", &[Track::new("t1")]).unwrap();
        callbacks.on_track_sound_added(Track::new("t1")).unwrap();
    }

    let names: Vec<_> = actions.dispatcher().iter().map(ActionEvent::name).collect();
    assert_eq!(names, events::ALL[10..].to_vec());
    assert!(actions.audio().is_empty());
}

#[test]
fn test_callback_payload_shapes() {
    let mut actions = recording();
    {
        let mut callbacks = actions.audio_interface();
        callbacks.on_track_load_amount_change("t1", 2048).unwrap();
        callbacks.on_track_playing_change("t1", true).unwrap();
        callbacks.on_track_play_position_change("t1", 30.5).unwrap();
    }

    let payloads: Vec<_> = actions
        .dispatcher()
        .iter()
        .map(|event| event.payload().unwrap())
        .collect();
    assert_eq!(
        payloads,
        vec![
            json!({ "bytesLoaded": 2048, "trackID": "t1" }),
            json!({ "isPlaying": true, "trackID": "t1" }),
            json!({ "position": 30.5, "trackID": "t1" }),
        ]
    );
}

#[test]
fn test_resolved_payload_carries_track_id_beside_entities() {
    let mut actions = recording();
    actions
        .audio_interface()
        .on_track_resolved(
            "artist-1",
            &[
                Track::new("t1").with_field("title", "A"),
                Track::new("t2").with_field("title", "B"),
            ],
        )
        .unwrap();

    assert_eq!(
        actions.dispatcher()[0].payload().unwrap(),
        json!({
            "entities": {
                "tracks": {
                    "t1": { "id": "t1", "title": "A" },
                    "t2": { "id": "t2", "title": "B" }
                }
            },
            "result": ["t1", "t2"],
            "trackID": "artist-1"
        })
    );
}

#[test]
fn test_sound_added_loading_follows_sound() {
    let mut actions = recording();
    let mut unloaded = Track::new("t1");
    unloaded.sound = Some(Sound {
        loaded: Some(false),
        ..Sound::default()
    });
    let mut loaded = Track::new("t2");
    loaded.sound = Some(Sound {
        loaded: Some(true),
        ..Sound::default()
    });
    loaded.playing = Some(true);

    {
        let mut callbacks = actions.audio_interface();
        callbacks.on_track_sound_added(unloaded).unwrap();
        callbacks.on_track_sound_added(loaded).unwrap();
    }

    let loading: Vec<_> = actions
        .dispatcher()
        .iter()
        .map(|event| {
            let normalized = event.normalized().unwrap();
            let id = normalized.result.as_one().unwrap();
            let record = normalized.entities.get(EntityKind::Track, id.as_str()).unwrap();
            assert!(!record.contains_key("playing"));
            record["loading"].clone()
        })
        .collect();
    assert_eq!(loading, vec![json!(true), json!(false)]);
}

// ===== Failures =====

#[test]
fn test_failed_normalization_dispatches_nothing() {
    let mut registry = SchemaRegistry::standard();
    registry.define(EntityKind::Track, "uid");
    let mut actions = recording().with_normalizer(Normalizer::new(registry));

    let err = actions
        .player()
        .create(Player::new("p1", vec![Track::new("t1")]))
        .unwrap_err();

    assert!(matches!(
        err,
        ActionError::Normalize(ToneError::MissingIdentity {
            kind: EntityKind::Track,
            attribute: "uid"
        })
    ));
    assert!(actions.dispatcher().is_empty());
    assert!(actions.audio().is_empty());
}

#[test]
fn test_empty_track_list_dispatches_nothing() {
    let mut actions = recording();

    let err = actions
        .player()
        .create(Player::new("p1", Vec::new()))
        .unwrap_err();

    assert_eq!(err.to_string(), "player.CREATE requires at least one track");
    assert!(actions.dispatcher().is_empty());
}

// ===== Hosts =====

#[test]
fn test_payload_dispatcher_receives_name_and_plain_payload() {
    let mut seen = Vec::new();
    {
        let mut actions = Actions::new(
            PayloadDispatcher(|name: &'static str, payload: serde_json::Value| {
                seen.push((name, payload));
            }),
            Vec::<AudioCall>::new(),
        );
        actions.queue().unqueue_index(4).unwrap();
    }

    assert_eq!(
        seen,
        vec![("player.queue.UNQUEUE_INDEX", json!({ "index": 4 }))]
    );
}

#[test]
fn test_channel_dispatcher_and_signal_pump() {
    let (event_tx, event_rx) = mpsc::channel::<ActionEvent>();
    let (signal_tx, signal_rx) = mpsc::channel();
    let config = ActionsConfig {
        default_tracks_per_artist: Some(2),
        ..ActionsConfig::default()
    };
    let mut actions = Actions::with_config(event_tx, Vec::<AudioCall>::new(), config);

    actions.track().select(&Track::new("t1")).unwrap();

    // Engine thread reports back
    let engine = std::thread::spawn(move || {
        signal_tx
            .send(EngineSignal::TrackPlayStart {
                track_id: "t1".into(),
            })
            .unwrap();
        signal_tx
            .send(EngineSignal::TrackPlayingChange {
                track_id: "t1".into(),
                is_playing: true,
            })
            .unwrap();
    });
    engine.join().unwrap();

    assert_eq!(actions.bridge().pump(&signal_rx).unwrap(), 2);

    let names: Vec<_> = event_rx.try_iter().map(|event| event.name()).collect();
    assert_eq!(
        names,
        vec![
            events::player::track::SELECTED,
            events::player::audio_interface::TRACK_PLAY_START,
            events::player::audio_interface::TRACK_PLAYING_CHANGED,
        ]
    );
}
