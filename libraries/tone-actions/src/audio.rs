//! Audio interface capability
//!
//! Track resolution and transport commands go out to the audio engine
//! through this trait. Every call is fire-and-forget: nothing comes back
//! synchronously, and completion (if any) re-enters the surface through
//! the audio interface callbacks, e.g. `on_track_resolved`.

use serde::{Deserialize, Serialize};
use tone_core::Track;

/// Outbound calls into the audio engine
pub trait AudioInterface {
    /// Expand `track` into playable tracks; reported back via
    /// `on_track_resolved`
    fn resolve_track(&mut self, track: &Track, tracks_per_artist: Option<u32>);

    /// Load `track`, optionally starting playback once loaded
    fn load_track(&mut self, track: &Track, autoplay: bool);

    /// Move the play position of `track`
    fn seek_track(&mut self, track: &Track, position: f64);

    /// Pause or resume `track`
    fn toggle_pause(&mut self, track: &Track, paused: bool);

    /// Set the output volume
    fn set_volume(&mut self, level: f64);
}

/// Audio interface that ignores every call
///
/// For hosts that only consume dispatched events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAudioInterface;

impl AudioInterface for NoopAudioInterface {
    fn resolve_track(&mut self, _track: &Track, _tracks_per_artist: Option<u32>) {}

    fn load_track(&mut self, _track: &Track, _autoplay: bool) {}

    fn seek_track(&mut self, _track: &Track, _position: f64) {}

    fn toggle_pause(&mut self, _track: &Track, _paused: bool) {}

    fn set_volume(&mut self, _level: f64) {}
}

/// A single recorded audio interface call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum AudioCall {
    ResolveTrack {
        track: Track,
        #[serde(rename = "tracksPerArtist")]
        tracks_per_artist: Option<u32>,
    },
    LoadTrack {
        track: Track,
        autoplay: bool,
    },
    SeekTrack {
        track: Track,
        position: f64,
    },
    TogglePause {
        track: Track,
        paused: bool,
    },
    SetVolume {
        level: f64,
    },
}

/// Recording audio interface
impl AudioInterface for Vec<AudioCall> {
    fn resolve_track(&mut self, track: &Track, tracks_per_artist: Option<u32>) {
        self.push(AudioCall::ResolveTrack {
            track: track.clone(),
            tracks_per_artist,
        });
    }

    fn load_track(&mut self, track: &Track, autoplay: bool) {
        self.push(AudioCall::LoadTrack {
            track: track.clone(),
            autoplay,
        });
    }

    fn seek_track(&mut self, track: &Track, position: f64) {
        self.push(AudioCall::SeekTrack {
            track: track.clone(),
            position,
        });
    }

    fn toggle_pause(&mut self, track: &Track, paused: bool) {
        self.push(AudioCall::TogglePause {
            track: track.clone(),
            paused,
        });
    }

    fn set_volume(&mut self, level: f64) {
        self.push(AudioCall::SetVolume { level });
    }
}

impl<A: AudioInterface + ?Sized> AudioInterface for &mut A {
    fn resolve_track(&mut self, track: &Track, tracks_per_artist: Option<u32>) {
        (**self).resolve_track(track, tracks_per_artist);
    }

    fn load_track(&mut self, track: &Track, autoplay: bool) {
        (**self).load_track(track, autoplay);
    }

    fn seek_track(&mut self, track: &Track, position: f64) {
        (**self).seek_track(track, position);
    }

    fn toggle_pause(&mut self, track: &Track, paused: bool) {
        (**self).toggle_pause(track, paused);
    }

    fn set_volume(&mut self, level: f64) {
        (**self).set_volume(level);
    }
}

impl<A: AudioInterface + ?Sized> AudioInterface for Box<A> {
    fn resolve_track(&mut self, track: &Track, tracks_per_artist: Option<u32>) {
        (**self).resolve_track(track, tracks_per_artist);
    }

    fn load_track(&mut self, track: &Track, autoplay: bool) {
        (**self).load_track(track, autoplay);
    }

    fn seek_track(&mut self, track: &Track, position: f64) {
        (**self).seek_track(track, position);
    }

    fn toggle_pause(&mut self, track: &Track, paused: bool) {
        (**self).toggle_pause(track, paused);
    }

    fn set_volume(&mut self, level: f64) {
        (**self).set_volume(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recorded_calls_serialize_with_call_tag() {
        let mut calls: Vec<AudioCall> = Vec::new();
        calls.resolve_track(&Track::new("t1"), Some(2));
        calls.set_volume(0.5);

        assert_eq!(
            serde_json::to_value(&calls).unwrap(),
            json!([
                { "call": "resolveTrack", "track": { "id": "t1" }, "tracksPerArtist": 2 },
                { "call": "setVolume", "level": 0.5 }
            ])
        );
    }

    #[test]
    fn boxed_interface_forwards() {
        let mut calls: Vec<AudioCall> = Vec::new();
        {
            let mut boxed: Box<dyn AudioInterface + '_> = Box::new(&mut calls);
            boxed.toggle_pause(&Track::new("t1"), true);
            boxed.seek_track(&Track::new("t1"), 30.0);
        }

        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], AudioCall::TogglePause { paused: true, .. }));
    }
}
