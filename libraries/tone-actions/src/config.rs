//! Action surface configuration

use serde::{Deserialize, Serialize};

/// Configuration for the action surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Tracks per artist passed to track resolution when the player (or
    /// update params) does not say (default: None)
    pub default_tracks_per_artist: Option<u32>,

    /// Start playback as soon as a selected track loads (default: true)
    pub autoplay_on_select: bool,
}

impl ActionsConfig {
    /// Tracks per artist for a resolution request
    pub fn tracks_per_artist(&self, requested: Option<u32>) -> Option<u32> {
        requested.or(self.default_tracks_per_artist)
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            default_tracks_per_artist: None,
            autoplay_on_select: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ActionsConfig::default();
        assert_eq!(config.default_tracks_per_artist, None);
        assert!(config.autoplay_on_select);
    }

    #[test]
    fn requested_tracks_per_artist_wins_over_default() {
        let config = ActionsConfig {
            default_tracks_per_artist: Some(5),
            ..ActionsConfig::default()
        };
        assert_eq!(config.tracks_per_artist(Some(2)), Some(2));
        assert_eq!(config.tracks_per_artist(None), Some(5));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ActionsConfig =
            serde_json::from_str(r#"{ "default_tracks_per_artist": 3 }"#).unwrap();
        assert_eq!(config.default_tracks_per_artist, Some(3));
        assert!(config.autoplay_on_select);
    }
}
