/// Replay configuration
use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tone_actions::ActionsConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub actions: ActionsConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Pretty-print each line
    #[serde(default)]
    pub pretty: bool,

    /// Also write audio interface calls as `{"sideEffect": ...}` lines
    #[serde(default)]
    pub include_side_effects: bool,
}

impl ReplayConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `TONE_` and use `__` between
    /// sections, e.g. `TONE_OUTPUT__INCLUDE_SIDE_EFFECTS=true`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ReplayError::Config(format!(
                    "Config file not found at {:?}",
                    path
                )));
            }
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TONE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.actions.default_tracks_per_artist == Some(0) {
            return Err(ReplayError::Config(
                "actions.default_tracks_per_artist must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = ReplayConfig::default();
        assert!(config.actions.autoplay_on_select);
        assert_eq!(config.output, OutputSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_sections_from_toml() {
        let file = write_config(
            r#"
[actions]
default_tracks_per_artist = 5
autoplay_on_select = false

[output]
include_side_effects = true
"#,
        );

        let config = ReplayConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.actions.default_tracks_per_artist, Some(5));
        assert!(!config.actions.autoplay_on_select);
        assert!(config.output.include_side_effects);
        assert!(!config.output.pretty);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ReplayConfig::load(Some(Path::new("/nonexistent/tone.toml"))).unwrap_err();
        assert!(matches!(err, ReplayError::Config(_)));
    }

    #[test]
    fn zero_tracks_per_artist_is_rejected() {
        let mut config = ReplayConfig::default();
        config.actions.default_tracks_per_artist = Some(0);
        assert!(config.validate().is_err());
    }
}
