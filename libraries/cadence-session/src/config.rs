/// Session configuration
use crate::error::Result;
use cadence_library::LibraryConfig;
use cadence_navigation::NavigationConfig;
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `CADENCE_PLAYBACK__INITIAL_VOLUME=40`
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub playback: PlaybackConfig,
    pub navigation: NavigationConfig,
    pub library: LibraryConfig,
}

impl SessionConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// The file format follows its extension (TOML, JSON, YAML). Environment
    /// variables override the file; nested keys are separated by `__`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(true));
        }

        settings = settings.add_source(env);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_library::FailurePolicy;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_without_sources() {
        let config = SessionConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.playback.stream_endpoint, "/api/audio");
        assert_eq!(config.library.max_image_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn file_values_are_merged_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[playback]
stream_endpoint = "https://media.example.com/audio/"
initial_volume = 60

[library]
failure_policy = "rollback"

[navigation.bindings]
down = ["ArrowDown", "n"]
"#
        )
        .unwrap();

        let config = SessionConfig::load_with(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.playback.stream_endpoint, "https://media.example.com/audio/");
        assert_eq!(config.playback.initial_volume, 60);
        assert!(config.playback.auto_advance);
        assert_eq!(config.library.failure_policy, FailurePolicy::Rollback);
        assert_eq!(config.navigation.bindings.down.len(), 2);
        assert_eq!(
            config.navigation.bindings.up,
            cadence_navigation::KeyBindings::default().up
        );
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let config = SessionConfig::load_with(
            None,
            env(&[
                ("CADENCE_PLAYBACK__INITIAL_VOLUME", "25"),
                ("CADENCE_PLAYBACK__AUTO_ADVANCE", "false"),
            ]),
        )
        .unwrap();

        assert_eq!(config.playback.initial_volume, 25);
        assert!(!config.playback.auto_advance);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = SessionConfig::load_with(Some(Path::new("/nonexistent/cadence.toml")), env(&[]))
            .unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
