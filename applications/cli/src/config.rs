/// CLI configuration
use crate::error::{CliError, Result};
use resonance_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "resonance.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Catalog file (TOML or JSON); the built-in sample set when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Queue the whole catalog when the session starts
    #[serde(default = "default_seed_queue")]
    pub seed_queue: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `resonance.toml` is read if
    /// present. `RESONANCE_<SECTION>__<KEY>` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    pub(crate) fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config: Self = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 1, got {}",
                volume
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config("logging.filter must not be empty".to_string()));
        }

        Ok(())
    }

    /// Render as TOML, e.g. for `resonance config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("RESONANCE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            seed_queue: default_seed_queue(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_seed_queue() -> bool {
    true
}

fn default_filter() -> String {
    "resonance=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.playback.volume, 0.5);
        assert!(config.catalog.seed_queue);
        assert_eq!(config.logging.filter, "resonance=info");
    }

    #[test]
    fn file_values_are_read() {
        let file = config_file(
            r#"
[playback]
volume = 0.8
autoplay_next = false

[catalog]
path = "tracks.toml"
seed_queue = false
"#,
        );
        let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.playback.volume, 0.8);
        assert!(!config.playback.autoplay_next);
        assert_eq!(config.playback.load_retries, 2);
        assert_eq!(config.catalog.path, Some(PathBuf::from("tracks.toml")));
        assert!(!config.catalog.seed_queue);
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file("[playback]\nload_retries = 5\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("RESONANCE_PLAYBACK__LOAD_RETRIES", "1"),
                ("RESONANCE_LOGGING__FILTER", "debug"),
            ]),
        )
        .unwrap();
        assert_eq!(config.playback.load_retries, 1);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load_with_env(Some(Path::new("/no/such/resonance.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("not found")));
    }

    #[test]
    fn out_of_range_volume_rejected() {
        let file = config_file("[playback]\nvolume = 1.5\n");
        let err = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("volume")));
    }

    #[test]
    fn renders_as_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[playback]"));
        assert!(rendered.contains("seed_queue = true"));
    }
}
