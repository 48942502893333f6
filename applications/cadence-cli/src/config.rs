/// CLI configuration
use crate::error::{CliError, Result};
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Environment variable prefix, e.g. `CADENCE_PLAYBACK__SHUFFLE=true`
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// JSON array of track records
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Directory audio paths are resolved against; when set, tracks whose
    /// file is missing are reported unavailable
    #[serde(default)]
    pub audio_root: Option<PathBuf>,

    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            audio_root: None,
            log_filter: default_log_filter(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` is read when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, ENV_PREFIX)
    }

    /// Same as [`load`](Self::load) with a custom environment prefix
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
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

        // Override with environment variables; nested keys use "__"
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(CliError::Config("catalog_path is empty".to_string()));
        }

        if self.playback.tick_interval_ms == 0 {
            return Err(CliError::Config(
                "playback.tick_interval_ms must be positive".to_string(),
            ));
        }

        let threshold = self.playback.restart_threshold_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CliError::Config(format!(
                "playback.restart_threshold_secs must be a non-negative number, got {}",
                threshold
            )));
        }

        if let Some(root) = &self.audio_root {
            if !root.is_dir() {
                return Err(CliError::Config(format!(
                    "audio_root is not a directory: {}",
                    root.display()
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.json")
}

fn default_log_filter() -> String {
    "cadence=info,cadence_cli=info,cadence_playback=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert_eq!(config.playback.tick_interval_ms, 1000);
        config.validate().unwrap();
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let mut config = CliConfig::default();
        config.playback.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn negative_threshold_rejected() {
        let mut config = CliConfig::default();
        config.playback.restart_threshold_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = CliConfig::load_from(
            Some(Path::new("/definitely/not/here/cadence.toml")),
            "CADENCE_UNIT_MISSING",
        );
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("not found")));
    }
}
