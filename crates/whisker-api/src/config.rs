//! Global configuration loader for Whisker.
//!
//! Reads a `whisker.toml` and deserializes it into [`GlobalConfig`]. Falls
//! back to sensible defaults when the file is missing or malformed.

use std::path::Path;

use whisker_types::config::GlobalConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "whisker.toml";

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file.
    File,
    /// No file at the path; defaults in use.
    Missing,
    /// The file could not be read or parsed; defaults in use.
    Fallback { reason: String },
}

/// Result of [`load_global_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: GlobalConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Emit the outcome of loading `config_path`.
    ///
    /// Loading happens before the subscriber exists, so the caller reports
    /// it once tracing is up.
    pub fn log_outcome(&self, config_path: &Path) {
        match &self.source {
            ConfigSource::File => {
                tracing::debug!(path = %config_path.display(), config = ?self.config, "Configuration loaded");
            }
            ConfigSource::Missing => {
                tracing::debug!("No config found at {}, using defaults", config_path.display());
            }
            ConfigSource::Fallback { reason } => {
                tracing::warn!("{reason}, using defaults");
            }
        }
    }
}

/// Load global configuration from `config_path`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`] with [`ConfigSource::Missing`].
/// - If the file exists but cannot be read or parsed, returns the default with
///   [`ConfigSource::Fallback`] carrying the reason.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(config_path: &Path) -> LoadedConfig {
    let defaults = |source| LoadedConfig {
        config: GlobalConfig::default(),
        source,
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return defaults(ConfigSource::Missing);
        }
        Err(err) => {
            return defaults(ConfigSource::Fallback {
                reason: format!("Failed to read {}: {err}", config_path.display()),
            });
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => LoadedConfig {
            config,
            source: ConfigSource::File,
        },
        Err(err) => defaults(ConfigSource::Fallback {
            reason: format!("Failed to parse {}: {err}", config_path.display()),
        }),
    }
}
