//! Global configuration types for Whisker.
//!
//! `GlobalConfig` represents the top-level `config.toml` that bounds request
//! parameters and selects the log output.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub params: ParamLimits,

    #[serde(default)]
    pub log: LogConfig,
}

/// Upper bounds enforced by parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamLimits {
    /// Maximum number of `sortBy` values per request.
    #[serde(default = "default_max_sort_keys")]
    pub max_sort_keys: usize,

    /// Maximum number of entries in a single filter dimension.
    #[serde(default = "default_max_filter_values")]
    pub max_filter_values: usize,
}

fn default_max_sort_keys() -> usize {
    6
}

fn default_max_filter_values() -> usize {
    100
}

impl Default for ParamLimits {
    fn default() -> Self {
        Self {
            max_sort_keys: default_max_sort_keys(),
            max_filter_values: default_max_filter_values(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.params.max_sort_keys, 6);
        assert_eq!(config.params.max_filter_values, 100);
        assert!(!config.log.json);
        assert!(!config.log.otel);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_partial_section() {
        let toml_str = r#"
[params]
max_filter_values = 20

[log]
json = true
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.params.max_filter_values, 20);
        assert_eq!(config.params.max_sort_keys, 6);
        assert!(config.log.json);
        assert!(!config.log.otel);
    }

    #[test]
    fn test_global_config_serde_roundtrip() {
        let config = GlobalConfig {
            params: ParamLimits {
                max_sort_keys: 2,
                max_filter_values: 10,
            },
            log: LogConfig {
                json: true,
                otel: true,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GlobalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
