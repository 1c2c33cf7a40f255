//! Bridge configuration.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! # How TextBridge::dispatch answers unknown methods: "reject" or "ignore"
//! unknown_method = "reject"
//! object_path = "/org/a11y/atspi/accessible/text"
//! bus_name = "org.example.App"
//! ```
//!
//! Every key is optional.
//!
//! `unknown_method` only governs [`crate::TextBridge::dispatch`]. When the
//! interface is served over D-Bus, the zbus object server answers members
//! the interface does not declare with `UnknownMethod` regardless.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default object path the Text interface is served at.
pub const DEFAULT_OBJECT_PATH: &str = "/org/a11y/atspi/accessible/text";

/// What to do with a call to a method the Text interface does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMethodPolicy {
    /// Reply with an `UnknownMethod` error.
    #[default]
    Reject,
    /// Produce no reply at all.
    Ignore,
}

/// Configuration for serving accessible text over AT-SPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Handling of unknown method names by [`crate::TextBridge::dispatch`].
    ///
    /// Has no effect on `dbus::connect_session`, where zbus rejects
    /// undeclared members itself.
    pub unknown_method: UnknownMethodPolicy,
    /// Object path the Text interface is registered at.
    pub object_path: String,
    /// Well-known bus name to request, if any.
    pub bus_name: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            unknown_method: UnknownMethodPolicy::default(),
            object_path: DEFAULT_OBJECT_PATH.to_string(),
            bus_name: None,
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has
    /// the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: crate::logging::targets::CONFIG,
            path = %path.display(),
            ?config,
            "loaded bridge configuration"
        );
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.unknown_method, UnknownMethodPolicy::Reject);
        assert_eq!(config.object_path, DEFAULT_OBJECT_PATH);
        assert!(config.bus_name.is_none());
    }

    #[test]
    fn test_parse_all_keys() {
        let config = BridgeConfig::from_toml_str(
            r#"
            unknown_method = "ignore"
            object_path = "/org/example/label"
            bus_name = "org.example.App"
            "#,
        )
        .unwrap();
        assert_eq!(config.unknown_method, UnknownMethodPolicy::Ignore);
        assert_eq!(config.object_path, "/org/example/label");
        assert_eq!(config.bus_name.as_deref(), Some("org.example.App"));
    }

    #[test]
    fn test_invalid_policy() {
        let err = BridgeConfig::from_toml_str(r#"unknown_method = "shrug""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BridgeConfig {
            unknown_method: UnknownMethodPolicy::Ignore,
            bus_name: Some("org.example.App".into()),
            ..BridgeConfig::default()
        };
        let source = config.to_toml_string().unwrap();
        assert_eq!(BridgeConfig::from_toml_str(&source).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = BridgeConfig::load("/nonexistent/bridge.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
