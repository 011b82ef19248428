//! Codec configuration
//!
//! Loaded from `tagwire.toml` in the working directory, falling back to
//! `<config dir>/tagwire/config.toml`. Every key is optional.
//!
//! ```toml
//! [decode]
//! missing_fields = "error"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

const LOCAL_FILE: &str = "tagwire.toml";

/// What the decoder does when an object field has no column in the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFields {
    /// Decode the field as `Undefined`.
    #[default]
    Undefined,
    /// Fail with `CodecError::MissingField`.
    Error,
}

/// Options for the schema-driven decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub missing_fields: MissingFields,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub decode: DecodeOptions,
}

impl CodecConfig {
    /// Create a new configuration builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    pub fn from_toml(content: &str) -> CodecResult<Self> {
        toml::from_str(content).map_err(|e| CodecError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the first config file that exists, or the defaults when none does.
    pub fn discover() -> CodecResult<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load(path),
            None => {
                tracing::trace!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Search order used by [`CodecConfig::discover`].
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tagwire").join("config.toml"));
        }
        paths
    }
}

/// Builder for CodecConfig
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    pub fn missing_fields(mut self, policy: MissingFields) -> Self {
        self.config.decode.missing_fields = policy;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::from_toml("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.decode.missing_fields, MissingFields::Undefined);
    }

    #[test]
    fn test_missing_fields_policy() {
        let config = CodecConfig::from_toml("[decode]\nmissing_fields = \"error\"\n").unwrap();
        assert_eq!(config.decode.missing_fields, MissingFields::Error);
    }

    #[test]
    fn test_invalid_toml() {
        let err = CodecConfig::from_toml("[decode]\nmissing_fields = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = CodecConfig::builder().missing_fields(MissingFields::Error).build();
        assert_eq!(config.decode.missing_fields, MissingFields::Error);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tagwire-config-{}.toml", std::process::id()));
        fs::write(&path, "[decode]\nmissing_fields = \"error\"\n").unwrap();
        let config = CodecConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.decode.missing_fields, MissingFields::Error);
    }

    #[test]
    fn test_candidate_paths_start_local() {
        assert_eq!(CodecConfig::candidate_paths()[0], PathBuf::from("tagwire.toml"));
    }
}
