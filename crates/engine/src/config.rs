//! Engine configuration loaded from an optional TOML file.

use chess_core::STARTPOS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name reported in `id name`.
    pub name: String,
    /// Author reported in `id author`.
    pub author: String,
    /// Maximum log level written to stderr (`off`, `error` ... `trace`).
    pub log_level: String,
    /// FEN loaded at start-up and on `ucinewgame`.
    pub startpos: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: "bitboard-engine".to_string(),
            author: "Tom Metten".to_string(),
            log_level: "warn".to_string(),
            startpos: STARTPOS.to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads `engine.toml` from the working directory, or defaults if the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads an explicitly named file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("engine.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = EngineConfig::parse(
            r#"
name = "tester"
author = "someone"
log_level = "debug"
startpos = "8/8/8/8/8/8/8/K6k w - - 0 1"
"#,
        )
        .unwrap();
        assert_eq!(config.name, "tester");
        assert_eq!(config.author, "someone");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.startpos, "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = EngineConfig::parse("name = \"only-name\"").unwrap();
        assert_eq!(config.name, "only-name");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.startpos, STARTPOS);

        assert_eq!(EngineConfig::parse("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = EngineConfig::parse("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        let err = EngineConfig::parse("log_level = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = EngineConfig::load_from(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "author = \"file author\"\nlog_level = \"info\"\n").unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.author, "file author");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.name, "bitboard-engine");
    }

    #[test]
    fn default_path() {
        assert_eq!(EngineConfig::config_path(), PathBuf::from("engine.toml"));
    }
}
