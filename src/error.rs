use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by file loading, persisting and format selection.
///
/// Typed value access never errors; lookups that miss or cannot be coerced
/// resolve to the target type's zero value instead (see [`crate::coerce`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configured file does not exist. Callers commonly branch on this
    /// to fall back to defaults instead of failing startup.
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A load or persist was attempted before any format was selected.
    #[error("no config format set")]
    FormatNotSet,

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse YAML config '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode TOML config '{path}': {source}")]
    EncodeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("failed to encode YAML config '{path}': {source}")]
    EncodeYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to encode JSON config '{path}': {source}")]
    EncodeJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}
