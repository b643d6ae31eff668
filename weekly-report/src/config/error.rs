//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse configuration '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in settings.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// Missing configuration file.
    #[error("Missing configuration file: {path}\n\nExample configuration:\n\n{example}")]
    MissingFile { path: String, example: String },

    /// No home directory to derive the default location from.
    #[error("Cannot determine the home directory; pass --config explicitly")]
    NoHomeDirectory,
}
