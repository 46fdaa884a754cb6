//! Error types for the skill-check CLI.

use std::{io, path::PathBuf, process::ExitCode, result::Result as StdResult};

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for skill-check operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that stop the CLI before a verdict can be produced.
///
/// Problems with the skill package itself are never errors; they are
/// reported through a `Verdict`.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The configuration file parsed but holds unusable values.
    #[error("Invalid config at {path}: {message}")]
    InvalidConfig {
        /// Path to the config file.
        path: PathBuf,
        /// Description of the offending value.
        message: String,
    },
    /// The verdict could not be encoded as JSON.
    #[error("Failed to encode verdict: {source}")]
    VerdictEncode {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}
