//! Command failures.

use chloramine_manifest::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed container manifest or rejected metadata.
    #[error("Malformed container manifest: {0}")]
    Manifest(#[from] ManifestError),

    /// A file could not be opened, read or written.
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A command line value is malformed.
    #[error("Illegal {kind} #{index}: {reason}")]
    InvalidArgument {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    /// JSON rendering failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
