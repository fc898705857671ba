//! Wrap defaults via `chloramine.toml`
//!
//! Values in the file only supply defaults; options given on the command
//! line always win.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "chloramine.toml";

/// Defaults for the `wrap` command.
///
/// # Example
///
/// ```toml
/// product_identifier = "org.basinmc.faucet"
/// environment_type = "java"
/// format_version = 0
/// flags = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapConfig {
    /// Target product (default: `org.basinmc.faucet`).
    #[serde(default = "default_product_identifier")]
    pub product_identifier: String,
    /// Extension environment (default: `java`).
    #[serde(default = "default_environment_type")]
    pub environment_type: String,
    /// Metadata format revision.
    #[serde(default)]
    pub format_version: u8,
    /// Container flags.
    #[serde(default)]
    pub flags: u16,
}

fn default_product_identifier() -> String {
    "org.basinmc.faucet".to_string()
}

fn default_environment_type() -> String {
    "java".to_string()
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            product_identifier: default_product_identifier(),
            environment_type: default_environment_type(),
            format_version: 0,
            flags: 0,
        }
    }
}

impl WrapConfig {
    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match Self::from_file(path) {
            Err(CliError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}
