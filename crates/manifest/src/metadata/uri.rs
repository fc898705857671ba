//! URI references carried in metadata
//!
//! Links are stored exactly as written so a decoded section re-encodes to
//! the same bytes. Both absolute URIs and relative references are accepted.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Base used only to check that relative references resolve.
const REFERENCE_BASE: &str = "urn-check://reference.invalid/";

/// Errors from [`Uri::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("URI reference is empty")]
    Empty,

    /// Whitespace and control characters are never valid, escaped or not.
    #[error("illegal character {ch:?} at index {index}")]
    IllegalCharacter { ch: char, index: usize },

    #[error("malformed URI reference: {0}")]
    Malformed(#[from] url::ParseError),
}

/// A validated URI reference, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    /// Validate `raw` as an absolute URI or a relative reference.
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        if raw.is_empty() {
            return Err(UriError::Empty);
        }
        if let Some((index, ch)) = raw
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || c.is_control())
        {
            return Err(UriError::IllegalCharacter { ch, index });
        }

        match Url::parse(raw) {
            Ok(_) => {}
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(REFERENCE_BASE)?.join(raw)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Uri(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the reference carries no scheme.
    pub fn is_relative(&self) -> bool {
        Url::parse(&self.0).is_err()
    }

    /// Parsed form of an absolute URI; `None` for relative references.
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Uri(url.into())
    }
}
