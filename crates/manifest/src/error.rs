//! Error types for the manifest codec
//!
//! Every decode, encode and build operation reports failure through
//! [`ManifestError`]. Errors abort the operation that produced them; nothing
//! in this crate retries or substitutes defaults for malformed input.

use crate::options::ReadOptionsError;
use std::io;
use thiserror::Error;

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Manifest sections whose lengths are declared in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Reserved signature section
    Authentication,
    /// Versioned metadata section
    Metadata,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Authentication => f.write_str("authentication"),
            Section::Metadata => f.write_str("metadata"),
        }
    }
}

/// Error types for the manifest codec
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Magic number does not identify an extension container
    #[error("Illegal magic number: 0x{magic:08X}")]
    InvalidHeader {
        /// Magic number found at offset 0
        magic: u32,
    },

    /// A section length exceeds the permitted bound
    #[error("Illegal {section} section: Section exceeds maximum length ({length} bytes > {max})")]
    SectionTooLarge {
        /// Offending section
        section: Section,
        /// Declared length
        length: u64,
        /// Permitted maximum
        max: u64,
    },

    /// The byte source ended before a declared region was complete
    #[error("Unexpected end of input: expected {expected} bytes, got {actual}")]
    UnexpectedEndOfInput {
        /// Bytes required
        expected: u64,
        /// Bytes actually available
        actual: u64,
    },

    /// A primitive field extends past the end of its buffer
    #[error("Truncated input: field requires {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes required by the field
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// No registered handler accepts the metadata format version
    #[error("Unsupported metadata format version: {0}")]
    UnsupportedFormatVersion(u8),

    /// A mandatory string is absent
    #[error("Missing value for required field: {0}")]
    MissingRequiredField(&'static str),

    /// A field is present but its value is malformed
    #[error("Illegal value for field {field}: {reason}")]
    InvalidFieldValue {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A numeric value does not fit its field width
    #[error("Value exceeds field bounds: {value} (permitted 0..={max})")]
    ValueOutOfRange {
        /// Value that was rejected
        value: i64,
        /// Largest value the field can hold
        max: u64,
    },

    /// A builder was finalized without a required section
    #[error("Missing manifest section: {0}")]
    MissingRequiredSection(&'static str),

    /// Read options failed validation
    #[error("Invalid read options: {0}")]
    InvalidOptions(#[from] ReadOptionsError),

    /// A string blob is not valid UTF-8
    #[error("Invalid string encoding: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// I/O error while reading or writing a container
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
