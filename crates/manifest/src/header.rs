//! Fixed-size container header
//!
//! ## Layout (30 bytes, big-endian)
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic (0x0DEBAC1E)
//! 4       2     Container flags
//! 6       8     Authentication section length
//! 14      8     Metadata section length
//! 22      8     Content length
//! ```

use crate::error::{ManifestError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Magic number opening every extension container.
pub const MAGIC_NUMBER: u32 = 0x0DEB_AC1E;

/// Size of the encoded header in bytes.
pub const HEADER_LENGTH: usize = 30;

/// Decoded container header.
///
/// Lengths are carried exactly as stored; bounds are checked by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestHeader {
    /// Container flags, preserved verbatim
    pub flags: u16,
    /// Length of the reserved authentication section
    pub authentication_length: u64,
    /// Length of the metadata section
    pub metadata_length: u64,
    /// Length of the payload following the manifest
    pub content_length: u64,
}

impl ManifestHeader {
    /// Serialize header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0u8; HEADER_LENGTH];
        BigEndian::write_u32(&mut bytes[0..4], MAGIC_NUMBER);
        BigEndian::write_u16(&mut bytes[4..6], self.flags);
        BigEndian::write_u64(&mut bytes[6..14], self.authentication_length);
        BigEndian::write_u64(&mut bytes[14..22], self.metadata_length);
        BigEndian::write_u64(&mut bytes[22..30], self.content_length);
        bytes
    }

    /// Deserialize header from bytes, rejecting a foreign magic number.
    pub fn from_bytes(bytes: &[u8; HEADER_LENGTH]) -> Result<Self> {
        let magic = BigEndian::read_u32(&bytes[0..4]);
        if magic != MAGIC_NUMBER {
            return Err(ManifestError::InvalidHeader { magic });
        }

        Ok(ManifestHeader {
            flags: BigEndian::read_u16(&bytes[4..6]),
            authentication_length: BigEndian::read_u64(&bytes[6..14]),
            metadata_length: BigEndian::read_u64(&bytes[14..22]),
            content_length: BigEndian::read_u64(&bytes[22..30]),
        })
    }

    /// Offset of the first payload byte from the container start.
    pub fn content_offset(&self) -> u64 {
        HEADER_LENGTH as u64 + self.authentication_length + self.metadata_length
    }
}
