//! Codec trait definitions.

use crate::error::Result;
use std::io::Write;

/// A value with a fixed binary encoding.
///
/// # Length Honesty
///
/// `serialized_length()` must return exactly the number of bytes that
/// `serialize()` writes for the same value. The manifest header records
/// section lengths computed this way before any section byte is written, so
/// a mismatch produces a container whose offsets point into the wrong data.
pub trait BinarySerializable {
    /// Number of bytes `serialize` will write.
    fn serialized_length(&self) -> u64;

    /// Encode this value into `out`.
    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;

    /// Encode this value into a freshly allocated buffer.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let capacity = usize::try_from(self.serialized_length()).unwrap_or(0);
        let mut buf = Vec::with_capacity(capacity);
        self.serialize(&mut buf)?;
        Ok(buf)
    }
}

/// A value that can be decoded from a positioned byte cursor.
///
/// Implementations consume exactly the bytes of one encoded value and leave
/// the cursor positioned after it.
pub trait BinaryDecodable: Sized {
    /// Decode one value, advancing `buf`.
    fn decode(buf: &mut &[u8]) -> Result<Self>;
}
