//! Length-prefixed primitive encoding
//!
//! All manifest fields are built from four primitives:
//!
//! ```text
//! unsigned byte   [value: u8]
//! unsigned short  [value: u16 BE]
//! bytes / string  [length: u16 BE][data: length bytes]     length 0 = absent
//! collection      [count: u16 BE][element]*count
//! ```
//!
//! Readers operate on a `&mut &[u8]` cursor and advance it by exactly the
//! number of bytes they consume. Writers append to any [`Write`] sink and emit
//! exactly the number of bytes reported by the matching `estimate_*` function.
//!
//! A zero-length blob always decodes to `None`. An empty string and an absent
//! string therefore share one encoding; the format cannot tell them apart.

use crate::error::{ManifestError, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Write;

/// Size of the length/count prefix in bytes.
pub const LENGTH_PREFIX_SIZE: u64 = 2;

fn ensure_remaining(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(ManifestError::TruncatedInput {
            needed,
            remaining: buf.len(),
        });
    }
    Ok(())
}

fn length_as_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Read an unsigned 8-bit integer.
pub fn read_unsigned_byte(buf: &mut &[u8]) -> Result<u8> {
    ensure_remaining(buf, 1)?;
    Ok(buf.read_u8()?)
}

/// Write an unsigned 8-bit integer.
///
/// Fails with `ValueOutOfRange` unless `0 <= value <= 255`.
pub fn write_unsigned_byte<W: Write + ?Sized>(out: &mut W, value: i64) -> Result<()> {
    let byte = u8::try_from(value).map_err(|_| ManifestError::ValueOutOfRange {
        value,
        max: u8::MAX as u64,
    })?;
    out.write_u8(byte)?;
    Ok(())
}

/// Read an unsigned 16-bit big-endian integer.
pub fn read_unsigned_short(buf: &mut &[u8]) -> Result<u16> {
    ensure_remaining(buf, 2)?;
    Ok(buf.read_u16::<BigEndian>()?)
}

/// Write an unsigned 16-bit big-endian integer.
///
/// Fails with `ValueOutOfRange` unless `0 <= value <= 65535`.
pub fn write_unsigned_short<W: Write + ?Sized>(out: &mut W, value: i64) -> Result<()> {
    let short = u16::try_from(value).map_err(|_| ManifestError::ValueOutOfRange {
        value,
        max: u16::MAX as u64,
    })?;
    out.write_u16::<BigEndian>(short)?;
    Ok(())
}

/// Read a length-prefixed blob, borrowing from the cursor.
///
/// Returns `None` for a zero-length blob.
pub fn read_bytes<'a>(buf: &mut &'a [u8]) -> Result<Option<&'a [u8]>> {
    let length = read_unsigned_short(buf)? as usize;
    if length == 0 {
        return Ok(None);
    }

    ensure_remaining(buf, length)?;
    let (data, rest) = buf.split_at(length);
    *buf = rest;
    Ok(Some(data))
}

/// Write a length-prefixed blob; `None` is written as length 0.
pub fn write_bytes<W: Write + ?Sized>(out: &mut W, data: Option<&[u8]>) -> Result<()> {
    let data = data.unwrap_or_default();
    write_unsigned_short(out, length_as_i64(data.len()))?;
    out.write_all(data)?;
    Ok(())
}

/// Encoded size of a blob written by [`write_bytes`].
pub fn estimate_bytes(data: Option<&[u8]>) -> u64 {
    LENGTH_PREFIX_SIZE + data.map_or(0, |d| d.len() as u64)
}

/// Read a length-prefixed UTF-8 string.
///
/// Returns `None` for a zero-length string.
pub fn read_string(buf: &mut &[u8]) -> Result<Option<String>> {
    match read_bytes(buf)? {
        Some(data) => Ok(Some(String::from_utf8(data.to_vec())?)),
        None => Ok(None),
    }
}

/// Write a length-prefixed UTF-8 string; `None` is written as length 0.
pub fn write_string<W: Write + ?Sized>(out: &mut W, value: Option<&str>) -> Result<()> {
    write_bytes(out, value.map(str::as_bytes))
}

/// Encoded size of a string written by [`write_string`].
pub fn estimate_string(value: Option<&str>) -> u64 {
    estimate_bytes(value.map(str::as_bytes))
}

/// Read a counted collection, decoding each element in order.
pub fn read_collection<'a, T, F>(buf: &mut &'a [u8], mut decode: F) -> Result<Vec<T>>
where
    F: FnMut(&mut &'a [u8]) -> Result<T>,
{
    let count = read_unsigned_short(buf)? as usize;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(decode(buf)?);
    }
    Ok(items)
}

/// Write a counted collection, encoding each element in order.
///
/// Fails with `ValueOutOfRange` when there are more than 65535 elements.
pub fn write_collection<W, T, F>(out: &mut W, items: &[T], mut encode: F) -> Result<()>
where
    W: Write + ?Sized,
    F: FnMut(&mut W, &T) -> Result<()>,
{
    write_unsigned_short(out, length_as_i64(items.len()))?;
    for item in items {
        encode(out, item)?;
    }
    Ok(())
}

/// Encoded size of a collection written by [`write_collection`].
pub fn estimate_collection<T, F>(items: &[T], estimate: F) -> u64
where
    F: Fn(&T) -> u64,
{
    LENGTH_PREFIX_SIZE + items.iter().map(estimate).sum::<u64>()
}
