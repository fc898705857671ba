//! Binary codec building blocks shared by the header and metadata formats.

pub mod primitives;
pub mod traits;

pub use primitives::{
    estimate_bytes, estimate_collection, estimate_string, read_bytes, read_collection,
    read_string, read_unsigned_byte, read_unsigned_short, write_bytes, write_collection,
    write_string, write_unsigned_byte, write_unsigned_short, LENGTH_PREFIX_SIZE,
};
pub use traits::{BinaryDecodable, BinarySerializable};
