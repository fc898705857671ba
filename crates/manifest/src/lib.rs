//! Extension container manifest codec
//!
//! An extension container is a single binary file: a fixed 30-byte header,
//! a reserved authentication section, a versioned metadata section and
//! the extension payload. This crate reads and writes everything up to the
//! payload.
//!
//! - Primitive codec: length-prefixed strings, blobs and collections
//! - Metadata records: revision 0 schema and its builder
//! - Handler registry: format version to decoder/builder dispatch
//! - Manifest: header protocol, offset arithmetic, payload decoration

#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod header;
pub mod manifest;
pub mod metadata;
pub mod options;
pub mod registry;

pub use codec::{BinaryDecodable, BinarySerializable};
pub use error::{ManifestError, Result, Section};
pub use header::{ManifestHeader, HEADER_LENGTH, MAGIC_NUMBER};
pub use manifest::{Manifest, ManifestBuilder};
pub use metadata::{
    Author, Dependency, Metadata, MetadataBuilder, MetadataV0, MetadataV0Builder, Service, Uri,
    UriError, METADATA_V0_VERSION,
};
pub use options::{ReadOptions, ReadOptionsError, DEFAULT_MAX_SECTION_LENGTH};
pub use registry::{
    register_metadata_handler, resolve_builder_factory, resolve_decoder, MetadataHandler,
};
