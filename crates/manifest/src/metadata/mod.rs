//! Versioned extension metadata
//!
//! The metadata section starts with a single format version byte. The
//! remaining bytes are interpreted by whichever handler in the
//! [registry](crate::registry) accepts that version.

pub mod types;
pub mod uri;
pub mod v0;

pub use types::{Author, Dependency, Service};
pub use uri::{Uri, UriError};
pub use v0::{MetadataV0, MetadataV0Builder, METADATA_V0_VERSION};

use crate::codec::primitives::read_unsigned_byte;
use crate::codec::{BinaryDecodable, BinarySerializable};
use crate::error::Result;
use crate::registry;
use std::io::Write;
use tracing::debug;

/// Metadata record of any supported format revision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Metadata {
    /// Format revision 0
    V0(MetadataV0),
}

impl Metadata {
    /// Format version byte written at the start of the section.
    pub fn format_version(&self) -> u8 {
        match self {
            Metadata::V0(m) => m.format_version(),
        }
    }

    /// The revision 0 record, if this is one.
    pub fn as_v0(&self) -> Option<&MetadataV0> {
        match self {
            Metadata::V0(m) => Some(m),
        }
    }

    pub fn product_identifier(&self) -> &str {
        match self {
            Metadata::V0(m) => m.product_identifier(),
        }
    }

    pub fn environment_type(&self) -> &str {
        match self {
            Metadata::V0(m) => m.environment_type(),
        }
    }

    pub fn flags(&self) -> u16 {
        match self {
            Metadata::V0(m) => m.flags(),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Metadata::V0(m) => m.identifier(),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Metadata::V0(m) => m.version(),
        }
    }

    pub fn distribution_url(&self) -> Option<&Uri> {
        match self {
            Metadata::V0(m) => m.distribution_url(),
        }
    }

    pub fn documentation_url(&self) -> Option<&Uri> {
        match self {
            Metadata::V0(m) => m.documentation_url(),
        }
    }

    pub fn issue_reporting_url(&self) -> Option<&Uri> {
        match self {
            Metadata::V0(m) => m.issue_reporting_url(),
        }
    }

    pub fn authors(&self) -> &[Author] {
        match self {
            Metadata::V0(m) => m.authors(),
        }
    }

    pub fn contributors(&self) -> &[Author] {
        match self {
            Metadata::V0(m) => m.contributors(),
        }
    }

    pub fn provided_services(&self) -> &[Service] {
        match self {
            Metadata::V0(m) => m.provided_services(),
        }
    }

    pub fn extension_dependencies(&self) -> &[Dependency] {
        match self {
            Metadata::V0(m) => m.extension_dependencies(),
        }
    }

    pub fn service_dependencies(&self) -> &[Dependency] {
        match self {
            Metadata::V0(m) => m.service_dependencies(),
        }
    }
}

impl BinarySerializable for Metadata {
    fn serialized_length(&self) -> u64 {
        match self {
            Metadata::V0(m) => m.serialized_length(),
        }
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        match self {
            Metadata::V0(m) => m.serialize(out),
        }
    }
}

impl BinaryDecodable for Metadata {
    /// Read the version byte and dispatch to the registered decoder.
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let version = read_unsigned_byte(buf)?;
        let handler = registry::resolve_decoder(version)?;
        debug!(version, handler = handler.name, "Decoding metadata section");
        (handler.decode)(version, buf)
    }
}

impl From<MetadataV0> for Metadata {
    fn from(metadata: MetadataV0) -> Self {
        Metadata::V0(metadata)
    }
}

/// Accumulates metadata fields for one format revision.
///
/// Setters return the builder itself so calls can be chained through a
/// `&mut dyn MetadataBuilder`. Builders are obtained from
/// [`registry::resolve_builder_factory`] or from a concrete schema such as
/// [`MetadataV0::builder`].
pub trait MetadataBuilder {
    /// Version this builder stamps on the built record.
    fn format_version(&self) -> u8;

    fn set_product_identifier(&mut self, value: &str) -> &mut dyn MetadataBuilder;

    fn set_environment_type(&mut self, value: &str) -> &mut dyn MetadataBuilder;

    fn set_flags(&mut self, flags: u16) -> &mut dyn MetadataBuilder;

    fn set_identifier(&mut self, value: &str) -> &mut dyn MetadataBuilder;

    fn set_version(&mut self, value: &str) -> &mut dyn MetadataBuilder;

    fn set_distribution_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder;

    fn set_documentation_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder;

    fn set_issue_reporting_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder;

    /// Append an author; `None` or an empty alias means no alias.
    fn add_author(&mut self, name: &str, alias: Option<&str>) -> &mut dyn MetadataBuilder;

    fn add_contributor(&mut self, name: &str, alias: Option<&str>) -> &mut dyn MetadataBuilder;

    fn add_service(&mut self, identifier: &str, version: &str) -> &mut dyn MetadataBuilder;

    fn add_extension_dependency(
        &mut self,
        identifier: &str,
        version_range: &str,
        optional: bool,
    ) -> &mut dyn MetadataBuilder;

    fn add_service_dependency(
        &mut self,
        identifier: &str,
        version_range: &str,
        optional: bool,
    ) -> &mut dyn MetadataBuilder;

    /// Validate mandatory fields and produce the record.
    ///
    /// The builder is left empty afterwards, whether or not validation
    /// succeeded.
    fn build(&mut self) -> Result<Metadata>;
}
