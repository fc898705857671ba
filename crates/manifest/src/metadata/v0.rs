//! Metadata format revision 0
//!
//! ## Section Layout
//!
//! ```text
//! [format_version: u8]
//! [product_identifier: str]
//! [environment_type: str]
//! [flags: u16]
//! [identifier: str]
//! [version: str]
//! [distribution_url: str|absent]
//! [documentation_url: str|absent]
//! [issue_reporting_url: str|absent]
//! [authors: list<Author>]
//! [contributors: list<Author>]
//! [provided_services: list<Service>]
//! [extension_dependencies: list<Dependency>]
//! [service_dependencies: list<Dependency>]
//! ```
//!
//! All strings are u16-length-prefixed UTF-8, lists are u16-count-prefixed.

use super::types::{read_required_string, write_required_string, Author, Dependency, Service};
use super::uri::Uri;
use super::{Metadata, MetadataBuilder};
use crate::codec::primitives::{
    estimate_collection, estimate_string, read_collection, read_string, read_unsigned_short,
    write_collection, write_string, write_unsigned_byte, write_unsigned_short,
};
use crate::codec::{BinaryDecodable, BinarySerializable};
use crate::error::{ManifestError, Result};
use std::io::Write;

/// Format version written by [`MetadataV0Builder`].
pub const METADATA_V0_VERSION: u8 = 0;

/// Decoded revision 0 metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetadataV0 {
    format_version: u8,
    product_identifier: String,
    environment_type: String,
    flags: u16,
    identifier: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution_url: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation_url: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_reporting_url: Option<Uri>,
    authors: Vec<Author>,
    contributors: Vec<Author>,
    provided_services: Vec<Service>,
    extension_dependencies: Vec<Dependency>,
    service_dependencies: Vec<Dependency>,
}

fn read_uri(buf: &mut &[u8], field: &'static str) -> Result<Option<Uri>> {
    match read_string(buf)? {
        Some(raw) => Uri::parse(&raw)
            .map(Some)
            .map_err(|e| ManifestError::InvalidFieldValue {
                field,
                reason: format!("{}: {:?}", e, raw),
            }),
        None => Ok(None),
    }
}

impl MetadataV0 {
    /// Create an empty builder for revision 0.
    pub fn builder() -> MetadataV0Builder {
        MetadataV0Builder::new(METADATA_V0_VERSION)
    }

    /// Decode the section body following the version byte.
    ///
    /// Fields are read strictly in layout order and the first missing or
    /// malformed field aborts the decode.
    pub fn decode_body(format_version: u8, buf: &mut &[u8]) -> Result<Self> {
        let product_identifier = read_required_string(buf, "product_identifier")?;
        let environment_type = read_required_string(buf, "environment_type")?;
        let flags = read_unsigned_short(buf)?;

        let identifier = read_required_string(buf, "identifier")?;
        let version = read_required_string(buf, "version")?;

        let distribution_url = read_uri(buf, "distribution_url")?;
        let documentation_url = read_uri(buf, "documentation_url")?;
        let issue_reporting_url = read_uri(buf, "issue_reporting_url")?;

        let authors = read_collection(buf, Author::decode)?;
        let contributors = read_collection(buf, Author::decode)?;

        let provided_services = read_collection(buf, Service::decode)?;
        let extension_dependencies = read_collection(buf, Dependency::decode)?;
        let service_dependencies = read_collection(buf, Dependency::decode)?;

        Ok(MetadataV0 {
            format_version,
            product_identifier,
            environment_type,
            flags,
            identifier,
            version,
            distribution_url,
            documentation_url,
            issue_reporting_url,
            authors,
            contributors,
            provided_services,
            extension_dependencies,
            service_dependencies,
        })
    }

    /// Format revision this record was decoded from or built for.
    pub fn format_version(&self) -> u8 {
        self.format_version
    }

    /// Identifier of the product the extension targets.
    pub fn product_identifier(&self) -> &str {
        &self.product_identifier
    }

    /// Product specific environment (e.g. `java`).
    pub fn environment_type(&self) -> &str {
        &self.environment_type
    }

    /// Documentation-only metadata flags.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Globally unique extension identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Extension version.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn distribution_url(&self) -> Option<&Uri> {
        self.distribution_url.as_ref()
    }

    pub fn documentation_url(&self) -> Option<&Uri> {
        self.documentation_url.as_ref()
    }

    pub fn issue_reporting_url(&self) -> Option<&Uri> {
        self.issue_reporting_url.as_ref()
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn contributors(&self) -> &[Author] {
        &self.contributors
    }

    pub fn provided_services(&self) -> &[Service] {
        &self.provided_services
    }

    pub fn extension_dependencies(&self) -> &[Dependency] {
        &self.extension_dependencies
    }

    pub fn service_dependencies(&self) -> &[Dependency] {
        &self.service_dependencies
    }
}

impl BinarySerializable for MetadataV0 {
    fn serialized_length(&self) -> u64 {
        1 + estimate_string(Some(&self.product_identifier))
            + estimate_string(Some(&self.environment_type))
            + 2
            + estimate_string(Some(&self.identifier))
            + estimate_string(Some(&self.version))
            + estimate_string(self.distribution_url.as_ref().map(Uri::as_str))
            + estimate_string(self.documentation_url.as_ref().map(Uri::as_str))
            + estimate_string(self.issue_reporting_url.as_ref().map(Uri::as_str))
            + estimate_collection(&self.authors, Author::serialized_length)
            + estimate_collection(&self.contributors, Author::serialized_length)
            + estimate_collection(&self.provided_services, Service::serialized_length)
            + estimate_collection(&self.extension_dependencies, Dependency::serialized_length)
            + estimate_collection(&self.service_dependencies, Dependency::serialized_length)
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_unsigned_byte(out, i64::from(self.format_version))?;
        write_required_string(out, "product_identifier", &self.product_identifier)?;
        write_required_string(out, "environment_type", &self.environment_type)?;
        write_unsigned_short(out, i64::from(self.flags))?;
        write_required_string(out, "identifier", &self.identifier)?;
        write_required_string(out, "version", &self.version)?;
        write_string(out, self.distribution_url.as_ref().map(Uri::as_str))?;
        write_string(out, self.documentation_url.as_ref().map(Uri::as_str))?;
        write_string(out, self.issue_reporting_url.as_ref().map(Uri::as_str))?;
        write_collection(out, &self.authors, |out, a| a.serialize(out))?;
        write_collection(out, &self.contributors, |out, a| a.serialize(out))?;
        write_collection(out, &self.provided_services, |out, s| s.serialize(out))?;
        write_collection(out, &self.extension_dependencies, |out, d| d.serialize(out))?;
        write_collection(out, &self.service_dependencies, |out, d| d.serialize(out))?;
        Ok(())
    }
}

/// Accumulates revision 0 metadata.
///
/// List entries are appended in call order; duplicates are kept. `build()`
/// checks mandatory fields and resets the builder.
#[derive(Debug, Clone, Default)]
pub struct MetadataV0Builder {
    format_version: u8,
    product_identifier: Option<String>,
    environment_type: Option<String>,
    flags: u16,
    identifier: Option<String>,
    version: Option<String>,
    distribution_url: Option<Uri>,
    documentation_url: Option<Uri>,
    issue_reporting_url: Option<Uri>,
    authors: Vec<Author>,
    contributors: Vec<Author>,
    services: Vec<Service>,
    extension_dependencies: Vec<Dependency>,
    service_dependencies: Vec<Dependency>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ManifestError::MissingRequiredField(field))
}

fn check_present(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(ManifestError::MissingRequiredField(field));
    }
    Ok(())
}

impl MetadataV0Builder {
    /// Create a builder stamping `format_version` on the built record.
    pub fn new(format_version: u8) -> Self {
        MetadataV0Builder {
            format_version,
            ..Default::default()
        }
    }

    /// Build the record directly, without going through [`Metadata`].
    pub fn build_v0(&mut self) -> Result<MetadataV0> {
        let taken = std::mem::replace(self, MetadataV0Builder::new(self.format_version));

        for author in taken.authors.iter().chain(&taken.contributors) {
            check_present(author.name(), "author.name")?;
        }
        for service in &taken.services {
            check_present(service.identifier(), "service.identifier")?;
            check_present(service.version(), "service.version")?;
        }
        for dependency in taken
            .extension_dependencies
            .iter()
            .chain(&taken.service_dependencies)
        {
            check_present(dependency.identifier(), "dependency.identifier")?;
            check_present(dependency.version_range(), "dependency.version_range")?;
        }

        Ok(MetadataV0 {
            format_version: taken.format_version,
            product_identifier: required(taken.product_identifier, "product_identifier")?,
            environment_type: required(taken.environment_type, "environment_type")?,
            flags: taken.flags,
            identifier: required(taken.identifier, "identifier")?,
            version: required(taken.version, "version")?,
            distribution_url: taken.distribution_url,
            documentation_url: taken.documentation_url,
            issue_reporting_url: taken.issue_reporting_url,
            authors: taken.authors,
            contributors: taken.contributors,
            provided_services: taken.services,
            extension_dependencies: taken.extension_dependencies,
            service_dependencies: taken.service_dependencies,
        })
    }
}

impl MetadataBuilder for MetadataV0Builder {
    fn format_version(&self) -> u8 {
        self.format_version
    }

    fn set_product_identifier(&mut self, value: &str) -> &mut dyn MetadataBuilder {
        self.product_identifier = Some(value.to_string());
        self
    }

    fn set_environment_type(&mut self, value: &str) -> &mut dyn MetadataBuilder {
        self.environment_type = Some(value.to_string());
        self
    }

    fn set_flags(&mut self, flags: u16) -> &mut dyn MetadataBuilder {
        self.flags = flags;
        self
    }

    fn set_identifier(&mut self, value: &str) -> &mut dyn MetadataBuilder {
        self.identifier = Some(value.to_string());
        self
    }

    fn set_version(&mut self, value: &str) -> &mut dyn MetadataBuilder {
        self.version = Some(value.to_string());
        self
    }

    fn set_distribution_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder {
        self.distribution_url = Some(url);
        self
    }

    fn set_documentation_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder {
        self.documentation_url = Some(url);
        self
    }

    fn set_issue_reporting_url(&mut self, url: Uri) -> &mut dyn MetadataBuilder {
        self.issue_reporting_url = Some(url);
        self
    }

    fn add_author(&mut self, name: &str, alias: Option<&str>) -> &mut dyn MetadataBuilder {
        self.authors
            .push(Author::new(name, alias.map(str::to_string)));
        self
    }

    fn add_contributor(&mut self, name: &str, alias: Option<&str>) -> &mut dyn MetadataBuilder {
        self.contributors
            .push(Author::new(name, alias.map(str::to_string)));
        self
    }

    fn add_service(&mut self, identifier: &str, version: &str) -> &mut dyn MetadataBuilder {
        self.services.push(Service::new(identifier, version));
        self
    }

    fn add_extension_dependency(
        &mut self,
        identifier: &str,
        version_range: &str,
        optional: bool,
    ) -> &mut dyn MetadataBuilder {
        self.extension_dependencies
            .push(Dependency::new(identifier, version_range, optional));
        self
    }

    fn add_service_dependency(
        &mut self,
        identifier: &str,
        version_range: &str,
        optional: bool,
    ) -> &mut dyn MetadataBuilder {
        self.service_dependencies
            .push(Dependency::new(identifier, version_range, optional));
        self
    }

    fn build(&mut self) -> Result<Metadata> {
        self.build_v0().map(Metadata::V0)
    }
}
