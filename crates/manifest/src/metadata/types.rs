//! Value records shared by metadata schemas: authors, services, dependencies.
//!
//! ```text
//! Author      [name: str][alias: str|absent]
//! Service     [identifier: str][version: str]
//! Dependency  [identifier: str][version_range: str][optional: u8]
//! ```

use crate::codec::primitives::{
    estimate_string, read_string, read_unsigned_byte, write_string, write_unsigned_byte,
};
use crate::codec::{BinaryDecodable, BinarySerializable};
use crate::error::{ManifestError, Result};
use std::fmt;
use std::io::Write;

/// Read a string that must be present.
pub(crate) fn read_required_string(buf: &mut &[u8], field: &'static str) -> Result<String> {
    read_string(buf)?.ok_or(ManifestError::MissingRequiredField(field))
}

/// Write a string that must be present.
///
/// An empty value would encode as absent and fail to decode, so it is
/// rejected here instead.
pub(crate) fn write_required_string<W: Write + ?Sized>(
    out: &mut W,
    field: &'static str,
    value: &str,
) -> Result<()> {
    if value.is_empty() {
        return Err(ManifestError::MissingRequiredField(field));
    }
    write_string(out, Some(value))
}

/// Author or contributor of an extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Author {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
}

impl Author {
    /// Create an author; an empty alias is treated as absent.
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Author {
            name: name.into(),
            alias: alias.filter(|a| !a.is_empty()),
        }
    }

    /// Display name (a real name or an alias).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary alias shown next to the name, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} ({})", self.name, alias),
            None => f.write_str(&self.name),
        }
    }
}

impl BinarySerializable for Author {
    fn serialized_length(&self) -> u64 {
        estimate_string(Some(&self.name)) + estimate_string(self.alias.as_deref())
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_required_string(out, "author.name", &self.name)?;
        write_string(out, self.alias.as_deref())
    }
}

impl BinaryDecodable for Author {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let name = read_required_string(buf, "author.name")?;
        let alias = read_string(buf)?;
        Ok(Author { name, alias })
    }
}

/// A service implementation provided by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Service {
    identifier: String,
    version: String,
}

impl Service {
    /// Create a service declaration.
    pub fn new(identifier: impl Into<String>, version: impl Into<String>) -> Self {
        Service {
            identifier: identifier.into(),
            version: version.into(),
        }
    }

    /// Product-wide service identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Implemented service version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identifier, self.version)
    }
}

impl BinarySerializable for Service {
    fn serialized_length(&self) -> u64 {
        estimate_string(Some(&self.identifier)) + estimate_string(Some(&self.version))
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_required_string(out, "service.identifier", &self.identifier)?;
        write_required_string(out, "service.version", &self.version)
    }
}

impl BinaryDecodable for Service {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let identifier = read_required_string(buf, "service.identifier")?;
        let version = read_required_string(buf, "service.version")?;
        Ok(Service {
            identifier,
            version,
        })
    }
}

/// A dependency on another extension or on a service.
///
/// The version range is carried verbatim; it is never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Dependency {
    identifier: String,
    version_range: String,
    optional: bool,
}

impl Dependency {
    /// Create a dependency declaration.
    pub fn new(
        identifier: impl Into<String>,
        version_range: impl Into<String>,
        optional: bool,
    ) -> Self {
        Dependency {
            identifier: identifier.into(),
            version_range: version_range.into(),
            optional,
        }
    }

    /// Identifier of the required extension or service.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Accepted version range, e.g. `[1.0.0,2.0.0)`.
    pub fn version_range(&self) -> &str {
        &self.version_range
    }

    /// Whether loading may proceed without this dependency.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.optional {
            f.write_str("!")?;
        }
        write!(f, "{} ({})", self.identifier, self.version_range)
    }
}

impl BinarySerializable for Dependency {
    fn serialized_length(&self) -> u64 {
        estimate_string(Some(&self.identifier)) + estimate_string(Some(&self.version_range)) + 1
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_required_string(out, "dependency.identifier", &self.identifier)?;
        write_required_string(out, "dependency.version_range", &self.version_range)?;
        write_unsigned_byte(out, i64::from(self.optional))
    }
}

impl BinaryDecodable for Dependency {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let identifier = read_required_string(buf, "dependency.identifier")?;
        let version_range = read_required_string(buf, "dependency.version_range")?;
        // Only 0x01 marks an optional dependency; every other value reads as required.
        let optional = read_unsigned_byte(buf)? == 1;
        Ok(Dependency {
            identifier,
            version_range,
            optional,
        })
    }
}
