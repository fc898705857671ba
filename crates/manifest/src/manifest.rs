//! Container manifest
//!
//! A manifest is the header plus metadata that precede an extension's
//! payload. Reading consumes exactly the manifest bytes from a source and
//! leaves it positioned at the first payload byte.

use crate::codec::{BinaryDecodable, BinarySerializable};
use crate::error::{ManifestError, Result, Section};
use crate::header::{ManifestHeader, HEADER_LENGTH};
use crate::metadata::{Metadata, MetadataBuilder};
use crate::options::ReadOptions;
use crate::registry;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Decoded or built container manifest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Manifest {
    flags: u16,
    content_offset: u64,
    content_length: u64,
    metadata: Metadata,
}

/// Read exactly `expected` bytes, reporting how many arrived on a short read.
fn read_exactly<R: Read + ?Sized>(source: &mut R, expected: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Read::take(&mut *source, expected).read_to_end(&mut buf)?;
    let actual = buf.len() as u64;
    if actual < expected {
        return Err(ManifestError::UnexpectedEndOfInput { expected, actual });
    }
    Ok(buf)
}

fn check_section_length(section: Section, length: u64, options: &ReadOptions) -> Result<()> {
    if length > options.max_section_length {
        return Err(ManifestError::SectionTooLarge {
            section,
            length,
            max: options.max_section_length,
        });
    }
    Ok(())
}

impl Manifest {
    /// Start building a manifest.
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::default()
    }

    /// Read a manifest with default options.
    pub fn read<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        Self::read_with_options(source, &ReadOptions::default())
    }

    /// Read a manifest, leaving `source` positioned at the payload.
    ///
    /// # Errors
    ///
    /// - `InvalidHeader` if the magic number does not match
    /// - `SectionTooLarge` if a declared section exceeds the configured bound
    /// - `UnexpectedEndOfInput` if the source ends inside the manifest
    /// - `UnsupportedFormatVersion` if no handler accepts the metadata version
    pub fn read_with_options<R: Read + ?Sized>(
        source: &mut R,
        options: &ReadOptions,
    ) -> Result<Self> {
        options.validate()?;

        let header_bytes = read_exactly(source, HEADER_LENGTH as u64)?;
        let header_bytes: &[u8; HEADER_LENGTH] = header_bytes
            .as_slice()
            .try_into()
            .map_err(|_| ManifestError::UnexpectedEndOfInput {
                expected: HEADER_LENGTH as u64,
                actual: header_bytes.len() as u64,
            })?;
        let header = ManifestHeader::from_bytes(header_bytes)?;

        debug!(
            flags = header.flags,
            authentication_length = header.authentication_length,
            metadata_length = header.metadata_length,
            content_length = header.content_length,
            "Read manifest header"
        );

        check_section_length(
            Section::Authentication,
            header.authentication_length,
            options,
        )?;
        check_section_length(Section::Metadata, header.metadata_length, options)?;

        // Authentication content is reserved and skipped.
        let sections = read_exactly(
            source,
            header.authentication_length + header.metadata_length,
        )?;
        let metadata_start = sections.len() - header.metadata_length as usize;
        let mut cursor = &sections[metadata_start..];

        trace!(length = cursor.len(), "Decoding metadata section");
        let metadata = Metadata::decode(&mut cursor)?;
        if !cursor.is_empty() {
            warn!(
                trailing = cursor.len(),
                "Metadata section carries bytes its decoder did not consume"
            );
        }

        Ok(Manifest {
            flags: header.flags,
            content_offset: header.content_offset(),
            content_length: header.content_length,
            metadata,
        })
    }

    /// Read the manifest at the start of a container file.
    pub fn read_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Read a manifest from an in-memory container.
    ///
    /// Bytes following the manifest are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        Self::read(&mut cursor)
    }

    /// Container flags.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Embedded metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Offset of the payload from the container start.
    pub fn content_offset(&self) -> u64 {
        self.content_offset
    }

    /// Declared payload length. Never checked against the actual payload.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Header as `serialize` writes it.
    ///
    /// The authentication section is never written, so its length is always
    /// zero here even for a manifest read from a container that had one.
    pub fn header(&self) -> ManifestHeader {
        ManifestHeader {
            flags: self.flags,
            authentication_length: 0,
            metadata_length: self.metadata.serialized_length(),
            content_length: self.content_length,
        }
    }

    /// Write the manifest followed by the whole of `input`.
    ///
    /// Returns the total number of bytes written.
    pub fn decorate<R, W>(&self, input: &mut R, output: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.serialize(output)?;
        let copied = io::copy(input, output)?;
        output.flush()?;

        if copied != self.content_length {
            warn!(
                declared = self.content_length,
                copied, "Payload length differs from declared content length"
            );
        }
        Ok(self.serialized_length() + copied)
    }

    /// Write a container to `output_path` wrapping the file at `input_path`.
    ///
    /// The output file is created or truncated.
    pub fn decorate_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<u64> {
        let mut input = BufReader::new(File::open(input_path)?);
        let mut output = BufWriter::new(File::create(output_path)?);
        self.decorate(&mut input, &mut output)
    }
}

impl BinarySerializable for Manifest {
    fn serialized_length(&self) -> u64 {
        HEADER_LENGTH as u64 + self.metadata.serialized_length()
    }

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let header = self.header();
        debug!(
            flags = header.flags,
            metadata_length = header.metadata_length,
            content_length = header.content_length,
            "Writing manifest"
        );
        out.write_all(&header.to_bytes())?;
        self.metadata.serialize(out)
    }
}

/// Accumulates a manifest.
///
/// `build()` requires metadata and resets the builder.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    flags: u16,
    content_length: u64,
    metadata: Option<Metadata>,
}

impl ManifestBuilder {
    pub fn set_flags(&mut self, flags: u16) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn set_content_length(&mut self, length: u64) -> &mut Self {
        self.content_length = length;
        self
    }

    /// Attach already built metadata, replacing any previous one.
    pub fn set_metadata(&mut self, metadata: impl Into<Metadata>) -> &mut Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Build metadata of `version` with the registered builder and attach it.
    ///
    /// ```ignore
    /// builder.create_metadata(0, |m| {
    ///     m.set_product_identifier("org.basinmc.faucet")
    ///         .set_environment_type("java")
    ///         .set_identifier("org.basinmc.example")
    ///         .set_version("1.0.0");
    /// })?;
    /// ```
    pub fn create_metadata<F>(&mut self, version: u8, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut dyn MetadataBuilder),
    {
        let mut builder = registry::new_builder(version)?;
        configure(&mut *builder);
        self.metadata = Some(builder.build()?);
        Ok(self)
    }

    /// Produce the manifest; fails if no metadata was attached.
    pub fn build(&mut self) -> Result<Manifest> {
        let taken = std::mem::take(self);
        let metadata = taken
            .metadata
            .ok_or(ManifestError::MissingRequiredSection("metadata"))?;

        Ok(Manifest {
            flags: taken.flags,
            content_offset: HEADER_LENGTH as u64 + metadata.serialized_length(),
            content_length: taken.content_length,
            metadata,
        })
    }
}
