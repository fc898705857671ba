//! Metadata Handler Registry
//!
//! Maps metadata format versions to the code that decodes and builds them.
//! The registry is process-wide and starts out holding the revision 0
//! handler; further handlers may be registered at any time.
//!
//! ## Lookup
//!
//! Handlers are consulted in registration order and the first one whose
//! `accepts` predicate matches the version wins. Registering a second
//! handler for an already covered version therefore has no effect on
//! lookups for that version.
//!
//! ```ignore
//! use chloramine_manifest::registry::{register_metadata_handler, MetadataHandler};
//!
//! register_metadata_handler(MetadataHandler::new(
//!     "v1",
//!     |version| version == 1,
//!     decode_v1,
//!     new_v1_builder,
//! ));
//! ```

use crate::error::{ManifestError, Result};
use crate::metadata::{
    Metadata, MetadataBuilder, MetadataV0, MetadataV0Builder, METADATA_V0_VERSION,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::info;

/// Decodes the section body following the version byte.
pub type DecodeFn = fn(u8, &mut &[u8]) -> Result<Metadata>;

/// Creates an empty builder for a version.
pub type BuilderFactoryFn = fn(u8) -> Box<dyn MetadataBuilder>;

/// Registry entry for one metadata format
#[derive(Clone, Copy)]
pub struct MetadataHandler {
    /// Human-readable name for logging
    pub name: &'static str,
    /// Whether this handler covers a format version
    pub accepts: fn(u8) -> bool,
    /// Section decoder
    pub decode: DecodeFn,
    /// Builder factory
    pub new_builder: BuilderFactoryFn,
}

impl MetadataHandler {
    /// Create a new handler entry
    pub const fn new(
        name: &'static str,
        accepts: fn(u8) -> bool,
        decode: DecodeFn,
        new_builder: BuilderFactoryFn,
    ) -> Self {
        Self {
            name,
            accepts,
            decode,
            new_builder,
        }
    }
}

impl std::fmt::Debug for MetadataHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataHandler")
            .field("name", &self.name)
            .finish()
    }
}

fn decode_v0(version: u8, buf: &mut &[u8]) -> Result<Metadata> {
    MetadataV0::decode_body(version, buf).map(Metadata::V0)
}

fn accepts_v0(version: u8) -> bool {
    version == METADATA_V0_VERSION
}

fn new_v0_builder(version: u8) -> Box<dyn MetadataBuilder> {
    Box::new(MetadataV0Builder::new(version))
}

/// Handler for format revision 0
pub const METADATA_V0_HANDLER: MetadataHandler = MetadataHandler::new(
    "v0",
    accepts_v0,
    decode_v0,
    new_v0_builder,
);

static METADATA_REGISTRY: Lazy<RwLock<Vec<MetadataHandler>>> =
    Lazy::new(|| RwLock::new(vec![METADATA_V0_HANDLER]));

/// Register an additional metadata handler
///
/// Safe to call concurrently with lookups; the handler is visible to every
/// lookup that starts after this returns.
pub fn register_metadata_handler(handler: MetadataHandler) {
    let mut registry = METADATA_REGISTRY.write();
    info!(name = handler.name, "Registered metadata handler");
    registry.push(handler);
}

fn find(version: u8) -> Result<MetadataHandler> {
    METADATA_REGISTRY
        .read()
        .iter()
        .find(|h| (h.accepts)(version))
        .copied()
        .ok_or(ManifestError::UnsupportedFormatVersion(version))
}

/// Find the handler that decodes `version`
pub fn resolve_decoder(version: u8) -> Result<MetadataHandler> {
    find(version)
}

/// Find the builder factory for `version`
pub fn resolve_builder_factory(version: u8) -> Result<BuilderFactoryFn> {
    find(version).map(|h| h.new_builder)
}

/// Create an empty builder for `version`
pub fn new_builder(version: u8) -> Result<Box<dyn MetadataBuilder>> {
    resolve_builder_factory(version).map(|factory| factory(version))
}
