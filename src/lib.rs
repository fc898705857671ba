//! Chloramine - self-describing extension containers
//!
//! An extension container prefixes an arbitrary payload with a manifest: a
//! fixed header, a reserved authentication section and a versioned metadata
//! section describing the extension (identity, authors, provided services
//! and dependencies).
//!
//! # Quick Start
//!
//! ```ignore
//! use chloramine::{BinarySerializable, Manifest};
//!
//! let manifest = Manifest::builder()
//!     .set_content_length(payload.len() as u64)
//!     .create_metadata(0, |m| {
//!         m.set_product_identifier("org.basinmc.faucet")
//!             .set_environment_type("java")
//!             .set_identifier("org.basinmc.example")
//!             .set_version("1.0.0");
//!     })?
//!     .build()?;
//!
//! let mut container = manifest.to_bytes()?;
//! container.extend_from_slice(&payload);
//!
//! let decoded = Manifest::from_bytes(&container)?;
//! assert_eq!(decoded.content_offset(), manifest.serialized_length());
//! ```

// Re-export the public API from chloramine-manifest
pub use chloramine_manifest::*;
