//! Shared fixtures for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use chloramine::codec::primitives::{write_string, write_unsigned_byte, write_unsigned_short};
use chloramine::{Manifest, MetadataBuilder, Uri, MAGIC_NUMBER};

pub fn url(s: &str) -> Uri {
    Uri::parse(s).expect("test URL must parse")
}

/// Populate every v0 field with the reference values.
pub fn populate_full(b: &mut dyn MetadataBuilder) {
    b.set_product_identifier("org.basinmc.faucet")
        .set_environment_type("java")
        .set_identifier("org.basinmc.test")
        .set_version("1.2.3")
        .set_distribution_url(url("http://example.org/distribution"))
        .set_documentation_url(url("http://example.org/documentation"))
        .set_issue_reporting_url(url("http://example.org/issues"))
        .add_author("John Doe", Some("Mr Pineapple"))
        .add_author("Jane Doe", Some("Mrs Pineapple"))
        .add_contributor("John Doe", Some("Mr Pineapple"))
        .add_contributor("Jane Doe", Some("Mrs Pineapple"))
        .add_service("org.basinmc.test.pineapple", "1.0.0")
        .add_service("org.basinmc.test.potato", "2.1.3")
        .add_extension_dependency("org.basinmc.stuff", "(1.0.0,2.0.0]", false)
        .add_extension_dependency("org.basinmc.things", "[1.0.0,2.1.0]", true)
        .add_service_dependency("org.basinmc.beans", "(1.0.0,2.0.0]", false)
        .add_service_dependency("org.basinmc.croquettes", "[1.0.0,2.1.0]", true);
}

/// Manifest with every v0 field set: 499 bytes, 469 of them metadata.
pub fn full_manifest() -> Manifest {
    Manifest::builder()
        .set_content_length(42)
        .set_flags(0x0001)
        .create_metadata(0, populate_full)
        .expect("reference metadata must build")
        .build()
        .expect("reference manifest must build")
}

/// Minimal v0 metadata section, written field by field.
pub fn minimal_metadata_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    write_unsigned_byte(&mut out, 0).unwrap();
    write_string(&mut out, Some("org.basinmc.faucet")).unwrap();
    write_string(&mut out, Some("java")).unwrap();
    write_unsigned_short(&mut out, 0).unwrap();
    write_string(&mut out, Some("org.basinmc.test")).unwrap();
    write_string(&mut out, Some("1.2.3")).unwrap();
    for _ in 0..3 {
        write_string(&mut out, None).unwrap();
    }
    for _ in 0..5 {
        write_unsigned_short(&mut out, 0).unwrap();
    }
    out
}

/// Header bytes with arbitrary lengths.
pub fn raw_header(flags: u16, auth_len: u64, meta_len: u64, content_len: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(30);
    out.extend_from_slice(&MAGIC_NUMBER.to_be_bytes());
    out.extend_from_slice(&flags.to_be_bytes());
    out.extend_from_slice(&auth_len.to_be_bytes());
    out.extend_from_slice(&meta_len.to_be_bytes());
    out.extend_from_slice(&content_len.to_be_bytes());
    out
}

/// Known good container: minimal metadata followed by a 23 byte payload.
pub fn minimal_container() -> Vec<u8> {
    let metadata = minimal_metadata_bytes();
    let mut out = raw_header(0, 0, metadata.len() as u64, 23);
    out.extend_from_slice(&metadata);
    out.extend_from_slice(b"Hello from a container!");
    out
}
