//! Reference layout of a fully populated manifest.

use crate::common::*;
use chloramine::codec::primitives::{read_string, read_unsigned_byte, read_unsigned_short};
use chloramine::{BinarySerializable, Manifest, ManifestError, MAGIC_NUMBER};

fn next_u64(cursor: &mut &[u8]) -> u64 {
    let (head, rest) = cursor.split_at(8);
    *cursor = rest;
    u64::from_be_bytes(head.try_into().unwrap())
}

fn next_string(cursor: &mut &[u8]) -> String {
    read_string(cursor).unwrap().expect("string must be present")
}

#[test]
fn test_reference_lengths() {
    let manifest = full_manifest();
    assert_eq!(manifest.content_length(), 42);
    assert_eq!(manifest.serialized_length(), 499);
    assert_eq!(manifest.content_offset(), 499);
    assert_eq!(manifest.metadata().serialized_length(), 469);
}

#[test]
fn test_reference_metadata_values() {
    let manifest = full_manifest();
    let metadata = manifest.metadata();

    assert_eq!(metadata.format_version(), 0);
    assert_eq!(metadata.product_identifier(), "org.basinmc.faucet");
    assert_eq!(metadata.environment_type(), "java");
    assert_eq!(metadata.identifier(), "org.basinmc.test");
    assert_eq!(metadata.version(), "1.2.3");
    assert_eq!(
        metadata.distribution_url().map(|u| u.as_str()),
        Some("http://example.org/distribution")
    );
    assert_eq!(
        metadata.documentation_url().map(|u| u.as_str()),
        Some("http://example.org/documentation")
    );
    assert_eq!(
        metadata.issue_reporting_url().map(|u| u.as_str()),
        Some("http://example.org/issues")
    );

    let authors: Vec<String> = metadata.authors().iter().map(|a| a.to_string()).collect();
    assert_eq!(authors, ["John Doe (Mr Pineapple)", "Jane Doe (Mrs Pineapple)"]);
    assert_eq!(metadata.contributors(), metadata.authors());

    let services: Vec<String> = metadata
        .provided_services()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        services,
        ["org.basinmc.test.pineapple:1.0.0", "org.basinmc.test.potato:2.1.3"]
    );

    let deps = metadata.extension_dependencies();
    assert!(!deps[0].is_optional());
    assert!(deps[1].is_optional());
    assert_eq!(deps[1].version_range(), "[1.0.0,2.1.0]");
    assert_eq!(metadata.service_dependencies()[1].identifier(), "org.basinmc.croquettes");
}

#[test]
fn test_reference_byte_walk() {
    let bytes = full_manifest().to_bytes().unwrap();
    assert_eq!(bytes.len(), 499);
    let mut cursor = &bytes[..];

    let (magic, rest) = cursor.split_at(4);
    assert_eq!(u32::from_be_bytes(magic.try_into().unwrap()), MAGIC_NUMBER);
    cursor = rest;
    assert_eq!(read_unsigned_short(&mut cursor).unwrap(), 0x0001);
    assert_eq!(next_u64(&mut cursor), 0);
    assert_eq!(next_u64(&mut cursor), 469);
    assert_eq!(next_u64(&mut cursor), 42);

    assert_eq!(read_unsigned_byte(&mut cursor).unwrap(), 0);
    assert_eq!(next_string(&mut cursor), "org.basinmc.faucet");
    assert_eq!(next_string(&mut cursor), "java");
    assert_eq!(read_unsigned_short(&mut cursor).unwrap(), 0x0000);
    assert_eq!(next_string(&mut cursor), "org.basinmc.test");
    assert_eq!(next_string(&mut cursor), "1.2.3");
    assert_eq!(next_string(&mut cursor), "http://example.org/distribution");
    assert_eq!(next_string(&mut cursor), "http://example.org/documentation");
    assert_eq!(next_string(&mut cursor), "http://example.org/issues");

    for _ in 0..2 {
        assert_eq!(read_unsigned_short(&mut cursor).unwrap(), 2);
        assert_eq!(next_string(&mut cursor), "John Doe");
        assert_eq!(next_string(&mut cursor), "Mr Pineapple");
        assert_eq!(next_string(&mut cursor), "Jane Doe");
        assert_eq!(next_string(&mut cursor), "Mrs Pineapple");
    }

    assert_eq!(read_unsigned_short(&mut cursor).unwrap(), 2);
    assert_eq!(next_string(&mut cursor), "org.basinmc.test.pineapple");
    assert_eq!(next_string(&mut cursor), "1.0.0");
    assert_eq!(next_string(&mut cursor), "org.basinmc.test.potato");
    assert_eq!(next_string(&mut cursor), "2.1.3");

    let dependencies = [
        ("org.basinmc.stuff", "(1.0.0,2.0.0]", 0x00),
        ("org.basinmc.things", "[1.0.0,2.1.0]", 0x01),
        ("org.basinmc.beans", "(1.0.0,2.0.0]", 0x00),
        ("org.basinmc.croquettes", "[1.0.0,2.1.0]", 0x01),
    ];
    for pair in dependencies.chunks(2) {
        assert_eq!(read_unsigned_short(&mut cursor).unwrap(), 2);
        for (id, range, optional) in pair {
            assert_eq!(next_string(&mut cursor), *id);
            assert_eq!(next_string(&mut cursor), *range);
            assert_eq!(read_unsigned_byte(&mut cursor).unwrap(), *optional);
        }
    }

    assert!(cursor.is_empty());
}

#[test]
fn test_reference_roundtrip() {
    let manifest = full_manifest();
    let decoded = Manifest::from_bytes(&manifest.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, manifest);
}

#[test]
fn test_builder_requires_metadata() {
    let result = Manifest::builder().set_content_length(42).build();
    assert!(matches!(
        result,
        Err(ManifestError::MissingRequiredSection(_))
    ));
}

#[test]
fn test_builder_rejects_missing_version() {
    let mut builder = Manifest::builder();
    let result = builder.create_metadata(0, |m| {
        m.set_product_identifier("org.basinmc.faucet")
            .set_environment_type("java")
            .set_identifier("org.basinmc.test");
    });
    assert!(matches!(
        result,
        Err(ManifestError::MissingRequiredField("version"))
    ));
}
