//! Codec-wide properties over generated manifests.

use chloramine::{
    BinaryDecodable, BinarySerializable, Manifest, Metadata, MetadataBuilder, MetadataV0, Uri,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Fields {
    flags: u16,
    metadata_flags: u16,
    content_length: u64,
    identifier: String,
    version: String,
    distribution_url: Option<String>,
    authors: Vec<(String, Option<String>)>,
    services: Vec<(String, String)>,
    dependencies: Vec<(String, String, bool)>,
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._ äöü€-]{1,24}"
}

fn arb_fields() -> impl Strategy<Value = Fields> {
    (
        any::<u16>(),
        any::<u16>(),
        any::<u64>(),
        arb_text(),
        arb_text(),
        proptest::option::of("[a-z]{1,12}"),
        proptest::collection::vec((arb_text(), proptest::option::of(arb_text())), 0..5),
        proptest::collection::vec((arb_text(), arb_text()), 0..5),
        proptest::collection::vec((arb_text(), arb_text(), any::<bool>()), 0..5),
    )
        .prop_map(
            |(
                flags,
                metadata_flags,
                content_length,
                identifier,
                version,
                distribution_url,
                authors,
                services,
                dependencies,
            )| Fields {
                flags,
                metadata_flags,
                content_length,
                identifier,
                version,
                distribution_url: distribution_url.map(|host| format!("https://{}.example.org/", host)),
                authors,
                services,
                dependencies,
            },
        )
}

fn build(fields: &Fields) -> Manifest {
    Manifest::builder()
        .set_flags(fields.flags)
        .set_content_length(fields.content_length)
        .create_metadata(0, |b| {
            b.set_product_identifier("org.basinmc.faucet")
                .set_environment_type("java")
                .set_flags(fields.metadata_flags)
                .set_identifier(&fields.identifier)
                .set_version(&fields.version);
            if let Some(raw) = &fields.distribution_url {
                b.set_distribution_url(Uri::parse(raw).unwrap());
            }
            for (name, alias) in &fields.authors {
                b.add_author(name, alias.as_deref());
                b.add_contributor(name, alias.as_deref());
            }
            for (id, version) in &fields.services {
                b.add_service(id, version);
            }
            for (id, range, optional) in &fields.dependencies {
                b.add_extension_dependency(id, range, *optional);
                b.add_service_dependency(range, id, !*optional);
            }
        })
        .unwrap()
        .build()
        .unwrap()
}

proptest! {
    /// decode(encode(m)) == m, list order included
    #[test]
    fn roundtrip(fields in arb_fields()) {
        let manifest = build(&fields);
        let bytes = manifest.to_bytes().unwrap();
        let decoded = Manifest::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, manifest);
    }

    /// serialized_length() matches the bytes actually written
    #[test]
    fn length_honesty(fields in arb_fields()) {
        let manifest = build(&fields);
        let bytes = manifest.to_bytes().unwrap();
        prop_assert_eq!(bytes.len() as u64, manifest.serialized_length());
        prop_assert_eq!(manifest.content_offset(), manifest.serialized_length());

        let metadata = manifest.metadata();
        prop_assert_eq!(metadata.to_bytes().unwrap().len() as u64, metadata.serialized_length());
        for author in metadata.authors() {
            prop_assert_eq!(author.to_bytes().unwrap().len() as u64, author.serialized_length());
        }
        for service in metadata.provided_services() {
            prop_assert_eq!(service.to_bytes().unwrap().len() as u64, service.serialized_length());
        }
        for dep in metadata.extension_dependencies() {
            prop_assert_eq!(dep.to_bytes().unwrap().len() as u64, dep.serialized_length());
        }
    }

    /// Absent optional values stay absent
    #[test]
    fn absence_preserved(fields in arb_fields()) {
        let manifest = build(&fields);
        let decoded = Manifest::from_bytes(&manifest.to_bytes().unwrap()).unwrap();
        let metadata = decoded.metadata();

        prop_assert_eq!(metadata.distribution_url().is_some(), fields.distribution_url.is_some());
        prop_assert!(metadata.documentation_url().is_none());
        prop_assert!(metadata.issue_reporting_url().is_none());
        for (author, (_, alias)) in metadata.authors().iter().zip(&fields.authors) {
            prop_assert_eq!(author.alias(), alias.as_deref());
        }
    }

    /// Any leading version byte other than a registered one is rejected
    #[test]
    fn unknown_version_rejected(version in 1u8..=255) {
        let metadata: Metadata = MetadataV0::builder()
            .set_product_identifier("p")
            .set_environment_type("e")
            .set_identifier("i")
            .set_version("v")
            .build()
            .unwrap();
        let mut bytes = metadata.to_bytes().unwrap();
        bytes[0] = version;

        let result = Metadata::decode(&mut &bytes[..]);
        prop_assert!(result.is_err());
    }
}
