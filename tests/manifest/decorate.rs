//! Wrapping payloads and reading containers back from disk.

use crate::common::*;
use chloramine::{BinarySerializable, Manifest, ManifestError};
use std::fs;
use std::io::{Read, Seek, SeekFrom};
use tempfile::TempDir;

#[test]
fn test_decorate_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.jar");
    let output = dir.path().join("extension.bec");
    let payload: Vec<u8> = (0..42u8).collect();
    fs::write(&input, &payload).unwrap();

    let manifest = full_manifest();
    let written = manifest.decorate_file(&input, &output).unwrap();
    assert_eq!(written, 499 + 42);
    assert_eq!(fs::metadata(&output).unwrap().len(), written);

    let decoded = Manifest::read_path(&output).unwrap();
    assert_eq!(decoded, manifest);

    let mut file = fs::File::open(&output).unwrap();
    file.seek(SeekFrom::Start(decoded.content_offset())).unwrap();
    let mut content = Vec::new();
    file.read_to_end(&mut content).unwrap();
    assert_eq!(content, payload);
}

#[test]
fn test_decorate_truncates_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.bin");
    let output = dir.path().join("extension.bec");
    fs::write(&input, b"tiny").unwrap();
    fs::write(&output, vec![0xEEu8; 4096]).unwrap();

    let manifest = Manifest::builder()
        .set_content_length(4)
        .create_metadata(0, populate_full)
        .unwrap()
        .build()
        .unwrap();
    manifest.decorate_file(&input, &output).unwrap();

    let container = fs::read(&output).unwrap();
    assert_eq!(container.len() as u64, manifest.serialized_length() + 4);
    assert_eq!(&container[container.len() - 4..], b"tiny");
}

#[test]
fn test_decorate_stream_matches_serialize() {
    let manifest = full_manifest();
    let mut out = Vec::new();
    manifest
        .decorate(&mut &[0u8; 42][..], &mut out)
        .unwrap();

    let header = manifest.to_bytes().unwrap();
    assert_eq!(&out[..header.len()], &header[..]);
    assert_eq!(out.len(), header.len() + 42);
}

#[test]
fn test_read_path_known_good_container() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.bec");
    fs::write(&path, minimal_container()).unwrap();

    let manifest = Manifest::read_path(&path).unwrap();
    assert_eq!(manifest.content_offset(), 100);
    assert_eq!(manifest.content_length(), 23);
}

#[test]
fn test_decorate_missing_input() {
    let dir = TempDir::new().unwrap();
    let result = full_manifest().decorate_file(
        dir.path().join("absent.bin"),
        dir.path().join("extension.bec"),
    );
    assert!(matches!(result, Err(ManifestError::Io(_))));
}
