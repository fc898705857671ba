//! Integration tests for the manifest codec.
//!
//! Unit tests in crates/manifest/src/ cover the primitives and each record
//! in isolation. These suites check whole containers: the reference layout,
//! reading from streams and files, and codec-wide properties.

#[path = "../common/mod.rs"]
mod common;

mod build_and_serialize;
mod decorate;
mod properties;
