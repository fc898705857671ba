//! Output formatting for container information.

use chloramine_manifest::{BinarySerializable, Manifest};
use std::fmt::{Display, Write};

use crate::error::CliError;

/// Group digits in thousands: `1234567` → `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable header and metadata listing.
pub fn format_info(manifest: &Manifest) -> String {
    let metadata = manifest.metadata();
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== Header Section ===");
    let _ = writeln!(
        out,
        "Estimated Size: {} byte(s)",
        format_count(manifest.serialized_length())
    );
    let _ = writeln!(out, "Container Flags: 0x{:04X}", manifest.flags());
    let _ = writeln!(
        out,
        "Content Length: {} byte(s)",
        format_count(manifest.content_length())
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "=== Metadata Section (v{}) ===", metadata.format_version());
    let _ = writeln!(out, "Product: {}", metadata.product_identifier());
    let _ = writeln!(out, "Environment Type: {}", metadata.environment_type());
    let _ = writeln!(out, "Flags: 0x{:04X}", metadata.flags());
    let _ = writeln!(out);

    let _ = writeln!(out, "Extension Id: {}", metadata.identifier());
    let _ = writeln!(out, "Version: {}", metadata.version());
    if let Some(url) = metadata.distribution_url() {
        let _ = writeln!(out, "Distribution URL: {}", url);
    }
    if let Some(url) = metadata.documentation_url() {
        let _ = writeln!(out, "Documentation URL: {}", url);
    }
    if let Some(url) = metadata.issue_reporting_url() {
        let _ = writeln!(out, "Issue Reporting URL: {}", url);
    }

    let lists = [
        ("Author(s)", join(metadata.authors())),
        ("Contributor(s)", join(metadata.contributors())),
        ("Service(s)", join(metadata.provided_services())),
        ("Extension Dependencies", join(metadata.extension_dependencies())),
        ("Service Dependencies", join(metadata.service_dependencies())),
    ];
    for (label, value) in lists {
        if !value.is_empty() {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }
    out
}

/// Manifest as pretty-printed JSON.
pub fn format_json(manifest: &Manifest) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}
