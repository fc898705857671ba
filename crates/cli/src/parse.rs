//! ArgMatches to action conversion and value parsers.

use chloramine_manifest::{Manifest, MetadataBuilder, Uri};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::config::WrapConfig;
use crate::error::CliError;

/// What the invocation asks for.
#[derive(Debug)]
pub enum CliAction {
    Info { container: PathBuf, json: bool },
    Wrap(WrapArgs),
    Version,
}

/// Author or contributor as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorArg {
    pub name: String,
    pub alias: Option<String>,
}

/// `id:version` or `[?]id:range` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceArg {
    pub identifier: String,
    pub version: String,
    pub optional: bool,
}

/// Options of the `wrap` command. Unset options fall back to [`WrapConfig`].
#[derive(Debug, Clone, Default)]
pub struct WrapArgs {
    pub input: PathBuf,
    pub container: PathBuf,
    pub format_version: Option<u8>,
    pub target: Option<String>,
    pub environment: Option<String>,
    pub identifier: String,
    pub version: String,
    pub flags: Option<u16>,
    pub metadata_flags: u16,
    pub distribution_url: Option<Uri>,
    pub documentation_url: Option<Uri>,
    pub issue_reporting_url: Option<Uri>,
    pub authors: Vec<AuthorArg>,
    pub contributors: Vec<AuthorArg>,
    pub services: Vec<ReferenceArg>,
    pub extension_dependencies: Vec<ReferenceArg>,
    pub service_dependencies: Vec<ReferenceArg>,
}

impl WrapArgs {
    /// Build the manifest for a payload of `content_length` bytes.
    pub fn to_manifest(&self, config: &WrapConfig, content_length: u64) -> Result<Manifest, CliError> {
        let format_version = self.format_version.unwrap_or(config.format_version);
        let target = self.target.as_deref().unwrap_or(&config.product_identifier);
        let environment = self
            .environment
            .as_deref()
            .unwrap_or(&config.environment_type);

        let manifest = Manifest::builder()
            .set_flags(self.flags.unwrap_or(config.flags))
            .set_content_length(content_length)
            .create_metadata(format_version, |b| self.configure(b, target, environment))?
            .build()?;
        Ok(manifest)
    }

    fn configure(&self, b: &mut dyn MetadataBuilder, target: &str, environment: &str) {
        b.set_product_identifier(target)
            .set_environment_type(environment)
            .set_flags(self.metadata_flags)
            .set_identifier(&self.identifier)
            .set_version(&self.version);

        if let Some(url) = &self.distribution_url {
            b.set_distribution_url(url.clone());
        }
        if let Some(url) = &self.documentation_url {
            b.set_documentation_url(url.clone());
        }
        if let Some(url) = &self.issue_reporting_url {
            b.set_issue_reporting_url(url.clone());
        }

        for author in &self.authors {
            b.add_author(&author.name, author.alias.as_deref());
        }
        for contributor in &self.contributors {
            b.add_contributor(&contributor.name, contributor.alias.as_deref());
        }
        for service in &self.services {
            b.add_service(&service.identifier, &service.version);
        }
        for dep in &self.extension_dependencies {
            b.add_extension_dependency(&dep.identifier, &dep.version, dep.optional);
        }
        for dep in &self.service_dependencies {
            b.add_service_dependency(&dep.identifier, &dep.version, dep.optional);
        }
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, CliError> {
    match matches.subcommand() {
        Some(("info", sub)) => Ok(CliAction::Info {
            container: required_path(sub, "container-file")?,
            json: sub.get_flag("json"),
        }),
        Some(("wrap", sub)) => parse_wrap(sub).map(CliAction::Wrap),
        Some(("version", _)) => Ok(CliAction::Version),
        Some((other, _)) => Err(invalid("command", 0, format!("Unknown command: {}", other))),
        None => Err(invalid("command", 0, "No command provided".to_string())),
    }
}

fn invalid(kind: &'static str, index: usize, reason: String) -> CliError {
    CliError::InvalidArgument {
        kind,
        index,
        reason,
    }
}

fn required_path(matches: &ArgMatches, id: &'static str) -> Result<PathBuf, CliError> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .ok_or_else(|| invalid(id, 0, "Missing value".to_string()))
}

fn required_string(matches: &ArgMatches, id: &'static str) -> Result<String, CliError> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| invalid(id, 0, "Missing value".to_string()))
}

fn strings<'a>(matches: &'a ArgMatches, id: &str) -> impl Iterator<Item = &'a String> {
    matches.get_many::<String>(id).into_iter().flatten()
}

fn parse_wrap(matches: &ArgMatches) -> Result<WrapArgs, CliError> {
    let services = strings(matches, "service")
        .enumerate()
        .map(|(i, raw)| parse_reference("service", i, raw))
        .collect::<Result<Vec<_>, _>>()?;
    let extension_dependencies = strings(matches, "extension-dependency")
        .enumerate()
        .map(|(i, raw)| parse_dependency("extension dependency", i, raw))
        .collect::<Result<Vec<_>, _>>()?;
    let service_dependencies = strings(matches, "service-dependency")
        .enumerate()
        .map(|(i, raw)| parse_dependency("service dependency", i, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WrapArgs {
        input: required_path(matches, "input-file")?,
        container: required_path(matches, "container-file")?,
        format_version: matches.get_one::<u8>("format").copied(),
        target: matches.get_one::<String>("target").cloned(),
        environment: matches.get_one::<String>("environment").cloned(),
        identifier: required_string(matches, "id")?,
        version: required_string(matches, "version")?,
        flags: matches.get_one::<u16>("flags").copied(),
        metadata_flags: matches
            .get_one::<u16>("metadata-flags")
            .copied()
            .unwrap_or(0),
        distribution_url: matches.get_one::<Uri>("distribution-url").cloned(),
        documentation_url: matches.get_one::<Uri>("documentation-url").cloned(),
        issue_reporting_url: matches.get_one::<Uri>("issue-reporting-url").cloned(),
        authors: strings(matches, "author").map(|s| parse_author(s.as_str())).collect(),
        contributors: strings(matches, "contributor").map(|s| parse_author(s.as_str())).collect(),
        services,
        extension_dependencies,
        service_dependencies,
    })
}

/// Parse `Name` or `Name (Alias)`.
pub fn parse_author(raw: &str) -> AuthorArg {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_suffix(')') {
        if let Some(open) = inner.rfind(" (") {
            let name = inner[..open].trim();
            let alias = inner[open + 2..].trim();
            if !name.is_empty() {
                return AuthorArg {
                    name: name.to_string(),
                    alias: (!alias.is_empty()).then(|| alias.to_string()),
                };
            }
        }
    }
    AuthorArg {
        name: raw.to_string(),
        alias: None,
    }
}

/// Parse `id:version`, splitting at the first `:`.
pub fn parse_reference(kind: &'static str, index: usize, raw: &str) -> Result<ReferenceArg, CliError> {
    let (identifier, version) = raw
        .split_once(':')
        .ok_or_else(|| invalid(kind, index, "Missing version identifier".to_string()))?;
    Ok(ReferenceArg {
        identifier: identifier.to_string(),
        version: version.to_string(),
        optional: false,
    })
}

/// Parse `[?]id:range`.
pub fn parse_dependency(kind: &'static str, index: usize, raw: &str) -> Result<ReferenceArg, CliError> {
    match raw.strip_prefix('?') {
        Some(rest) => parse_reference(kind, index, rest).map(|r| ReferenceArg {
            optional: true,
            ..r
        }),
        None => parse_reference(kind, index, raw),
    }
}

/// Value parser for flags: decimal or `0x`-prefixed hex.
pub fn parse_flags(value: &str) -> Result<u16, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };
    parsed.map_err(|e| format!("Invalid flags '{}': {}", value, e))
}

/// Value parser for URLs: absolute URIs or relative references, kept as given.
pub fn parse_url(value: &str) -> Result<Uri, String> {
    Uri::parse(value).map_err(|e| format!("Invalid URL '{}': {}", value, e))
}
