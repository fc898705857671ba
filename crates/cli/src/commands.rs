//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::parse::{parse_flags, parse_url};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("chloramine")
        .about("Inspects, creates and modifies extension containers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log decoder and encoder activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Defaults file for wrap (default: ./chloramine.toml)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(build_info())
        .subcommand(build_wrap())
        .subcommand(build_version())
}

fn build_info() -> Command {
    Command::new("info")
        .visible_aliases(["i", "open"])
        .about("Displays extension container information")
        .arg(
            Arg::new("container-file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Container to inspect"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the manifest as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn build_wrap() -> Command {
    Command::new("wrap")
        .visible_alias("w")
        .about("Wraps an arbitrary file inside an extension container")
        .arg(
            Arg::new("input-file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("File to wrap"),
        )
        .arg(
            Arg::new("container-file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Container to write"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("REVISION")
                .value_parser(value_parser!(u8))
                .help("Manifest format revision"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .value_name("PRODUCT")
                .help("Target product identifier"),
        )
        .arg(
            Arg::new("environment")
                .long("environment")
                .value_name("TYPE")
                .help("Extension environment"),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .required(true)
                .help("Globally unique extension identifier"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .required(true)
                .help("Extension revision"),
        )
        .arg(
            Arg::new("flags")
                .long("flags")
                .value_parser(parse_flags)
                .help("Container flags (decimal or 0x-prefixed hex)"),
        )
        .arg(
            Arg::new("metadata-flags")
                .long("metadata-flags")
                .value_parser(parse_flags)
                .help("Metadata flags (decimal or 0x-prefixed hex)"),
        )
        .arg(
            Arg::new("distribution-url")
                .long("distribution-url")
                .value_name("URL")
                .value_parser(parse_url)
                .help("Distribution website"),
        )
        .arg(
            Arg::new("documentation-url")
                .long("documentation-url")
                .value_name("URL")
                .value_parser(parse_url)
                .help("Documentation website"),
        )
        .arg(
            Arg::new("issue-reporting-url")
                .long("issue-reporting-url")
                .value_name("URL")
                .value_parser(parse_url)
                .help("Issue reporting tool"),
        )
        .arg(
            Arg::new("author")
                .long("author")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Author, as `Name` or `Name (Alias)`"),
        )
        .arg(
            Arg::new("contributor")
                .long("contributor")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Previous contributor, as `Name` or `Name (Alias)`"),
        )
        .arg(
            Arg::new("service")
                .long("service")
                .value_name("ID:VERSION")
                .action(ArgAction::Append)
                .help("Provided service"),
        )
        .arg(
            Arg::new("extension-dependency")
                .long("extension-dependency")
                .visible_alias("dependency")
                .value_name("[?]ID:RANGE")
                .action(ArgAction::Append)
                .help("Extension dependency; a leading `?` marks it optional"),
        )
        .arg(
            Arg::new("service-dependency")
                .long("service-dependency")
                .value_name("[?]ID:RANGE")
                .action(ArgAction::Append)
                .help("Service dependency; a leading `?` marks it optional"),
        )
}

fn build_version() -> Command {
    Command::new("version").about("Displays the tool version number and build info")
}
