//! Chloramine: inspects and creates extension containers.
//!
//! - `info`: print the manifest of a container
//! - `wrap`: prefix a payload file with a freshly built manifest
//! - `version`: print tool version and build info

mod commands;
mod config;
mod error;
mod format;
mod parse;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use chloramine_manifest::{BinarySerializable, Manifest};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use config::{WrapConfig, CONFIG_FILE_NAME};
use error::CliError;
use format::{format_count, format_info, format_json};
use parse::{matches_to_action, CliAction, WrapArgs};

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let result = matches_to_action(&matches).and_then(|action| match action {
        CliAction::Info { container, json } => run_info(&container, json),
        CliAction::Wrap(args) => run_wrap(&args, &config_path),
        CliAction::Version => {
            run_version();
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_info(container: &Path, json: bool) -> Result<(), CliError> {
    let manifest = match Manifest::read_path(container) {
        Ok(manifest) => manifest,
        Err(chloramine_manifest::ManifestError::Io(e)) => return Err(CliError::io(container, e)),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", format_json(&manifest)?);
    } else {
        print!("{}", format_info(&manifest));
    }
    Ok(())
}

fn run_wrap(args: &WrapArgs, config_path: &Path) -> Result<(), CliError> {
    let config = WrapConfig::load(config_path)?;
    debug!(?config, "Loaded wrap defaults");

    let input = File::open(&args.input).map_err(|e| CliError::io(&args.input, e))?;
    let content_length = input
        .metadata()
        .map_err(|e| CliError::io(&args.input, e))?
        .len();

    println!("==> Generating Manifest");
    let manifest = args.to_manifest(&config, content_length)?;
    println!(
        "Estimated Size: {} byte(s)",
        format_count(manifest.serialized_length())
    );
    println!();

    println!("==> Writing Data");
    let output = File::create(&args.container).map_err(|e| CliError::io(&args.container, e))?;
    let written = manifest.decorate(&mut BufReader::new(input), &mut BufWriter::new(output))?;
    println!("Written {} byte(s)", format_count(written));
    Ok(())
}

fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("CHLORAMINE_COMMIT_HASH") {
        Some(hash) if !hash.is_empty() && hash != "dev" => format!("{}+git-{}", version, hash),
        _ => format!("{}+dev", version),
    }
}

fn run_version() {
    println!("Chloramine v{}", version_string());
    println!("Licensed under the terms of the Apache License, Version 2.0");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Commit Hash: {}",
        option_env!("CHLORAMINE_COMMIT_HASH").unwrap_or("dev")
    );
}
