// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod globs;
pub mod matcher;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::io::{self, Write};

use self::cli::{Cli, ErrorMode};
use self::config::{load_presets_file, resolve_config, MissingFlagFile, PresetConfig};
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Parses the process arguments, runs the search and prints the result.
/// Returns the process exit status.
pub fn run() -> Result<u8> {
    let args = Cli::parse();

    let presets = if args.preset.is_some() {
        load_presets_file()?
    } else {
        HashMap::new()
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(args, &presets, &mut stdout.lock(), &mut stderr.lock())
}

/// Runs one search with already parsed arguments, writing matches to `out`
/// and error messages to `err`.
pub fn execute(
    args: Cli,
    presets: &HashMap<String, PresetConfig>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let config = match resolve_config(args, presets) {
        Ok(config) => config,
        Err(e) if e.is::<MissingFlagFile>() => {
            err.write_all(OutputGenerator::format_error(&e).as_bytes())?;
            let help = Cli::command().render_help();
            write!(out, "{}", help)?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => return Err(e),
    };

    log::debug!("Searching {:?} with {:?}", config.root_dir, config.options);
    let outcome = Scanner::new(&config.options).scan(&config.root_dir);

    if !outcome.errors.is_empty() {
        match config.error_mode {
            ErrorMode::Panic => {
                err.write_all(OutputGenerator::format_errors(&outcome.errors).as_bytes())?;
                return Ok(EXIT_FAILURE);
            }
            ErrorMode::Print => {
                err.write_all(OutputGenerator::format_errors(&outcome.errors).as_bytes())?;
            }
            ErrorMode::Ignore => {}
        }
    }

    let output = OutputGenerator::format_matches(&outcome.matches, config.separator);
    out.write_all(output.as_bytes())
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;

    Ok(EXIT_SUCCESS)
}
