// src/cli.rs
//! Command-line surface and dispatch.

use crate::config::CompareConfig;
use crate::parser::SourceParser;
use crate::{corpus, reporting};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "clonecheck",
    version,
    about = "Structural similarity detection for C++ functions"
)]
pub struct Cli {
    /// Verbose diagnostics (debug-level tracing)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file (defaults to ./clonecheck.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized AST of every function in a file or directory
    Print { path: PathBuf },

    /// Compare every function under to_check against every known sample
    Compare {
        known_samples: PathBuf,
        to_check: PathBuf,

        /// Emit matches as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Report only pairs scoring above this value
        #[arg(long)]
        threshold: Option<f64>,
    },
}

/// Runs the parsed command line to completion.
///
/// # Errors
/// Returns any fatal error (grammar load, unreadable input root, bad
/// config); per-file trouble is logged and skipped instead.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = CompareConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Print { path } => handle_print(&path),
        Commands::Compare {
            known_samples,
            to_check,
            json,
            threshold,
        } => {
            if let Some(threshold) = threshold {
                config.score_threshold = threshold;
            }
            handle_compare(&known_samples, &to_check, json, &config)
        }
    }
}

fn handle_print(path: &Path) -> Result<()> {
    let functions = if path.is_dir() {
        corpus::collect_functions(path)?
    } else {
        let mut parser = SourceParser::new()?;
        parser
            .parse_file(path)?
            .into_iter()
            .map(|function| (function.name.clone(), function))
            .collect()
    };
    reporting::print_functions(functions.values());
    Ok(())
}

fn handle_compare(
    known_dir: &Path,
    check_dir: &Path,
    json: bool,
    config: &CompareConfig,
) -> Result<()> {
    let known = corpus::collect_functions(known_dir)?;
    let checked = corpus::collect_functions(check_dir)?;
    let matches = corpus::compare_corpora(&checked, &known, config);

    if json {
        reporting::print_matches_json(&matches)
    } else {
        reporting::print_matches(&matches);
        Ok(())
    }
}
