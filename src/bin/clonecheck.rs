// src/bin/clonecheck.rs
use clap::Parser;
use clonecheck::cli::{self, Cli};
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            ExitCode::FAILURE
        }
    }
}
