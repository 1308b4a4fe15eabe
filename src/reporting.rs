// src/reporting.rs
//! Output for both modes: per-function AST dumps and clone reports,
//! as text or JSON.

use crate::corpus::CloneMatch;
use crate::parser::Function;
use crate::tree::printer;
use anyhow::Result;
use colored::Colorize;

/// Print mode: each function's signature, then its indented AST.
pub fn print_functions<'a>(functions: impl IntoIterator<Item = &'a Function>) {
    for function in functions {
        println!("{}", function.name.bold());
        print!("{}", printer::render(&function.body));
    }
}

/// Compare mode, text form: four lines per match.
pub fn print_matches(matches: &[CloneMatch]) {
    for found in matches {
        println!("comparing {} at {}", found.checked.bold(), found.checked_location);
        println!("to {} at {}", found.known.bold(), found.known_location);
        println!("similarity: {}", format_score(found.score));
        println!();
    }
}

/// Compare mode, JSON form: an array of match records.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn print_matches_json(matches: &[CloneMatch]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(matches)?);
    Ok(())
}

fn format_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.4}");
    if score >= 0.9 {
        text.red().bold()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.normal()
    }
}
