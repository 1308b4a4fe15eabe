// src/corpus.rs
//! Corpus driving: walk directory trees of C++ sources, parse every file
//! into keyed function maps, and compare all pairs.

use crate::compare;
use crate::config::CompareConfig;
use crate::error::{Error, Result};
use crate::parser::{Function, SourceParser};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// File suffixes treated as C++ source.
pub const SOURCE_EXTENSIONS: &[&str] = &["cc", "cpp", "cxx", "h", "hpp", "hxx"];

/// Functions keyed by their stable signature. Later files win on
/// duplicate signatures.
pub type FunctionMap = BTreeMap<String, Function>;

/// One reported pair with similarity above the threshold.
#[derive(Debug, Clone, Serialize)]
pub struct CloneMatch {
    pub checked: String,
    pub checked_location: String,
    pub known: String,
    pub known_location: String,
    pub score: f64,
}

/// Parses every C++ file under `root`. Unreadable or unparseable files
/// are logged and skipped; an unusable root is fatal.
pub fn collect_functions(root: &Path) -> Result<FunctionMap> {
    if !root.is_dir() {
        return Err(Error::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut parser = SourceParser::new()?;
    let mut functions = FunctionMap::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
            continue;
        }
        match parser.parse_file(entry.path()) {
            Ok(parsed) => {
                for function in parsed {
                    functions.insert(function.name.clone(), function);
                }
            }
            Err(err) => warn!(%err, "skipping file"),
        }
    }
    Ok(functions)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// All-pairs comparison of `checked` against `known`. The trees were
/// built during collection and are never mutated, so the fan-out hands
/// each worker immutable references only.
#[must_use]
pub fn compare_corpora(
    checked: &FunctionMap,
    known: &FunctionMap,
    config: &CompareConfig,
) -> Vec<CloneMatch> {
    let pairs: Vec<(&Function, &Function)> = checked
        .values()
        .flat_map(|checked_fn| known.values().map(move |known_fn| (checked_fn, known_fn)))
        .collect();

    pairs
        .par_iter()
        .filter_map(|(checked_fn, known_fn)| {
            let score = compare::compare(&checked_fn.body, &known_fn.body, config);
            (score > config.score_threshold).then(|| CloneMatch {
                checked: checked_fn.name.clone(),
                checked_location: checked_fn.location.to_string(),
                known: known_fn.name.clone(),
                known_location: known_fn.location.to_string(),
                score,
            })
        })
        .collect()
}
