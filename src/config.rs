// src/config.rs
//! Comparison tunables, loadable from `clonecheck.toml`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "clonecheck.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// When true, identifiers only match when their names are equal.
    /// Off by default: clones routinely rename variables.
    pub match_identifier_names: bool,
    /// Pairs scoring at or below this are not reported.
    pub score_threshold: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            match_identifier_names: false,
            score_threshold: 0.0,
        }
    }
}

impl CompareConfig {
    /// Loads `path` when given, else `clonecheck.toml` when present, else
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(p) => p,
            None if Path::new(CONFIG_FILE).is_file() => Path::new(CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
    }
}
