// src/error.rs
//! Library error taxonomy. Recoverable conditions (unknown node kinds,
//! failed coercions, per-file parse trouble) never surface here - they
//! become `Unknown` leaves, zero scores, or skipped files.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The C++ frontend grammar could not be installed. Fatal.
    #[error("failed to load the C++ grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// A file or directory could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frontend produced no tree for a file.
    #[error("frontend produced no parse tree for {path}")]
    Parse { path: PathBuf },

    /// A config file failed to deserialize.
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}
