//! Driver-level error types: everything that can go wrong resolving and
//! reading/writing files around the compilation pipeline proper.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("directory contains no .jack files: {0}")]
    NoJackFiles(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, #[source] source: std::io::Error },

    #[error("{path}: {message}")]
    Compile { path: PathBuf, message: String },
}
