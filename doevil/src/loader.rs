//! Program loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from loading a program file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("unable to open file {}: not found", .0.display())]
    NotFound(PathBuf),
    /// The path exists but is not a regular file.
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
    /// Any other I/O failure while opening or reading.
    #[error("error reading from file {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Read the whole program file into memory.
pub fn load_program(path: &Path) -> Result<Vec<u8>, LoadError> {
    let metadata = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if metadata.is_dir() {
        return Err(LoadError::NotAFile(path.to_path_buf()));
    }
    let program = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = program.len(), "program loaded");
    Ok(program)
}
